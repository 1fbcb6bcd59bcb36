//! Keyboard navigation over the match set.
//!
//! The cursor is `None` (idle) or an index in `0..n`. `next`/`prev` wrap,
//! jumps and paging clamp. Paging from idle treats the cursor as sitting just
//! before the first match.

/// Keys the search field reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Up,
    Down,
    PageUp,
    PageDown,
    Home,
    End,
    Char(char),
    Other,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
    };

    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        ctrl: false,
        alt: false,
    };

    pub const CTRL: Modifiers = Modifiers {
        shift: false,
        ctrl: true,
        alt: false,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavCommand {
    Next,
    Prev,
    First,
    Last,
    /// Move by a signed number of matches without wrapping.
    Page(isize),
    /// Toggle the check state of the current match.
    Accept,
}

impl NavCommand {
    /// Map a key event to a command. `page_size` is the distance of PageUp/PageDown.
    pub fn from_key(key: Key, modifiers: Modifiers, page_size: usize) -> Option<Self> {
        let page = page_size.max(1) as isize;
        match key {
            Key::Enter if modifiers.ctrl => Some(NavCommand::Accept),
            Key::Char('t') | Key::Char('T') if modifiers.ctrl => Some(NavCommand::Accept),
            Key::Enter if modifiers.shift => Some(NavCommand::Prev),
            Key::Enter | Key::Down => Some(NavCommand::Next),
            Key::Up => Some(NavCommand::Prev),
            Key::PageDown => Some(NavCommand::Page(page)),
            Key::PageUp => Some(NavCommand::Page(-page)),
            Key::Home => Some(NavCommand::First),
            Key::End => Some(NavCommand::Last),
            _ => None,
        }
    }

    pub fn is_movement(self) -> bool {
        !matches!(self, NavCommand::Accept)
    }
}

/// Apply a movement command to the cursor over `len` matches.
///
/// With no matches the cursor is always idle. `Accept` leaves the cursor
/// unchanged.
pub fn transition(current: Option<usize>, len: usize, command: NavCommand) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let last = len - 1;
    match command {
        NavCommand::Next => Some(current.map_or(0, |idx| (idx + 1) % len)),
        NavCommand::Prev => Some(current.map_or(last, |idx| (idx + len - 1) % len)),
        NavCommand::First => Some(0),
        NavCommand::Last => Some(last),
        NavCommand::Page(delta) => {
            let base = current.map_or(-1, |idx| idx as isize);
            let target = base.saturating_add(delta).clamp(0, last as isize);
            Some(target as usize)
        }
        NavCommand::Accept => current.filter(|idx| *idx < len),
    }
}
