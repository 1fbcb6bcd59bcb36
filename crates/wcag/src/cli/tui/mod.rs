//! Terminal User Interface for the WCAG checklist
//!
//! Search field, level filters and the criteria list on one screen.

pub mod app;
pub mod components;
pub mod event;
pub mod keymap;
pub mod palette;
pub mod ui;

use anyhow::Result;
use crossterm::{
    cursor::Show,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use ratatui::{backend::CrosstermBackend, prelude::*, Terminal};
use std::io::stdout;
use std::time::Duration;

use super::context::AppContext;
use app::App;
use event::{Event, EventHandler};

/// Run the TUI
pub fn run(ctx: &AppContext) -> Result<()> {
    let session = ctx.open_session()?;
    let mut app = App::new(
        session,
        ctx.progress_store(),
        ctx.preferences_store(),
        ctx.theme(),
    );
    let events = EventHandler::new(Duration::from_millis(ctx.config.tick_rate_ms));
    tracing::info!(home = %ctx.home.display(), "Starting TUI");

    // Setup terminal
    enable_raw_mode()?;
    let enhanced = restore_on_error(enter_screen(), || restore_after_failure(false))?;
    let mut terminal = restore_on_error(Terminal::new(CrosstermBackend::new(stdout())), || {
        restore_after_failure(enhanced)
    })?;

    let result = run_app(&mut terminal, &mut app, &events);

    restore_terminal(enhanced)?;
    result
}

/// Flags pushed when the terminal can report modifiers on Enter.
fn keyboard_flags() -> KeyboardEnhancementFlags {
    KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
}

/// Switch to the alternate screen. Returns whether keyboard enhancement
/// flags were pushed.
fn enter_screen() -> Result<bool> {
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    // Legacy encoding sends Shift+Enter and Ctrl+Enter as plain Enter
    let enhanced = matches!(supports_keyboard_enhancement(), Ok(true));
    if enhanced {
        execute!(stdout, PushKeyboardEnhancementFlags(keyboard_flags()))?;
    }
    tracing::debug!(enhanced, "Entered alternate screen");
    Ok(enhanced)
}

fn restore_terminal(enhanced: bool) -> Result<()> {
    let mut stdout = stdout();
    if enhanced {
        execute!(stdout, PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    execute!(stdout, LeaveAlternateScreen, Show)?;
    Ok(())
}

/// Run `restore` before propagating a failed setup step.
fn restore_on_error<T, E>(step: std::result::Result<T, E>, restore: impl FnOnce()) -> Result<T>
where
    E: Into<anyhow::Error>,
{
    step.map_err(|err| {
        restore();
        err.into()
    })
}

fn restore_after_failure(enhanced: bool) {
    if let Err(err) = restore_terminal(enhanced) {
        tracing::error!(error = %format!("{:#}", err), "Failed to restore terminal");
    }
}

/// Run the application loop
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App, events: &EventHandler) -> Result<()> {
    while app.running {
        terminal.draw(|frame| ui::draw(frame, app))?;

        match events.next()? {
            Event::Key(key) => app.handle_key(key),
            Event::Tick => {}
            Event::Resize(_, _) => {} // Ratatui handles resize
        }
    }
    Ok(())
}
