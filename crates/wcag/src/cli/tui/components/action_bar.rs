use std::borrow::Cow;

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionHint {
    pub key: Cow<'static, str>,
    pub label: Cow<'static, str>,
    pub priority: u8,
}

impl ActionHint {
    pub fn new(key: impl Into<Cow<'static, str>>, label: impl Into<Cow<'static, str>>, priority: u8) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            priority,
        }
    }

    /// `[key] label`
    fn width(&self) -> usize {
        self.key.chars().count() + 3 + self.label.chars().count()
    }
}

const GAP: &str = "  ";

/// Indices of the hints that fit in `width`, in their original order.
///
/// Lowest-priority hints are dropped first; ties drop the later hint.
fn fit_hints(hints: &[ActionHint], width: usize) -> Vec<usize> {
    let mut active: Vec<usize> = (0..hints.len()).collect();
    loop {
        let total: usize = active.iter().map(|idx| hints[*idx].width()).sum::<usize>()
            + GAP.len() * active.len().saturating_sub(1);
        if total <= width || active.is_empty() {
            return active;
        }
        let drop = active
            .iter()
            .enumerate()
            .min_by_key(|(_, idx)| (hints[**idx].priority, std::cmp::Reverse(**idx)))
            .map(|(pos, _)| pos)
            .unwrap_or(0);
        active.remove(drop);
    }
}

pub fn render_action_bar(frame: &mut Frame, area: Rect, hints: &[ActionHint], style: Style, key_color: Color) {
    if area.height == 0 || area.width == 0 {
        return;
    }

    let block = Block::default().borders(Borders::TOP).border_style(style);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height == 0 {
        return;
    }

    let mut spans = Vec::new();
    for (n, idx) in fit_hints(hints, inner.width as usize).into_iter().enumerate() {
        if n > 0 {
            spans.push(Span::raw(GAP));
        }
        let hint = &hints[idx];
        spans.push(Span::styled(
            format!("[{}]", hint.key),
            Style::default().fg(key_color).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(" "));
        spans.push(Span::styled(hint.label.clone(), style));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).alignment(Alignment::Center), inner);
}

pub fn format_help_lines(hints: &[ActionHint]) -> Vec<String> {
    let key_width = hints
        .iter()
        .map(|hint| hint.key.chars().count())
        .max()
        .unwrap_or(0);
    hints
        .iter()
        .map(|hint| format!("  {:<width$}  {}", hint.key, hint.label, width = key_width))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hints() -> Vec<ActionHint> {
        vec![
            ActionHint::new("Enter", "Next", 100),
            ActionHint::new("F1", "Help", 10),
            ActionHint::new("Esc", "Clear", 50),
        ]
    }

    #[test]
    fn test_all_hints_fit() {
        assert_eq!(fit_hints(&hints(), 80), vec![0, 1, 2]);
    }

    #[test]
    fn test_low_priority_dropped_first() {
        // "[Enter] Next" (12) + gap + "[Esc] Clear" (11)
        assert_eq!(fit_hints(&hints(), 25), vec![0, 2]);
        assert_eq!(fit_hints(&hints(), 12), vec![0]);
        assert!(fit_hints(&hints(), 3).is_empty());
    }

    #[test]
    fn test_help_lines_align_keys() {
        let lines = format_help_lines(&hints());
        assert_eq!(lines[0], "  Enter  Next");
        assert_eq!(lines[1], "  F1     Help");
    }
}
