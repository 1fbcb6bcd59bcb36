//! Colors for the light and dark themes

use ratatui::style::{Color, Modifier, Style};
use wcag_core::{Level, Theme};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub base: Style,
    pub dim: Style,
    pub accent: Color,
    /// Search match
    pub highlight: Style,
    /// List cursor row
    pub selected: Style,
    pub checked: Color,
    pub error: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                base: Style::default().fg(Color::Black).bg(Color::White),
                dim: Style::default().fg(Color::DarkGray),
                accent: Color::Blue,
                highlight: Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
                selected: Style::default().fg(Color::Black).bg(Color::LightBlue),
                checked: Color::Green,
                error: Color::Red,
            },
            Theme::Dark => Self {
                base: Style::default().fg(Color::Gray).bg(Color::Black),
                dim: Style::default().fg(Color::DarkGray),
                accent: Color::Cyan,
                highlight: Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
                selected: Style::default().fg(Color::White).bg(Color::DarkGray),
                checked: Color::LightGreen,
                error: Color::LightRed,
            },
        }
    }

    pub fn level(&self, level: Option<Level>) -> Color {
        match level {
            Some(Level::A) => self.checked,
            Some(Level::AA) => self.accent,
            Some(Level::AAA) => Color::Magenta,
            None => Color::DarkGray,
        }
    }

    pub fn border(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
        } else {
            self.dim
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_themes_differ() {
        assert_ne!(Palette::for_theme(Theme::Light), Palette::for_theme(Theme::Dark));
    }
}
