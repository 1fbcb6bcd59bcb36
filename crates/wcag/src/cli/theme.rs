//! `wcag theme`

use anyhow::{Context, Result};
use clap::Subcommand;
use wcag_core::{Preferences, Theme};

use super::context::AppContext;

#[derive(Subcommand, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ThemeAction {
    /// Print the saved theme
    #[default]
    Show,
    /// Use the light theme
    Light,
    /// Use the dark theme
    Dark,
    /// Switch between light and dark
    Toggle,
}

pub fn run(ctx: &AppContext, action: ThemeAction) -> Result<()> {
    let store = ctx.preferences_store();
    let theme = match action {
        ThemeAction::Show => ctx.theme(),
        ThemeAction::Toggle => store
            .toggle_theme()
            .with_context(|| format!("Failed to update {}", store.path().display()))?,
        ThemeAction::Light | ThemeAction::Dark => {
            let theme = if action == ThemeAction::Dark {
                Theme::Dark
            } else {
                Theme::Light
            };
            store
                .save(&Preferences { theme })
                .with_context(|| format!("Failed to update {}", store.path().display()))?;
            theme
        }
    };
    println!("{}", theme);
    Ok(())
}
