//! Light/dark theme preference.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::StoreError;

pub const PREFERENCES_FILE: &str = "preferences.toml";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggle(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Only `dark` selects the dark theme; anything else is light.
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("dark") {
            Theme::Dark
        } else {
            Theme::Light
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Preferences {
    pub theme: Theme,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct RawPreferences {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    theme: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PreferencesStore {
    path: PathBuf,
}

impl PreferencesStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn in_dir(home: &Path) -> Self {
        Self::new(home.join(PREFERENCES_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing file yields the defaults.
    pub fn load(&self) -> Result<Preferences, StoreError> {
        if !self.path.exists() {
            return Ok(Preferences::default());
        }
        let content = fs::read_to_string(&self.path).map_err(|err| StoreError::io(&self.path, err))?;
        let raw: RawPreferences = toml::from_str(&content).map_err(|source| StoreError::Preferences {
            path: self.path.clone(),
            source,
        })?;
        Ok(Preferences {
            theme: raw.theme.as_deref().map(Theme::parse).unwrap_or_default(),
        })
    }

    pub fn save(&self, preferences: &Preferences) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| StoreError::io(parent, err))?;
        }
        let raw = RawPreferences {
            theme: Some(preferences.theme.as_str().to_string()),
        };
        let content = toml::to_string(&raw)?;
        fs::write(&self.path, content).map_err(|err| StoreError::io(&self.path, err))?;
        tracing::debug!(path = %self.path.display(), theme = %preferences.theme, "Saved preferences");
        Ok(())
    }

    /// Flip the saved theme and return the new one.
    pub fn toggle_theme(&self) -> Result<Theme, StoreError> {
        let mut preferences = self.load()?;
        preferences.theme = preferences.theme.toggle();
        self.save(&preferences)?;
        Ok(preferences.theme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_theme_parse_and_toggle() {
        assert_eq!(Theme::parse("dark"), Theme::Dark);
        assert_eq!(Theme::parse("DARK "), Theme::Dark);
        assert_eq!(Theme::parse("solarized"), Theme::Light);
        assert_eq!(Theme::Light.toggle(), Theme::Dark);
        assert_eq!(Theme::Dark.toggle(), Theme::Light);
    }

    #[test]
    fn test_missing_preferences_default_to_light() {
        let dir = TempDir::new().unwrap();
        let store = PreferencesStore::in_dir(dir.path());
        assert_eq!(store.load().unwrap().theme, Theme::Light);
    }

    #[test]
    fn test_toggle_persists() {
        let dir = TempDir::new().unwrap();
        let store = PreferencesStore::in_dir(dir.path());
        assert_eq!(store.toggle_theme().unwrap(), Theme::Dark);
        let content = fs::read_to_string(store.path()).unwrap();
        assert_eq!(content.trim(), r#"theme = "dark""#);
        assert_eq!(store.toggle_theme().unwrap(), Theme::Light);
    }

    #[test]
    fn test_unknown_theme_value_is_light() {
        let dir = TempDir::new().unwrap();
        let store = PreferencesStore::in_dir(dir.path());
        fs::write(store.path(), "theme = \"sepia\"\n").unwrap();
        assert_eq!(store.load().unwrap().theme, Theme::Light);
    }

    #[test]
    fn test_malformed_preferences_error() {
        let dir = TempDir::new().unwrap();
        let store = PreferencesStore::in_dir(dir.path());
        fs::write(store.path(), "theme = ").unwrap();
        assert!(matches!(store.load(), Err(StoreError::Preferences { .. })));
    }
}
