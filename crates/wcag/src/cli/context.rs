//! Shared command context: resolved home, settings and stores.

use anyhow::{Context, Result};
use std::path::PathBuf;
use wcag_core::{
    ChecklistDocument, ChecklistSession, CriterionId, DocumentError, PreferencesStore,
    ProgressStore, Theme,
};

use super::config::{AppConfig, CONFIG_FILE};
use super::error::HelpfulError;

#[derive(Debug, Clone)]
pub struct AppContext {
    pub home: PathBuf,
    pub config: AppConfig,
    checklist_override: Option<PathBuf>,
}

impl AppContext {
    pub fn resolve(home: PathBuf, checklist: Option<PathBuf>) -> Result<Self> {
        let config = AppConfig::load(&home.join(CONFIG_FILE))?;
        Ok(Self {
            home,
            config,
            checklist_override: checklist,
        })
    }

    pub fn config_path(&self) -> PathBuf {
        self.home.join(CONFIG_FILE)
    }

    pub fn progress_store(&self) -> ProgressStore {
        ProgressStore::in_dir(&self.home)
    }

    pub fn preferences_store(&self) -> PreferencesStore {
        PreferencesStore::in_dir(&self.home)
    }

    /// `--checklist` wins over config.toml; relative config paths are
    /// resolved against the home directory.
    pub fn checklist_path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.checklist_override {
            return Some(path.clone());
        }
        self.config.checklist.as_ref().map(|path| {
            if path.is_relative() {
                self.home.join(path)
            } else {
                path.clone()
            }
        })
    }

    pub fn load_document(&self) -> Result<ChecklistDocument> {
        let Some(path) = self.checklist_path() else {
            return ChecklistDocument::builtin().context("Bundled checklist is invalid");
        };
        if !path.exists() {
            return Err(HelpfulError::checklist_not_found(&path).into());
        }
        ChecklistDocument::load(&path).map_err(|err| match err {
            DocumentError::Io { .. } => anyhow::Error::new(err),
            other => HelpfulError::invalid_checklist(&path, &other.to_string()).into(),
        })
    }

    /// Load the checklist and apply saved progress.
    pub fn open_session(&self) -> Result<ChecklistSession> {
        let document = self.load_document()?;
        let mut session = ChecklistSession::new(document);
        session.set_page_size(self.config.page_size);

        let saved = self.progress_store().load_or_default();
        if !saved.is_empty() {
            let outcome = session.apply_progress(&saved);
            tracing::info!(
                applied = outcome.applied,
                skipped = outcome.skipped.len(),
                "Restored progress"
            );
        }
        Ok(session)
    }

    pub fn save_progress(&self, session: &ChecklistSession) -> Result<()> {
        let store = self.progress_store();
        store
            .save(&session.progress_map())
            .with_context(|| format!("Failed to save progress to {}", store.path().display()))
    }

    /// Saved theme; an unreadable preferences file falls back to light.
    pub fn theme(&self) -> Theme {
        match self.preferences_store().load() {
            Ok(preferences) => preferences.theme,
            Err(err) => {
                tracing::warn!(error = %err, "Ignoring preferences");
                Theme::default()
            }
        }
    }
}

/// Resolve a user-supplied criterion reference: an id (`sc-1-4-3`) or a
/// number (`1.4.3`).
pub fn resolve_criterion(session: &ChecklistSession, reference: &str) -> Option<CriterionId> {
    let reference = reference.trim();
    let document = session.document();
    [CriterionId::new(reference), CriterionId::from_number(reference)]
        .into_iter()
        .find(|id| document.criterion(id).is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn context(dir: &TempDir) -> AppContext {
        AppContext::resolve(dir.path().to_path_buf(), None).unwrap()
    }

    #[test]
    fn test_open_session_uses_builtin_and_saved_progress() {
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir);
        let mut session = ctx.open_session().unwrap();
        assert_eq!(session.document().criteria_count(), 78);

        session.set_checked(&CriterionId::new("sc-1-4-3"), true);
        ctx.save_progress(&session).unwrap();

        let reopened = ctx.open_session().unwrap();
        assert_eq!(reopened.progress().checked, 1);
    }

    #[test]
    fn test_missing_checklist_is_helpful_error() {
        let dir = TempDir::new().unwrap();
        let ctx = AppContext::resolve(dir.path().to_path_buf(), Some(dir.path().join("nope.toml"))).unwrap();
        let err = ctx.load_document().unwrap_err();
        let helpful = err.downcast_ref::<HelpfulError>().unwrap();
        assert!(helpful.message.contains("nope.toml"));
    }

    #[test]
    fn test_config_checklist_is_relative_to_home() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "checklist = \"mine.toml\"").unwrap();
        let ctx = context(&dir);
        assert_eq!(ctx.checklist_path(), Some(dir.path().join("mine.toml")));
    }

    #[test]
    fn test_resolve_criterion_accepts_number_or_id() {
        let session = ChecklistSession::new(ChecklistDocument::builtin().unwrap());
        assert_eq!(
            resolve_criterion(&session, "1.4.3"),
            Some(CriterionId::new("sc-1-4-3"))
        );
        assert_eq!(
            resolve_criterion(&session, "sc-2-1-1"),
            Some(CriterionId::new("sc-2-1-1"))
        );
        assert_eq!(resolve_criterion(&session, "9.9.9"), None);
    }
}
