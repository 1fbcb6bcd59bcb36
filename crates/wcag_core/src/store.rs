//! Local persistence of check state.
//!
//! Progress is a flat JSON object mapping criterion ids to their checked
//! state. The same format is used for the on-disk store and for export files.

use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::StoreError;
use crate::progress::ProgressMap;

pub const PROGRESS_FILE: &str = "progress.json";

/// Progress file under the checklist home directory.
#[derive(Debug, Clone)]
pub struct ProgressStore {
    path: PathBuf,
}

impl ProgressStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn in_dir(home: &Path) -> Self {
        Self::new(home.join(PROGRESS_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load saved progress. A missing file means no progress yet.
    pub fn load(&self) -> Result<Option<ProgressMap>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        read_progress(&self.path).map(Some)
    }

    /// Load saved progress, logging and discarding a malformed file.
    pub fn load_or_default(&self) -> ProgressMap {
        match self.load() {
            Ok(map) => map.unwrap_or_default(),
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "Ignoring saved progress");
                ProgressMap::new()
            }
        }
    }

    pub fn save(&self, map: &ProgressMap) -> Result<(), StoreError> {
        write_progress(&self.path, map)?;
        tracing::debug!(path = %self.path.display(), entries = map.len(), "Saved progress");
        Ok(())
    }

    pub fn clear(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StoreError::io(&self.path, err)),
        }
    }
}

/// Write progress to an export file.
pub fn export_progress(path: &Path, map: &ProgressMap) -> Result<(), StoreError> {
    write_progress(path, map)?;
    tracing::info!(path = %path.display(), entries = map.len(), "Exported progress");
    Ok(())
}

/// Read an export file. Malformed JSON is reported as [`StoreError::Malformed`].
pub fn import_progress(path: &Path) -> Result<ProgressMap, StoreError> {
    let map = read_progress(path)?;
    tracing::info!(path = %path.display(), entries = map.len(), "Read progress import");
    Ok(map)
}

/// `wcag-progress-YYYY-MM-DD.json`
pub fn default_export_name(date: NaiveDate) -> String {
    format!("wcag-progress-{}.json", date.format("%Y-%m-%d"))
}

pub fn default_export_name_today() -> String {
    default_export_name(chrono::Local::now().date_naive())
}

fn read_progress(path: &Path) -> Result<ProgressMap, StoreError> {
    let content = fs::read_to_string(path).map_err(|err| StoreError::io(path, err))?;
    serde_json::from_str(&content).map_err(|source| StoreError::Malformed {
        path: path.to_path_buf(),
        source,
    })
}

fn write_progress(path: &Path, map: &ProgressMap) -> Result<(), StoreError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| StoreError::io(parent, err))?;
    }
    let json = serde_json::to_string_pretty(map)?;
    fs::write(path, json).map_err(|err| StoreError::io(path, err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample() -> ProgressMap {
        let mut map = ProgressMap::new();
        map.insert("sc-1-1-1".to_string(), true);
        map.insert("sc-1-4-3".to_string(), false);
        map
    }

    #[test]
    fn test_missing_file_is_none() {
        let dir = TempDir::new().unwrap();
        let store = ProgressStore::in_dir(dir.path());
        assert!(store.load().unwrap().is_none());
        assert!(store.load_or_default().is_empty());
    }

    #[test]
    fn test_save_creates_parent_and_loads_back() {
        let dir = TempDir::new().unwrap();
        let store = ProgressStore::in_dir(&dir.path().join("nested"));
        store.save(&sample()).unwrap();
        assert_eq!(store.load().unwrap(), Some(sample()));
    }

    #[test]
    fn test_malformed_store_is_ignored_by_load_or_default() {
        let dir = TempDir::new().unwrap();
        let store = ProgressStore::in_dir(dir.path());
        fs::write(store.path(), "{ not json").unwrap();
        assert!(matches!(store.load(), Err(StoreError::Malformed { .. })));
        assert!(store.load_or_default().is_empty());
    }

    #[test]
    fn test_import_rejects_wrong_shape() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("import.json");
        fs::write(&path, r#"["sc-1-1-1"]"#).unwrap();
        assert!(matches!(import_progress(&path), Err(StoreError::Malformed { .. })));
    }

    #[test]
    fn test_import_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = import_progress(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
    }

    #[test]
    fn test_export_is_pretty_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.json");
        export_progress(&path, &sample()).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("\n  \"sc-1-1-1\": true"));
        assert_eq!(import_progress(&path).unwrap(), sample());
    }

    #[test]
    fn test_clear_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = ProgressStore::in_dir(dir.path());
        store.save(&sample()).unwrap();
        store.clear().unwrap();
        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_default_export_name() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(default_export_name(date), "wcag-progress-2024-03-07.json");
    }
}
