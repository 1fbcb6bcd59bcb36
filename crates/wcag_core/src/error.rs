//! Error types for loading checklist documents and persisted state.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or validating a checklist document.
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Failed to read checklist {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid checklist TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Duplicate criterion id '{0}'")]
    DuplicateId(String),

    #[error("Criterion {number} has an empty {field}")]
    EmptyField { number: String, field: &'static str },

    #[error("Heading level {0} is not supported (expected 2 or 3)")]
    InvalidHeadingLevel(u8),
}

/// Errors raised by progress and preference stores.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed progress file {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Malformed preferences file {path}: {source}")]
    Preferences {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to encode preferences: {0}")]
    PreferencesEncode(#[from] toml::ser::Error),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}
