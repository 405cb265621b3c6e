// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuditError {
    #[error("I/O error: {source} (path: {path})")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("Directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    #[error("Invalid category '{id}': {reason}")]
    InvalidCategory { id: String, reason: String },

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Scorer failed: {0}")]
    Scorer(String),
}

impl AuditError {
    pub(crate) fn io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        Self::Io {
            source,
            path: path.into(),
        }
    }

    pub(crate) fn category(id: &str, reason: impl Into<String>) -> Self {
        Self::InvalidCategory {
            id: id.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AuditError>;

// Allow `?` on std::io::Error by converting to AuditError::Io with unknown path.
impl From<std::io::Error> for AuditError {
    fn from(source: std::io::Error) -> Self {
        AuditError::Io {
            source,
            path: PathBuf::from("<unknown>"),
        }
    }
}
