// src/config/io.rs
use super::types::Config;
use crate::error::{AuditError, Result};
use std::fs;
use std::path::Path;

/// Reads and deserializes a TOML config file without validating it.
///
/// # Errors
/// Returns error if the file cannot be read or is not valid TOML.
pub fn read_toml(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path).map_err(|e| AuditError::io(e, path))?;
    let config = toml::from_str(&content)?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}
