// src/config/mod.rs
pub mod io;
pub mod types;

pub use self::types::{AnalysisConfig, Config, ScanConfig, SelectionConfig};
use crate::error::{AuditError, Result};
use std::path::Path;

/// File name looked up at the repository root.
pub const CONFIG_FILE: &str = "repoaudit.toml";

impl Config {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from an explicit TOML file.
    ///
    /// # Errors
    /// Returns error if the file cannot be read, parsed, or fails validation.
    pub fn load(path: &Path) -> Result<Self> {
        let config = io::read_toml(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `repoaudit.toml` from `root` when present, defaults otherwise.
    ///
    /// # Errors
    /// Returns error if a config file exists but is malformed.
    pub fn discover(root: &Path) -> Result<Self> {
        let candidate = root.join(CONFIG_FILE);
        if candidate.is_file() {
            return Self::load(&candidate);
        }
        Ok(Self::default())
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    /// Returns error on malformed TOML or invalid values.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the selector cannot work with.
    ///
    /// # Errors
    /// Returns `InvalidConfig` naming the first offending key.
    pub fn validate(&self) -> Result<()> {
        let sel = &self.selection;
        if sel.max_files == 0 {
            return Err(AuditError::InvalidConfig("selection.max_files must be > 0".into()));
        }
        if sel.line_cap == 0 {
            return Err(AuditError::InvalidConfig("selection.line_cap must be > 0".into()));
        }
        if sel.per_group_limit == 0 {
            return Err(AuditError::InvalidConfig(
                "selection.per_group_limit must be > 0".into(),
            ));
        }
        check_multiplier("selection.default_multiplier", sel.default_multiplier)?;
        for (ext, m) in &sel.multipliers {
            check_multiplier(&format!("selection.multipliers.{ext}"), *m)?;
        }
        Ok(())
    }
}

fn check_multiplier(key: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(AuditError::InvalidConfig(format!("{key} must be a positive number, got {value}")))
    }
}
