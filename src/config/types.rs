use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::categorize::CategoryDef;

/// Top-level configuration, read from `repoaudit.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub selection: SelectionConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    /// Extra or overriding category definitions (`[[category]]` tables).
    #[serde(default, rename = "category")]
    pub categories: Vec<CategoryDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: u64,
    /// Path regexes; matching files never reach the engine.
    #[serde(default)]
    pub exclude: Vec<String>,
    #[serde(default = "default_prune_dirs")]
    pub prune_dirs: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            max_file_bytes: default_max_file_bytes(),
            exclude: Vec::new(),
            prune_dirs: default_prune_dirs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionConfig {
    /// Total cost units a single category may forward to the scorer.
    #[serde(default = "default_budget")]
    pub budget: i64,
    #[serde(default = "default_max_files")]
    pub max_files: usize,
    #[serde(default = "default_important_cap")]
    pub important_cap: usize,
    #[serde(default = "default_line_cap")]
    pub line_cap: usize,
    #[serde(default = "default_per_group_limit")]
    pub per_group_limit: usize,
    #[serde(default = "default_multiplier")]
    pub default_multiplier: f64,
    /// Count real `cl100k_base` tokens instead of estimating from length.
    #[serde(default)]
    pub exact_tokens: bool,
    /// Cost per character, keyed by lowercase extension without the dot.
    #[serde(default = "default_multipliers")]
    pub multipliers: BTreeMap<String, f64>,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            budget: default_budget(),
            max_files: default_max_files(),
            important_cap: default_important_cap(),
            line_cap: default_line_cap(),
            per_group_limit: default_per_group_limit(),
            default_multiplier: default_multiplier(),
            exact_tokens: false,
            multipliers: default_multipliers(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default = "default_important_limit")]
    pub important_files_limit: usize,
    #[serde(default = "default_category_top")]
    pub category_top_files: usize,
    #[serde(default = "default_top_entries")]
    pub top_entries: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            important_files_limit: default_important_limit(),
            category_top_files: default_category_top(),
            top_entries: default_top_entries(),
        }
    }
}

const fn default_max_file_bytes() -> u64 { 1024 * 1024 }
const fn default_budget() -> i64 { 24_000 }
const fn default_max_files() -> usize { 12 }
const fn default_important_cap() -> usize { 5 }
const fn default_line_cap() -> usize { 400 }
const fn default_per_group_limit() -> usize { 5 }
const fn default_multiplier() -> f64 { 0.25 }
const fn default_important_limit() -> usize { 20 }
const fn default_category_top() -> usize { 10 }
const fn default_top_entries() -> usize { 10 }

fn default_prune_dirs() -> Vec<String> {
    [
        ".git", "node_modules", "__pycache__", ".idea", ".vscode", ".venv", "venv", "env",
        "build", "dist", "target",
    ]
    .iter()
    .map(ToString::to_string)
    .collect()
}

// Symbol-heavy languages pack fewer characters per token.
fn default_multipliers() -> BTreeMap<String, f64> {
    [
        ("rs", 0.30),
        ("py", 0.25),
        ("js", 0.28),
        ("jsx", 0.30),
        ("ts", 0.28),
        ("tsx", 0.30),
        ("json", 0.35),
        ("toml", 0.30),
        ("md", 0.22),
        ("html", 0.33),
        ("css", 0.30),
    ]
    .iter()
    .map(|(ext, m)| ((*ext).to_string(), *m))
    .collect()
}
