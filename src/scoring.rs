// src/scoring.rs
//! The seam between analysis and an external scorer.
//!
//! A category is processed by selecting its files, rendering a prompt and
//! asking a [`Scorer`] once. The scorer itself lives outside this crate.

use std::fmt::Write;

use serde::{Deserialize, Serialize};

use crate::analyzer::RepoAnalysis;
use crate::categorize::CategoryDef;
use crate::config::SelectionConfig;
use crate::error::{AuditError, Result};
use crate::select::SelectedFile;

pub const FILES_PLACEHOLDER: &str = "{FILES_CONTENT}";
pub const SUMMARY_PLACEHOLDER: &str = "{REPO_SUMMARY}";
pub const CATEGORY_PLACEHOLDER: &str = "{CATEGORY}";

const DEFAULT_TEMPLATE: &str = "\
Assess the repository for the category \"{CATEGORY}\".

Repository summary:
{REPO_SUMMARY}

Selected files:
{FILES_CONTENT}
Respond with a score and feedback.
";

/// Raw answer from a scorer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub score: i64,
    pub feedback: String,
}

/// Anything that turns a prompt into a score.
pub trait Scorer {
    /// # Errors
    /// Returns error if scoring fails; the category is then not scored.
    fn score(&self, prompt: &str) -> Result<ScoreResult>;
}

impl<F> Scorer for F
where
    F: Fn(&str) -> Result<ScoreResult>,
{
    fn score(&self, prompt: &str) -> Result<ScoreResult> {
        self(prompt)
    }
}

/// Final, bounded score for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryScore {
    pub category: String,
    pub name: String,
    pub score: u32,
    pub max_points: u32,
    pub feedback: String,
    pub files: Vec<String>,
}

/// Generic processing for any data-driven category.
pub struct CategoryProcessor;

impl CategoryProcessor {
    /// Selects, renders, scores once and clamps to `0..=max_points`.
    ///
    /// # Errors
    /// Returns `UnknownCategory` if `def` was not part of the analysis, or
    /// whatever the scorer or summary serialization reports.
    pub fn process(
        def: &CategoryDef,
        analysis: &RepoAnalysis,
        selection: &SelectionConfig,
        scorer: &dyn Scorer,
    ) -> Result<CategoryScore> {
        tracing::info!(category = %def.id, "processing category");
        let selected = analysis.select(&def.id, selection)?;
        let prompt = Self::render_prompt(def, analysis, &selected)?;
        let result = scorer
            .score(&prompt)
            .map_err(|e| AuditError::Scorer(format!("{}: {e}", def.id)))?;

        Ok(CategoryScore {
            category: def.id.clone(),
            name: def.display_name().to_string(),
            score: clamp_score(result.score, def.max_points),
            max_points: def.max_points,
            feedback: result.feedback,
            files: selected.into_iter().map(|s| s.path).collect(),
        })
    }

    /// Fills the category's template, or the default one.
    ///
    /// # Errors
    /// Returns `Json` if the summary cannot be serialized.
    pub fn render_prompt(
        def: &CategoryDef,
        analysis: &RepoAnalysis,
        selected: &[SelectedFile],
    ) -> Result<String> {
        let template = def.prompt_template.as_deref().unwrap_or(DEFAULT_TEMPLATE);
        let summary = serde_json::to_string_pretty(&analysis.summary)?;
        Ok(template
            .replace(FILES_PLACEHOLDER, &format_files(selected))
            .replace(SUMMARY_PLACEHOLDER, &summary)
            .replace(CATEGORY_PLACEHOLDER, def.display_name()))
    }
}

fn format_files(selected: &[SelectedFile]) -> String {
    let mut out = String::new();
    for file in selected {
        let _ = writeln!(out, "File: {}\n\n```\n{}\n```", file.path, file.content);
    }
    out
}

fn clamp_score(raw: i64, max_points: u32) -> u32 {
    u32::try_from(raw.clamp(0, i64::from(max_points))).unwrap_or(0)
}
