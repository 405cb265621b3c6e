// src/analyzer/types.rs
//! Serializable analysis results.

use std::collections::{BTreeMap, HashSet};

use indexmap::IndexMap;
use serde::Serialize;

use crate::classify::{BoilerplateAnalysis, Classification, ClassificationCounts};
use crate::config::SelectionConfig;
use crate::error::{AuditError, Result};
use crate::graph::DependencyGraph;
use crate::select::{FileSelector, SelectedFile, SelectionStrategy};
use crate::source::SourceFile;

pub const EMPTY_REPOSITORY: &str = "Repository is empty";

/// Result of one analysis run.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum AnalysisOutcome {
    /// No files; nothing downstream ran.
    Empty(EmptyRepository),
    Complete(Box<RepoAnalysis>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmptyRepository {
    pub file_count: usize,
    pub error: String,
}

impl AnalysisOutcome {
    #[must_use]
    pub fn empty() -> Self {
        Self::Empty(EmptyRepository {
            file_count: 0,
            error: EMPTY_REPOSITORY.to_string(),
        })
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty(_))
    }

    #[must_use]
    pub fn file_count(&self) -> usize {
        match self {
            Self::Empty(e) => e.file_count,
            Self::Complete(a) => a.file_count,
        }
    }

    #[must_use]
    pub fn as_complete(&self) -> Option<&RepoAnalysis> {
        match self {
            Self::Empty(_) => None,
            Self::Complete(a) => Some(a),
        }
    }
}

/// Ranking and graph figures exposed in the report.
#[derive(Debug, Clone, Serialize)]
pub struct DependencySummary {
    /// Top of the global ranking.
    pub important_files: Vec<String>,
    pub centrality: BTreeMap<String, usize>,
    pub edge_count: usize,
}

/// Repository-wide aggregate.
#[derive(Debug, Clone, Serialize)]
pub struct RepoSummary {
    pub file_count: usize,
    /// `(".ext", count)`, most common first.
    pub top_file_types: Vec<(String, usize)>,
    /// `(directory, count)`, most populated first; the root is `"."`.
    pub top_directories: Vec<(String, usize)>,
    /// Share of custom files, in percent.
    pub custom_code_percentage: f64,
    pub third_party_technologies: IndexMap<String, Vec<String>>,
    pub category_stats: IndexMap<String, usize>,
}

/// Per-category aggregate; only produced for non-empty categories.
#[derive(Debug, Clone, Serialize)]
pub struct CategorySummary {
    pub file_count: usize,
    pub important_files: Vec<String>,
    pub classifications: ClassificationCounts,
    /// Share of custom files among members, in percent.
    pub custom_percentage: f64,
    pub technologies: Vec<String>,
}

/// A complete analysis of a non-empty repository.
#[derive(Debug, Clone, Serialize)]
pub struct RepoAnalysis {
    pub file_count: usize,
    pub categorized_files: IndexMap<String, Vec<String>>,
    pub dependency_analysis: DependencySummary,
    pub boilerplate_analysis: BoilerplateAnalysis,
    pub summary: RepoSummary,
    pub file_summaries: IndexMap<String, CategorySummary>,

    #[serde(skip)]
    pub(crate) files: Vec<SourceFile>,
    #[serde(skip)]
    pub(crate) classifications: Vec<Classification>,
    #[serde(skip)]
    pub(crate) members: IndexMap<String, Vec<usize>>,
    #[serde(skip)]
    pub(crate) strategies: IndexMap<String, SelectionStrategy>,
    #[serde(skip)]
    pub(crate) ranking: Vec<String>,
    #[serde(skip)]
    pub(crate) graph: DependencyGraph,
}

impl RepoAnalysis {
    #[must_use]
    pub fn files(&self) -> &[SourceFile] {
        &self.files
    }

    #[must_use]
    pub fn graph(&self) -> &DependencyGraph {
        &self.graph
    }

    /// Every ranked path, most important first.
    #[must_use]
    pub fn ranking(&self) -> &[String] {
        &self.ranking
    }

    /// Provenance label of `path`, if it was analyzed.
    #[must_use]
    pub fn classification(&self, path: &str) -> Option<Classification> {
        self.files
            .iter()
            .position(|f| f.path == path)
            .map(|i| self.classifications[i])
    }

    /// Member files of a category, in input order.
    #[must_use]
    pub fn members(&self, category_id: &str) -> Option<Vec<&SourceFile>> {
        self.members
            .get(category_id)
            .map(|idx| idx.iter().map(|&i| &self.files[i]).collect())
    }

    /// Runs the budgeted selector over a category's members.
    ///
    /// # Errors
    /// Returns `UnknownCategory` if the category was not part of the analysis.
    pub fn select(&self, category_id: &str, config: &SelectionConfig) -> Result<Vec<SelectedFile>> {
        let candidates = self
            .members(category_id)
            .ok_or_else(|| AuditError::UnknownCategory(category_id.to_string()))?;
        let strategy = self
            .strategies
            .get(category_id)
            .copied()
            .unwrap_or_default();
        let selector = FileSelector::new(config)
            .with_important_files(&self.ranking)
            .with_strategy(strategy);
        Ok(selector.select(&candidates, &config.budget()))
    }

    /// Paths of a category's members, for membership tests.
    pub(crate) fn member_paths(&self, category_id: &str) -> HashSet<&str> {
        self.members
            .get(category_id)
            .map(|idx| idx.iter().map(|&i| self.files[i].path.as_str()).collect())
            .unwrap_or_default()
    }
}
