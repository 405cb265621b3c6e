// src/analyzer/mod.rs
//! Orchestrates one repository analysis.
//!
//! Stages run strictly in sequence: collect, classify, categorize, build
//! the graph, rank, summarize. Stages may parallelize internally; their
//! outputs are order-stable.

pub mod summary;
pub mod types;

pub use types::{
    AnalysisOutcome, CategorySummary, DependencySummary, EmptyRepository, RepoAnalysis,
    RepoSummary, EMPTY_REPOSITORY,
};

use std::sync::OnceLock;

use indexmap::IndexMap;

use crate::categorize::{CategoryRegistry, FileCategorizer};
use crate::classify::BoilerplateClassifier;
use crate::config::{AnalysisConfig, Config};
use crate::error::Result;
use crate::graph::GraphEngine;
use crate::source::{FileSource, SourceFile};

/// Analyzer bound to one file source, typically one repository checkout.
pub struct RepoAnalyzer<S: FileSource> {
    source: S,
    config: Config,
    registry: CategoryRegistry,
    cached: OnceLock<AnalysisOutcome>,
}

impl<S: FileSource> RepoAnalyzer<S> {
    /// Builds the category registry from built-ins plus `config.categories`.
    ///
    /// # Errors
    /// Returns `InvalidCategory` if a configured category is malformed.
    pub fn new(source: S, config: Config) -> Result<Self> {
        let registry = CategoryRegistry::with_overrides(&config.categories)?;
        Ok(Self::with_registry(source, config, registry))
    }

    #[must_use]
    pub fn with_registry(source: S, config: Config, registry: CategoryRegistry) -> Self {
        Self {
            source,
            config,
            registry,
            cached: OnceLock::new(),
        }
    }

    #[must_use]
    pub fn registry(&self) -> &CategoryRegistry {
        &self.registry
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Collects files and runs a fresh analysis.
    ///
    /// # Errors
    /// Returns error only if the file source fails.
    pub fn analyze(&self) -> Result<AnalysisOutcome> {
        let files = self.source.get_files()?;
        tracing::info!(files = files.len(), "collected files");
        Ok(self.analyze_files(files))
    }

    /// The first successful analysis of this instance, computed on demand.
    ///
    /// # Errors
    /// Returns error if the file source fails; nothing is cached then.
    pub fn analysis(&self) -> Result<&AnalysisOutcome> {
        if let Some(done) = self.cached.get() {
            return Ok(done);
        }
        let outcome = self.analyze()?;
        Ok(self.cached.get_or_init(|| outcome))
    }

    /// Runs every stage over an already collected file set.
    #[must_use]
    pub fn analyze_files(&self, files: Vec<SourceFile>) -> AnalysisOutcome {
        if files.is_empty() {
            tracing::info!("repository is empty");
            return AnalysisOutcome::empty();
        }

        let classifications = BoilerplateClassifier::classify_all(&files);
        let boilerplate = BoilerplateClassifier::detect(&files);
        tracing::info!("completed boilerplate and third-party detection");

        let members = FileCategorizer::new(&self.registry).categorize_indices(&files);
        tracing::info!(categories = members.len(), "completed categorization");

        let deps = GraphEngine::analyze(&files);
        tracing::info!(
            nodes = deps.centrality.len(),
            edges = deps.graph.edge_count(),
            "completed dependency analysis"
        );

        let cfg = &self.config.analysis;
        let summary =
            summary::repo_summary(&files, &classifications, &boilerplate, &members, cfg);

        let mut analysis = RepoAnalysis {
            file_count: files.len(),
            categorized_files: members
                .iter()
                .map(|(id, idx)| (id.clone(), idx.iter().map(|&i| files[i].path.clone()).collect()))
                .collect(),
            dependency_analysis: DependencySummary {
                important_files: deps
                    .important_files
                    .iter()
                    .take(cfg.important_files_limit)
                    .cloned()
                    .collect(),
                centrality: deps.centrality,
                edge_count: deps.graph.edge_count(),
            },
            boilerplate_analysis: boilerplate,
            summary,
            file_summaries: IndexMap::new(),
            strategies: self
                .registry
                .iter()
                .map(|r| (r.id().to_string(), r.def().selection))
                .collect(),
            ranking: deps.important_files,
            graph: deps.graph,
            files,
            classifications,
            members,
        };
        analysis.file_summaries = file_summaries(&analysis, cfg);

        tracing::info!("repository analysis completed");
        AnalysisOutcome::Complete(Box::new(analysis))
    }
}

fn file_summaries(
    analysis: &RepoAnalysis,
    cfg: &AnalysisConfig,
) -> IndexMap<String, CategorySummary> {
    analysis
        .members
        .iter()
        .filter(|(_, idx)| !idx.is_empty())
        .map(|(id, idx)| {
            let summary = summary::category_summary(
                &analysis.member_paths(id),
                idx.iter().map(|&i| analysis.classifications[i]),
                &analysis.ranking,
                &analysis.boilerplate_analysis,
                cfg,
            );
            (id.clone(), summary)
        })
        .collect()
}
