// src/graph/mod.rs
pub mod builder;
pub mod centrality;
pub mod imports;
pub mod resolver;

pub use builder::GraphBuilder;
pub use centrality::CentralityRanker;
pub use resolver::ModuleIndex;

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::source::SourceFile;

/// Directed "file A depends on file B" graph.
///
/// Keys are files with at least one resolved import. Every key and target
/// is a path from the input set; a file that is only ever imported appears
/// as a target alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DependencyGraph {
    edges: BTreeMap<String, BTreeSet<String>>,
}

impl DependencyGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_edge(&mut self, from: &str, to: &str) {
        self.edges
            .entry(from.to_string())
            .or_default()
            .insert(to.to_string());
    }

    #[must_use]
    pub fn edges(&self) -> &BTreeMap<String, BTreeSet<String>> {
        &self.edges
    }

    /// Files `path` imports, sorted.
    #[must_use]
    pub fn dependencies(&self, path: &str) -> Vec<&str> {
        self.edges
            .get(path)
            .map(|t| t.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Files importing `path`, sorted.
    #[must_use]
    pub fn dependents(&self, path: &str) -> Vec<&str> {
        self.edges
            .iter()
            .filter(|(_, targets)| targets.contains(path))
            .map(|(source, _)| source.as_str())
            .collect()
    }

    #[must_use]
    pub fn in_degree(&self, path: &str) -> usize {
        self.edges.values().filter(|t| t.contains(path)).count()
    }

    #[must_use]
    pub fn out_degree(&self, path: &str) -> usize {
        self.edges.get(path).map_or(0, BTreeSet::len)
    }

    /// Every path that is a source or a target of some edge.
    #[must_use]
    pub fn nodes(&self) -> BTreeSet<&str> {
        let mut nodes = BTreeSet::new();
        for (source, targets) in &self.edges {
            nodes.insert(source.as_str());
            nodes.extend(targets.iter().map(String::as_str));
        }
        nodes
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.values().map(BTreeSet::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

/// Graph plus the rankings derived from it.
#[derive(Debug, Clone, Default)]
pub struct DependencyAnalysis {
    pub graph: DependencyGraph,
    pub centrality: BTreeMap<String, usize>,
    /// Every ranked path, most important first.
    pub important_files: Vec<String>,
}

/// Orchestrates graph construction and ranking.
pub struct GraphEngine;

impl GraphEngine {
    #[must_use]
    pub fn analyze(files: &[SourceFile]) -> DependencyAnalysis {
        let graph = GraphBuilder::build(files);
        let ranked = CentralityRanker::ranked(&graph);
        let centrality = ranked.iter().cloned().collect();
        let important_files = ranked.into_iter().map(|(p, _)| p).collect();
        DependencyAnalysis {
            graph,
            centrality,
            important_files,
        }
    }
}
