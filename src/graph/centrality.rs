// src/graph/centrality.rs
//! Degree centrality for file ranking.
//!
//! A file that many others import is structurally more important than one
//! that imports many others, so incoming edges weigh double:
//! `score = 2 × in_degree + out_degree`.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use super::DependencyGraph;

const IN_WEIGHT: usize = 2;
const OUT_WEIGHT: usize = 1;

/// Ranks graph nodes by weighted degree.
pub struct CentralityRanker;

impl CentralityRanker {
    /// Scores every node that appears in the graph, as a source or a target.
    #[must_use]
    pub fn scores(graph: &DependencyGraph) -> BTreeMap<String, usize> {
        let mut scores: BTreeMap<String, usize> = BTreeMap::new();
        for (source, targets) in graph.edges() {
            *scores.entry(source.clone()).or_default() += OUT_WEIGHT * targets.len();
            for target in targets {
                *scores.entry(target.clone()).or_default() += IN_WEIGHT;
            }
        }
        scores
    }

    /// Score of a single path; files absent from the graph score zero.
    #[must_use]
    pub fn score(graph: &DependencyGraph, path: &str) -> usize {
        IN_WEIGHT * graph.in_degree(path) + OUT_WEIGHT * graph.out_degree(path)
    }

    /// Returns `(path, score)` pairs, highest score first, ties by path.
    #[must_use]
    pub fn ranked(graph: &DependencyGraph) -> Vec<(String, usize)> {
        let mut ranked: Vec<_> = Self::scores(graph).into_iter().collect();
        ranked.sort_by(compare);
        ranked
    }

    /// Returns paths, most important first.
    #[must_use]
    pub fn rank(graph: &DependencyGraph) -> Vec<String> {
        Self::ranked(graph).into_iter().map(|(p, _)| p).collect()
    }
}

fn compare(a: &(String, usize), b: &(String, usize)) -> Ordering {
    b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0))
}
