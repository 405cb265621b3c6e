// src/analyzer/summary.rs
//! Repository-wide and per-category aggregates.

use std::collections::{BTreeMap, HashSet};

use indexmap::IndexMap;

use super::types::{CategorySummary, RepoSummary};
use crate::classify::{BoilerplateAnalysis, Classification, ClassificationCounts};
use crate::config::AnalysisConfig;
use crate::source::{extension_of, SourceFile};

/// Label used for files without an extension.
const NO_EXTENSION: &str = "(none)";
const ROOT_DIR: &str = ".";

pub(crate) fn repo_summary(
    files: &[SourceFile],
    classifications: &[Classification],
    boilerplate: &BoilerplateAnalysis,
    members: &IndexMap<String, Vec<usize>>,
    config: &AnalysisConfig,
) -> RepoSummary {
    let types = files.iter().map(|f| match extension_of(&f.path) {
        ext if ext.is_empty() => NO_EXTENSION.to_string(),
        ext => format!(".{ext}"),
    });
    let dirs = files.iter().map(|f| match f.path.rfind('/') {
        Some(idx) => f.path[..idx].to_string(),
        None => ROOT_DIR.to_string(),
    });
    let counts: ClassificationCounts = classifications.iter().copied().collect();

    RepoSummary {
        file_count: files.len(),
        top_file_types: top_counts(types, config.top_entries),
        top_directories: top_counts(dirs, config.top_entries),
        custom_code_percentage: percent(&counts),
        third_party_technologies: boilerplate.third_party_summary.clone(),
        category_stats: members
            .iter()
            .map(|(id, m)| (id.clone(), m.len()))
            .collect(),
    }
}

pub(crate) fn category_summary(
    member_paths: &HashSet<&str>,
    member_classes: impl Iterator<Item = Classification>,
    ranking: &[String],
    boilerplate: &BoilerplateAnalysis,
    config: &AnalysisConfig,
) -> CategorySummary {
    let counts: ClassificationCounts = member_classes.collect();
    let important_files = ranking
        .iter()
        .filter(|p| member_paths.contains(p.as_str()))
        .take(config.category_top_files)
        .cloned()
        .collect();
    let technologies = boilerplate
        .detected()
        .filter(|d| d.matched_files.iter().any(|f| member_paths.contains(f.as_str())))
        .map(|d| format!("{}: {}", d.kind.display_prefix(), d.sdk_name))
        .collect();

    CategorySummary {
        file_count: counts.total(),
        important_files,
        classifications: counts,
        custom_percentage: percent(&counts),
        technologies,
    }
}

/// Count occurrences, most common first, ties by key.
fn top_counts(keys: impl Iterator<Item = String>, limit: usize) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for key in keys {
        *counts.entry(key).or_default() += 1;
    }
    let mut sorted: Vec<_> = counts.into_iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    sorted.truncate(limit);
    sorted
}

fn percent(counts: &ClassificationCounts) -> f64 {
    (counts.custom_ratio() * 10_000.0).round() / 100.0
}
