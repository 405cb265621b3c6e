// src/select/mod.rs
//! Budgeted file selection for one category.
//!
//! Passes, in order: important files from the global ranking, an
//! extension-proportional pass over size-diverse samples, a spill pass over
//! what the proportional pass left, and a single-file fallback.

pub mod budget;
pub mod sample;
pub mod truncate;

pub use budget::{Budget, BudgetSession, CostModel};
pub use truncate::truncate;

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap, HashSet};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::SelectionConfig;
use crate::source::SourceFile;

/// How a category prefers its files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionStrategy {
    /// Globally important files first, then the proportional passes.
    #[default]
    ImportanceFirst,
    /// Proportional passes only.
    SizeSpread,
}

/// Which pass picked a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectReason {
    Important,
    Proportional,
    Spill,
    Fallback,
}

/// A file chosen for forwarding, with the content actually forwarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectedFile {
    pub path: String,
    pub content: String,
    pub cost: i64,
    pub reason: SelectReason,
    pub truncated: bool,
}

struct Prepared<'a> {
    file: &'a SourceFile,
    forwarded: Cow<'a, str>,
    cost: i64,
}

/// Chooses which candidates to forward under a [`Budget`].
#[derive(Debug, Clone)]
pub struct FileSelector {
    important: Vec<String>,
    strategy: SelectionStrategy,
    important_cap: usize,
    max_files: usize,
    line_cap: usize,
    per_group_limit: usize,
}

impl FileSelector {
    #[must_use]
    pub fn new(config: &SelectionConfig) -> Self {
        Self {
            important: Vec::new(),
            strategy: SelectionStrategy::default(),
            important_cap: config.important_cap,
            max_files: config.max_files,
            line_cap: config.line_cap,
            per_group_limit: config.per_group_limit,
        }
    }

    /// Global ranking, most important first.
    #[must_use]
    pub fn with_important_files(mut self, ranked: &[String]) -> Self {
        self.important = ranked.to_vec();
        self
    }

    #[must_use]
    pub fn with_strategy(mut self, strategy: SelectionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Selects from `candidates` without exceeding `budget`, except for the
    /// single-file fallback when nothing fits.
    ///
    /// Empty candidates or a non-positive budget select nothing.
    #[must_use]
    pub fn select(&self, candidates: &[&SourceFile], budget: &Budget) -> Vec<SelectedFile> {
        if candidates.is_empty() || budget.max_total_units <= 0 {
            return Vec::new();
        }

        let prepared: Vec<Prepared> = candidates
            .par_iter()
            .map(|&file| {
                let forwarded = truncate(&file.content, self.line_cap);
                let cost = budget.cost.cost(&file.path, &forwarded);
                Prepared {
                    file,
                    forwarded,
                    cost,
                }
            })
            .collect();

        let mut run = Run {
            prepared: &prepared,
            session: budget.session(),
            taken: HashSet::new(),
            picked: Vec::new(),
            max_files: self.max_files,
        };

        if self.strategy == SelectionStrategy::ImportanceFirst {
            self.important_pass(&mut run);
        }
        let leftovers = self.proportional_pass(&mut run);
        for idx in leftovers {
            if run.full() {
                break;
            }
            run.try_take(idx, SelectReason::Spill);
        }
        if run.picked.is_empty() && self.max_files > 0 {
            run.fallback();
        }

        tracing::debug!(
            candidates = candidates.len(),
            selected = run.picked.len(),
            used = run.session.used(),
            "selection complete"
        );
        run.picked
    }

    fn important_pass(&self, run: &mut Run) {
        let prepared = run.prepared;
        let by_path: HashMap<&str, usize> = prepared
            .iter()
            .enumerate()
            .map(|(i, p)| (p.file.path.as_str(), i))
            .collect();

        // Only the head of the global ranking counts as important.
        for path in self.important.iter().take(self.important_cap) {
            if run.full() {
                break;
            }
            if let Some(&idx) = by_path.get(path.as_str()) {
                run.try_take(idx, SelectReason::Important);
            }
        }
    }

    /// Returns the sampled candidates the pass could not afford, in group order.
    fn proportional_pass(&self, run: &mut Run) -> Vec<usize> {
        let prepared = run.prepared;
        let mut groups: BTreeMap<String, Vec<usize>> = BTreeMap::new();
        for (idx, p) in prepared.iter().enumerate() {
            if !run.taken.contains(&idx) {
                groups.entry(p.file.extension()).or_default().push(idx);
            }
        }

        let size = |idx: usize| prepared[idx].file.content.len();
        let total_bytes: usize = groups.values().flatten().map(|&i| size(i)).sum();
        let available = run.session.remaining();

        let mut leftovers = Vec::new();
        for members in groups.values() {
            let group_bytes: usize = members.iter().map(|&i| size(i)).sum();
            let allocation = share(available, group_bytes, total_bytes);

            let sized: Vec<(&str, usize)> = members
                .iter()
                .map(|&i| (prepared[i].file.path.as_str(), size(i)))
                .collect();
            let mut spent = 0;
            for pos in sample::diverse_subset(&sized, self.per_group_limit) {
                let idx = members[pos];
                let cost = prepared[idx].cost;
                if !run.full()
                    && spent + cost <= allocation
                    && run.try_take(idx, SelectReason::Proportional)
                {
                    spent += cost;
                } else {
                    leftovers.push(idx);
                }
            }
        }
        leftovers
    }
}

/// `available × part / whole`, floored; zero when `whole` is zero.
#[allow(clippy::cast_possible_truncation)]
fn share(available: i64, part: usize, whole: usize) -> i64 {
    if whole == 0 {
        return 0;
    }
    (i128::from(available) * part as i128 / whole as i128) as i64
}

struct Run<'p, 'a> {
    prepared: &'p [Prepared<'a>],
    session: BudgetSession,
    taken: HashSet<usize>,
    picked: Vec<SelectedFile>,
    max_files: usize,
}

impl Run<'_, '_> {
    fn full(&self) -> bool {
        self.picked.len() >= self.max_files
    }

    fn try_take(&mut self, idx: usize, reason: SelectReason) -> bool {
        if self.taken.contains(&idx) || !self.session.try_consume(self.prepared[idx].cost) {
            return false;
        }
        self.push(idx, reason);
        true
    }

    fn push(&mut self, idx: usize, reason: SelectReason) {
        let p = &self.prepared[idx];
        self.taken.insert(idx);
        self.picked.push(SelectedFile {
            path: p.file.path.clone(),
            content: p.forwarded.to_string(),
            cost: p.cost,
            reason,
            truncated: matches!(p.forwarded, Cow::Owned(_)),
        });
    }

    /// Forces in the smallest candidate, ties by path.
    fn fallback(&mut self) {
        let smallest = (0..self.prepared.len()).min_by(|&a, &b| {
            let (pa, pb) = (&self.prepared[a], &self.prepared[b]);
            pa.file
                .content
                .len()
                .cmp(&pb.file.content.len())
                .then_with(|| pa.file.path.cmp(&pb.file.path))
        });
        if let Some(idx) = smallest {
            tracing::debug!(path = %self.prepared[idx].file.path, "nothing fit; falling back");
            self.session.force(self.prepared[idx].cost);
            self.push(idx, SelectReason::Fallback);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selector() -> FileSelector {
        FileSelector::new(&SelectionConfig::default())
    }

    fn flat(units: i64) -> Budget {
        Budget::new(units, CostModel::Flat(0.25))
    }

    #[test]
    fn small_files_fit_large_one_never_does() {
        let files = [
            SourceFile::new("big.txt", "x".repeat(100_000)),
            SourceFile::new("mid.txt", "x".repeat(50)),
            SourceFile::new("small.txt", "x".repeat(20)),
        ];
        let refs: Vec<_> = files.iter().collect();
        let picked = selector().select(&refs, &flat(60));
        let paths: Vec<_> = picked.iter().map(|s| s.path.as_str()).collect();
        assert_eq!(paths, vec!["small.txt", "mid.txt"]);
        assert!(picked.iter().all(|s| s.reason != SelectReason::Fallback));
        assert_eq!(picked.iter().map(|s| s.cost).sum::<i64>(), 18);
    }

    #[test]
    fn fallback_takes_smallest_when_nothing_fits() {
        let files = [
            SourceFile::new("a.txt", "x".repeat(1000)),
            SourceFile::new("b.txt", "x".repeat(400)),
        ];
        let refs: Vec<_> = files.iter().collect();
        let picked = selector().select(&refs, &flat(10));
        assert_eq!(picked.len(), 1);
        assert_eq!(picked[0].path, "b.txt");
        assert_eq!(picked[0].reason, SelectReason::Fallback);
    }

    #[test]
    fn empty_candidates_and_zero_budget_select_nothing() {
        assert!(selector().select(&[], &flat(100)).is_empty());
        let file = SourceFile::new("a.py", "pass");
        assert!(selector().select(&[&file], &flat(0)).is_empty());
        assert!(selector().select(&[&file], &flat(-5)).is_empty());
    }

    #[test]
    fn important_files_go_first() {
        let files = [
            SourceFile::new("a.py", "x".repeat(40)),
            SourceFile::new("core.py", "x".repeat(40)),
        ];
        let refs: Vec<_> = files.iter().collect();
        let picked = selector()
            .with_important_files(&["core.py".to_string()])
            .select(&refs, &flat(100));
        assert_eq!(picked[0].path, "core.py");
        assert_eq!(picked[0].reason, SelectReason::Important);
        assert_eq!(picked.len(), 2);
    }

    #[test]
    fn size_spread_ignores_ranking() {
        let files = [SourceFile::new("core.py", "x".repeat(40))];
        let refs: Vec<_> = files.iter().collect();
        let picked = selector()
            .with_important_files(&["core.py".to_string()])
            .with_strategy(SelectionStrategy::SizeSpread)
            .select(&refs, &flat(100));
        assert_eq!(picked[0].reason, SelectReason::Proportional);
    }

    #[test]
    fn importance_is_limited_to_top_of_ranking() {
        let ranked: Vec<String> = (0..10).map(|i| format!("f{i}.py")).collect();
        let file = SourceFile::new("f9.py", "x".repeat(40));
        let picked = selector()
            .with_important_files(&ranked)
            .select(&[&file], &flat(100));
        assert_eq!(picked.len(), 1);
        assert_eq!(picked[0].reason, SelectReason::Proportional);
    }

    #[test]
    fn spill_uses_rounding_leftovers() {
        let files = [
            SourceFile::new("big.rs", "x".repeat(10_000)),
            SourceFile::new("tiny.md", "x".repeat(8)),
        ];
        let refs: Vec<_> = files.iter().collect();
        // tiny.md's proportional share floors to zero
        let picked = selector().select(&refs, &flat(100));
        let tiny = picked.iter().find(|s| s.path == "tiny.md").unwrap();
        assert_eq!(tiny.reason, SelectReason::Spill);
    }

    #[test]
    fn max_files_caps_the_selection() {
        let files: Vec<_> = (0..30)
            .map(|i| SourceFile::new(format!("f{i}.js"), "x"))
            .collect();
        let refs: Vec<_> = files.iter().collect();
        let cfg = SelectionConfig {
            max_files: 4,
            per_group_limit: 30,
            ..SelectionConfig::default()
        };
        assert_eq!(FileSelector::new(&cfg).select(&refs, &flat(1000)).len(), 4);
    }

    #[test]
    fn zero_max_files_forces_nothing_in() {
        let file = SourceFile::new("a.txt", "x".repeat(1000));
        let cfg = SelectionConfig {
            max_files: 0,
            ..SelectionConfig::default()
        };
        assert!(FileSelector::new(&cfg).select(&[&file], &flat(10)).is_empty());
    }

    #[test]
    fn long_files_are_forwarded_truncated() {
        let long: String = (0..2000).map(|i| format!("l{i}\n")).collect();
        let files = [SourceFile::new("long.py", long)];
        let refs: Vec<_> = files.iter().collect();
        let picked = selector().select(&refs, &flat(100_000));
        assert!(picked[0].truncated);
        assert_eq!(picked[0].content.lines().count(), 400);
    }
}
