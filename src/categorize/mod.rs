// src/categorize/mod.rs
//! Rule-based assignment of files to assessment categories.
//!
//! Categories are independent: a file is tested against every rule and may
//! belong to any number of them.

pub mod defs;
pub mod registry;
pub mod rules;

pub use defs::{builtin_defs, CategoryDef, CategoryKind};
pub use registry::CategoryRegistry;
pub use rules::CategoryRule;

use indexmap::IndexMap;
use rayon::prelude::*;

use crate::source::SourceFile;

/// Applies a [`CategoryRegistry`] to a file set.
pub struct FileCategorizer<'r> {
    registry: &'r CategoryRegistry,
}

impl<'r> FileCategorizer<'r> {
    #[must_use]
    pub fn new(registry: &'r CategoryRegistry) -> Self {
        Self { registry }
    }

    /// Member indices per category, keyed in registry order, members in
    /// input order. Every category is present, possibly empty.
    #[must_use]
    pub fn categorize_indices(&self, files: &[SourceFile]) -> IndexMap<String, Vec<usize>> {
        let membership: Vec<Vec<bool>> = files
            .par_iter()
            .map(|file| self.registry.iter().map(|rule| rule.matches(file)).collect())
            .collect();

        let mut out: IndexMap<String, Vec<usize>> = self
            .registry
            .ids()
            .map(|id| (id.to_string(), Vec::new()))
            .collect();
        for (idx, flags) in membership.iter().enumerate() {
            for (members, hit) in out.values_mut().zip(flags) {
                if *hit {
                    members.push(idx);
                }
            }
        }

        for (id, members) in &out {
            tracing::debug!(category = %id, files = members.len(), "categorized");
        }
        out
    }

    /// Member files per category.
    #[must_use]
    pub fn categorize<'f>(&self, files: &'f [SourceFile]) -> IndexMap<String, Vec<&'f SourceFile>> {
        self.categorize_indices(files)
            .into_iter()
            .map(|(id, idx)| (id, idx.into_iter().map(|i| &files[i]).collect()))
            .collect()
    }
}
