// src/categorize/registry.rs
//! The validated, ordered set of categories used for one analysis.

use std::collections::HashSet;

use super::defs::{builtin_defs, CategoryDef};
use super::rules::CategoryRule;
use crate::error::{AuditError, Result};

/// Ordered category rules. Built once, read-only afterwards.
#[derive(Debug)]
pub struct CategoryRegistry {
    rules: Vec<CategoryRule>,
}

impl CategoryRegistry {
    /// The built-in categories.
    ///
    /// # Panics
    /// Panics if a built-in definition is malformed.
    #[must_use]
    pub fn builtin() -> Self {
        Self::from_defs(builtin_defs())
            .unwrap_or_else(|e| panic!("Invalid built-in category: {e}"))
    }

    /// Compiles `defs` in order.
    ///
    /// # Errors
    /// Returns `InvalidCategory` for a duplicate id or any definition that
    /// fails validation.
    pub fn from_defs(defs: Vec<CategoryDef>) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut rules = Vec::with_capacity(defs.len());
        for def in defs {
            if !seen.insert(def.id.clone()) {
                return Err(AuditError::category(&def.id, "duplicate category id"));
            }
            rules.push(CategoryRule::compile(def)?);
        }
        Ok(Self { rules })
    }

    /// Built-ins with `overrides` applied: a definition whose id already
    /// exists replaces it in place, any other is appended.
    ///
    /// # Errors
    /// Returns `InvalidCategory` if the merged set fails validation.
    pub fn with_overrides(overrides: &[CategoryDef]) -> Result<Self> {
        let mut defs = builtin_defs();
        let mut appended: Vec<CategoryDef> = Vec::new();
        for def in overrides {
            if let Some(slot) = defs.iter_mut().find(|d| d.id == def.id) {
                *slot = def.clone();
            } else {
                appended.push(def.clone());
            }
        }
        defs.extend(appended);
        Self::from_defs(defs)
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&CategoryRule> {
        self.rules.iter().find(|r| r.id() == id)
    }

    /// Looks up `id`.
    ///
    /// # Errors
    /// Returns `UnknownCategory` when no such category exists.
    pub fn require(&self, id: &str) -> Result<&CategoryRule> {
        self.get(id)
            .ok_or_else(|| AuditError::UnknownCategory(id.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryRule> {
        self.rules.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(CategoryRule::id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for CategoryRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
