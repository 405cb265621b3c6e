// src/categorize/rules.rs
//! Compiled category rules.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

use super::defs::{CategoryDef, CategoryKind};
use crate::error::{AuditError, Result};
use crate::source::SourceFile;

static ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][a-z0-9_]*$").unwrap_or_else(|_| panic!("Invalid Regex")));

#[derive(Debug)]
enum Matcher {
    AllFiles,
    Rules {
        extensions: HashSet<String>,
        path: Vec<Regex>,
        content: Vec<Regex>,
        exclude: Vec<Regex>,
        filenames: HashSet<String>,
    },
    Docs {
        filenames: HashSet<String>,
        path: Vec<Regex>,
    },
}

/// A validated category with its patterns compiled.
#[derive(Debug)]
pub struct CategoryRule {
    def: CategoryDef,
    matcher: Matcher,
}

impl CategoryRule {
    /// Validates `def` and compiles its patterns.
    ///
    /// # Errors
    /// Returns `InvalidCategory` for a malformed id, a rule category with no
    /// extension or no include pattern, an out-of-range `max_points`, or a
    /// pattern that does not compile.
    pub fn compile(def: CategoryDef) -> Result<Self> {
        if !ID_RE.is_match(&def.id) {
            return Err(AuditError::category(
                &def.id,
                "id must match ^[a-z][a-z0-9_]*$",
            ));
        }
        if !(1..=100).contains(&def.max_points) {
            return Err(AuditError::category(&def.id, "max_points must be in 1..=100"));
        }

        let matcher = match def.kind {
            CategoryKind::AllFiles => Matcher::AllFiles,
            CategoryKind::Rules => {
                if def.extensions.is_empty() {
                    return Err(AuditError::category(&def.id, "at least one extension is required"));
                }
                if def.path_patterns.is_empty()
                    && def.content_patterns.is_empty()
                    && def.filenames.is_empty()
                {
                    return Err(AuditError::category(
                        &def.id,
                        "at least one path, content or filename pattern is required",
                    ));
                }
                Matcher::Rules {
                    extensions: def.extensions.iter().map(|e| normalize_ext(e)).collect(),
                    path: compile_all(&def.id, &def.path_patterns, false)?,
                    content: compile_all(&def.id, &def.content_patterns, false)?,
                    exclude: compile_all(&def.id, &def.exclude_patterns, false)?,
                    filenames: def.filenames.iter().cloned().collect(),
                }
            }
            CategoryKind::Docs => {
                if def.path_patterns.is_empty() && def.filenames.is_empty() {
                    return Err(AuditError::category(
                        &def.id,
                        "at least one path or filename pattern is required",
                    ));
                }
                Matcher::Docs {
                    filenames: def.filenames.iter().map(|f| f.to_lowercase()).collect(),
                    path: compile_all(&def.id, &def.path_patterns, true)?,
                }
            }
        };
        Ok(Self { def, matcher })
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.def.id
    }

    #[must_use]
    pub fn def(&self) -> &CategoryDef {
        &self.def
    }

    /// Whether `file` belongs to this category.
    #[must_use]
    pub fn matches(&self, file: &SourceFile) -> bool {
        match &self.matcher {
            Matcher::AllFiles => true,
            Matcher::Rules {
                extensions,
                path,
                content,
                exclude,
                filenames,
            } => {
                if !extensions.contains(&file.extension()) {
                    return false;
                }
                let included = path.iter().any(|re| re.is_match(&file.path))
                    || content.iter().any(|re| re.is_match(&file.content))
                    || filenames.contains(file.file_name());
                included && !exclude.iter().any(|re| re.is_match(&file.path))
            }
            Matcher::Docs { filenames, path } => {
                filenames.contains(&file.file_name().to_lowercase())
                    || path.iter().any(|re| re.is_match(&file.path))
            }
        }
    }
}

fn normalize_ext(ext: &str) -> String {
    ext.trim_start_matches('.').to_lowercase()
}

fn compile_all(id: &str, patterns: &[String], case_insensitive: bool) -> Result<Vec<Regex>> {
    patterns
        .iter()
        .map(|p| {
            RegexBuilder::new(p)
                .case_insensitive(case_insensitive)
                .build()
                .map_err(|e| AuditError::category(id, format!("bad pattern `{p}`: {e}")))
        })
        .collect()
}
