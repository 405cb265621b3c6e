// src/source.rs
//! Repository file sources.
//!
//! The engine consumes an ordered list of `(path, content)` pairs. Whoever
//! produces that list is responsible for ignore rules and binary exclusion;
//! [`DirSource`] is the on-disk implementation, [`MemorySource`] the in-memory
//! one used by embedders and tests.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use walkdir::{DirEntry, WalkDir};

use crate::config::ScanConfig;
use crate::error::{AuditError, Result};

/// One repository file: forward-slash relative path plus decoded text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    pub path: String,
    pub content: String,
}

impl SourceFile {
    #[must_use]
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: normalize_path(&path.into()),
            content: content.into(),
        }
    }

    /// Lowercase extension without the dot, empty when there is none.
    #[must_use]
    pub fn extension(&self) -> String {
        extension_of(&self.path)
    }

    /// Final path component.
    #[must_use]
    pub fn file_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }
}

/// Produces the file set for one analysis run.
pub trait FileSource {
    /// Returns every analyzable file, in a stable order.
    ///
    /// # Errors
    /// Returns error if the underlying storage cannot be enumerated.
    fn get_files(&self) -> Result<Vec<SourceFile>>;
}

/// Fixed, in-memory file list.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    files: Vec<SourceFile>,
}

impl MemorySource {
    #[must_use]
    pub fn new(files: Vec<SourceFile>) -> Self {
        Self { files }
    }

    /// Builds a source from borrowed `(path, content)` pairs.
    #[must_use]
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        Self::new(pairs.iter().map(|(p, c)| SourceFile::new(*p, *c)).collect())
    }
}

impl FileSource for MemorySource {
    fn get_files(&self) -> Result<Vec<SourceFile>> {
        Ok(self.files.clone())
    }
}

const EXCLUDED_FILES: &[&str] = &[".DS_Store", ".gitignore", ".gitattributes"];
const BINARY_SNIFF_BYTES: usize = 8192;

static BIN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\.(pyc|pyo|so|o|a|lib|dll|exe|bin|jpe?g|png|gif|bmp|svg|ico|mp3|mp4|wav|avi|mov|pdf|zip|gz|tar|wasm|woff2?|ttf)$",
    )
    .unwrap_or_else(|_| panic!("Invalid Regex"))
});

/// Walks a repository directory.
pub struct DirSource {
    root: std::path::PathBuf,
    scan: ScanConfig,
    exclude: Vec<Regex>,
}

impl DirSource {
    /// Creates a source rooted at `root`.
    ///
    /// # Errors
    /// Returns error if `root` is not a directory or an exclude regex is invalid.
    pub fn new(root: &Path, scan: &ScanConfig) -> Result<Self> {
        if !root.is_dir() {
            return Err(AuditError::io(
                std::io::Error::new(std::io::ErrorKind::NotFound, "repository path is not a directory"),
                root,
            ));
        }
        let exclude = scan
            .exclude
            .iter()
            .map(|p| Regex::new(p))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self {
            root: root.to_path_buf(),
            scan: scan.clone(),
            exclude,
        })
    }

    fn should_prune(&self, entry: &DirEntry) -> bool {
        entry.depth() > 0
            && entry.file_type().is_dir()
            && self
                .scan
                .prune_dirs
                .iter()
                .any(|d| entry.file_name().to_string_lossy() == d.as_str())
    }

    fn accept(&self, rel: &str, entry: &DirEntry) -> bool {
        let name = entry.file_name().to_string_lossy();
        if EXCLUDED_FILES.contains(&name.as_ref()) || BIN_RE.is_match(&name) {
            return false;
        }
        if self.exclude.iter().any(|re| re.is_match(rel)) {
            return false;
        }
        entry
            .metadata()
            .map(|m| m.len() <= self.scan.max_file_bytes)
            .unwrap_or(false)
    }
}

impl FileSource for DirSource {
    fn get_files(&self) -> Result<Vec<SourceFile>> {
        let walker = WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !self.should_prune(e));

        let mut files = Vec::new();
        let mut errors = 0usize;
        for item in walker {
            let entry = match item {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => return Err(e.into()),
                Err(_) => {
                    errors += 1;
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let rel = relative_path(&self.root, entry.path());
            if !self.accept(&rel, &entry) {
                continue;
            }
            if let Some(content) = read_text(entry.path()) {
                files.push(SourceFile::new(rel, content));
            }
        }

        if errors > 0 {
            tracing::warn!(errors, "encountered errors during file walk");
        }
        tracing::info!(count = files.len(), root = %self.root.display(), "collected files");
        Ok(files)
    }
}

/// Reads a file as text. Binary files yield `None`; unreadable ones yield
/// empty content so they still count towards totals.
fn read_text(path: &Path) -> Option<String> {
    match fs::read(path) {
        Ok(bytes) => {
            let sniff = &bytes[..bytes.len().min(BINARY_SNIFF_BYTES)];
            if sniff.contains(&0) {
                return None;
            }
            Some(String::from_utf8_lossy(&bytes).into_owned())
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "could not read file");
            Some(String::new())
        }
    }
}

fn relative_path(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    normalize_path(&rel.to_string_lossy())
}

/// Normalizes a path to forward slashes without a leading `./`.
#[must_use]
pub fn normalize_path(path: &str) -> String {
    let unified = path.replace('\\', "/");
    unified.trim_start_matches("./").to_string()
}

/// Lowercase extension of a forward-slash path, without the dot.
#[must_use]
pub fn extension_of(path: &str) -> String {
    let name = path.rsplit('/').next().unwrap_or(path);
    match name.rfind('.') {
        Some(idx) if idx > 0 => name[idx + 1..].to_ascii_lowercase(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_windows_separators() {
        let f = SourceFile::new(r"src\lib.rs", "");
        assert_eq!(f.path, "src/lib.rs");
        assert_eq!(f.file_name(), "lib.rs");
    }

    #[test]
    fn extension_handles_dotfiles_and_bare_names() {
        assert_eq!(extension_of("src/App.TSX"), "tsx");
        assert_eq!(extension_of(".eslintrc"), "");
        assert_eq!(extension_of("Makefile"), "");
        assert_eq!(extension_of("a.b/c"), "");
    }

    #[test]
    fn memory_source_preserves_order() {
        let src = MemorySource::from_pairs(&[("b.py", ""), ("a.py", "x")]);
        let files = src.get_files().unwrap();
        assert_eq!(files[0].path, "b.py");
        assert_eq!(files[1].content, "x");
    }
}
