// src/graph/resolver.rs
//! Resolves raw import strings to in-repository file paths.
//!
//! Resolution only ever answers with a path that was present in the input
//! set; anything else is `None`.

use std::collections::{HashMap, HashSet};

use crate::lang::{Lang, INDEX_EXTENSIONS, RESOLVE_EXTENSIONS};
use crate::source::{extension_of, SourceFile};

/// Read-only lookup of module identifiers and file paths for one build.
#[derive(Debug, Default)]
pub struct ModuleIndex {
    by_module: HashMap<String, String>,
    paths: HashSet<String>,
}

impl ModuleIndex {
    /// Indexes every file under its canonical module identifier.
    /// When two files share an identifier the first one wins.
    #[must_use]
    pub fn build(files: &[SourceFile]) -> Self {
        let mut index = Self::default();
        for file in files {
            index.paths.insert(file.path.clone());
            index
                .by_module
                .entry(module_name(&file.path))
                .or_insert_with(|| file.path.clone());
        }
        index
    }

    #[must_use]
    pub fn lookup_module(&self, module: &str) -> Option<&str> {
        self.by_module.get(module).map(String::as_str)
    }

    /// Resolves `import` as written in `importer` to a concrete file.
    #[must_use]
    pub fn resolve(&self, importer: &str, import: &str) -> Option<String> {
        if let Some(hit) = self.lookup_module(import) {
            return Some(hit.to_string());
        }
        if import.starts_with("./") || import.starts_with("../") {
            return self.resolve_relative(importer, import);
        }
        let lang = Lang::from_ext(&extension_of(importer));
        match lang {
            Some(Lang::Python) if import.starts_with('.') => self.resolve_python_relative(importer, import),
            Some(Lang::Rust) => self.resolve_rust(importer, import),
            _ if import.contains('.') && !import.starts_with('.') => self.resolve_dotted(import),
            _ => None,
        }
    }

    fn first_existing<I>(&self, candidates: I) -> Option<String>
    where
        I: IntoIterator<Item = String>,
    {
        candidates.into_iter().find(|c| self.paths.contains(c))
    }

    fn resolve_relative(&self, importer: &str, import: &str) -> Option<String> {
        let base = normalize(&join(parent_dir(importer), import))?;
        if self.paths.contains(&base) {
            return Some(base);
        }
        if let Some(hit) = self.lookup_module(&base) {
            return Some(hit.to_string());
        }
        let with_ext = RESOLVE_EXTENSIONS.iter().map(|ext| format!("{base}.{ext}"));
        let index = INDEX_EXTENSIONS.iter().map(|ext| format!("{base}/index.{ext}"));
        let init = std::iter::once(format!("{base}/__init__.py"));
        self.first_existing(with_ext.chain(index).chain(init))
    }

    fn resolve_dotted(&self, import: &str) -> Option<String> {
        let path_form = import.replace('.', "/");
        self.first_existing([format!("{path_form}.py"), format!("{path_form}/__init__.py")])
    }

    fn resolve_python_relative(&self, importer: &str, import: &str) -> Option<String> {
        let levels = import.chars().take_while(|&c| c == '.').count();
        let suffix = &import[levels..];
        let mut base = parent_dir(importer).to_string();
        for _ in 1..levels {
            base = parent_dir(&base).to_string();
        }
        let base = if suffix.is_empty() {
            base
        } else {
            join(&base, &suffix.replace('.', "/"))
        };
        if base.is_empty() {
            return self.first_existing(["__init__.py".to_string()]);
        }
        self.first_existing([format!("{base}.py"), format!("{base}/__init__.py")])
    }

    fn resolve_rust(&self, importer: &str, import: &str) -> Option<String> {
        let mut segments: Vec<&str> = import.split("::").collect();
        let root = crate_root(importer);
        let anchored = matches!(segments.first().copied(), Some("crate" | "super"));
        let dir = match segments.first().copied() {
            Some("crate") => {
                segments.remove(0);
                root.clone()
            }
            Some("self") => {
                segments.remove(0);
                rust_module_dir(importer)
            }
            Some("super") => {
                let mut dir = rust_module_dir(importer);
                while segments.first() == Some(&"super") {
                    segments.remove(0);
                    dir = parent_dir(&dir).to_string();
                }
                dir
            }
            _ => root.clone(),
        };

        if segments.is_empty() {
            return self.rust_module_file(&dir, &root);
        }

        for k in (1..=segments.len()).rev() {
            let prefix = segments[..k].join("/");
            let candidate = join(&dir, &prefix);
            if let Some(hit) = self.first_existing([
                format!("{candidate}.rs"),
                format!("{candidate}/mod.rs"),
            ]) {
                return Some(hit);
            }
        }
        // `crate::Item`, `super::Item`: the item lives in the anchor module itself.
        // An item path that lands back on the importer names nothing new, so
        // it is not reported; a real self-import still resolves above.
        if anchored {
            return self
                .rust_module_file(&dir, &root)
                .filter(|hit| hit != importer);
        }
        None
    }

    fn rust_module_file(&self, dir: &str, root: &str) -> Option<String> {
        if dir == root {
            return self.first_existing([join(dir, "lib.rs"), join(dir, "main.rs")]);
        }
        self.first_existing([format!("{dir}.rs"), format!("{dir}/mod.rs")])
    }
}

/// Canonical module identifier of a path: extension stripped, and for
/// dotted-import languages path separators replaced by dots.
#[must_use]
pub fn module_name(path: &str) -> String {
    let ext = extension_of(path);
    let stem = if ext.is_empty() {
        path
    } else {
        &path[..path.len() - ext.len() - 1]
    };
    match Lang::from_ext(&ext) {
        Some(lang) if lang.dotted_modules() => stem.replace('/', "."),
        _ => stem.to_string(),
    }
}

fn parent_dir(path: &str) -> &str {
    path.rfind('/').map_or("", |idx| &path[..idx])
}

fn join(dir: &str, rel: &str) -> String {
    if dir.is_empty() {
        rel.to_string()
    } else {
        format!("{dir}/{rel}")
    }
}

/// Collapses `.` and `..` components. Escaping the repository root is `None`.
fn normalize(path: &str) -> Option<String> {
    let mut stack: Vec<&str> = Vec::new();
    for part in path.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                stack.pop()?;
            }
            _ => stack.push(part),
        }
    }
    Some(stack.join("/"))
}

/// Directory holding the children of the module defined by `path`.
fn rust_module_dir(path: &str) -> String {
    let parent = parent_dir(path);
    let name = path.rsplit('/').next().unwrap_or(path);
    match name {
        "lib.rs" | "main.rs" | "mod.rs" => parent.to_string(),
        _ => join(parent, name.trim_end_matches(".rs")),
    }
}

/// The nearest enclosing `src` directory, or the repository root.
fn crate_root(path: &str) -> String {
    let parts: Vec<&str> = path.split('/').collect();
    let dirs = &parts[..parts.len().saturating_sub(1)];
    match dirs.iter().rposition(|p| *p == "src") {
        Some(idx) => dirs[..=idx].join("/"),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index(paths: &[&str]) -> ModuleIndex {
        let files: Vec<_> = paths.iter().map(|p| SourceFile::new(*p, "")).collect();
        ModuleIndex::build(&files)
    }

    #[test]
    fn module_names_follow_language_convention() {
        assert_eq!(module_name("pkg/mod.py"), "pkg.mod");
        assert_eq!(module_name("src/utils.js"), "src/utils");
        assert_eq!(module_name("Makefile"), "Makefile");
    }

    #[test]
    fn exact_module_hit() {
        let idx = index(&["a.py", "b.py"]);
        assert_eq!(idx.resolve("a.py", "b").as_deref(), Some("b.py"));
    }

    #[test]
    fn relative_js_with_extension_and_index() {
        let idx = index(&["src/app.ts", "src/utils.ts", "src/components/index.tsx"]);
        assert_eq!(idx.resolve("src/app.ts", "./utils").as_deref(), Some("src/utils.ts"));
        assert_eq!(
            idx.resolve("src/app.ts", "./components").as_deref(),
            Some("src/components/index.tsx")
        );
        assert_eq!(idx.resolve("src/app.ts", "./missing"), None);
    }

    #[test]
    fn relative_escaping_root_is_unresolved() {
        let idx = index(&["a.js", "b.js"]);
        assert_eq!(idx.resolve("a.js", "../../b"), None);
    }

    #[test]
    fn dotted_python_package() {
        let idx = index(&["main.py", "app/models/__init__.py"]);
        assert_eq!(
            idx.resolve("main.py", "app.models").as_deref(),
            Some("app/models/__init__.py")
        );
    }

    #[test]
    fn python_relative_imports() {
        let idx = index(&["pkg/__init__.py", "pkg/a.py", "pkg/sub/b.py", "pkg/core.py"]);
        assert_eq!(idx.resolve("pkg/sub/b.py", "..core").as_deref(), Some("pkg/core.py"));
        assert_eq!(idx.resolve("pkg/a.py", ".").as_deref(), Some("pkg/__init__.py"));
    }

    #[test]
    fn rust_crate_self_and_super_paths() {
        let idx = index(&[
            "src/main.rs",
            "src/config.rs",
            "src/graph/mod.rs",
            "src/graph/imports.rs",
            "src/graph/rank.rs",
        ]);
        assert_eq!(
            idx.resolve("src/main.rs", "crate::config::Config").as_deref(),
            Some("src/config.rs")
        );
        assert_eq!(
            idx.resolve("src/graph/mod.rs", "self::imports").as_deref(),
            Some("src/graph/imports.rs")
        );
        assert_eq!(
            idx.resolve("src/graph/rank.rs", "super::imports::extract").as_deref(),
            Some("src/graph/imports.rs")
        );
        assert_eq!(idx.resolve("src/main.rs", "self::graph").as_deref(), Some("src/graph/mod.rs"));
        assert_eq!(idx.resolve("src/graph/imports.rs", "super").as_deref(), Some("src/graph/mod.rs"));
        assert_eq!(
            idx.resolve("src/graph/rank.rs", "super::GraphEngine").as_deref(),
            Some("src/graph/mod.rs")
        );
        assert_eq!(idx.resolve("src/config.rs", "crate::Result").as_deref(), Some("src/main.rs"));
        assert_eq!(idx.resolve("src/main.rs", "serde::Serialize"), None);
    }

    #[test]
    fn crate_root_finds_nearest_src() {
        assert_eq!(crate_root("crates/core/src/a/b.rs"), "crates/core/src");
        assert_eq!(crate_root("lib.rs"), "");
    }
}
