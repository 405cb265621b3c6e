// src/graph/builder.rs
//! Graph construction: module indexing, import extraction, resolution.

use std::collections::BTreeSet;

use rayon::prelude::*;

use super::imports;
use super::resolver::ModuleIndex;
use super::DependencyGraph;
use crate::source::SourceFile;

/// Builds a file-level dependency graph from source files.
pub struct GraphBuilder;

impl GraphBuilder {
    /// Extracts and resolves every file's imports.
    ///
    /// Extraction runs in parallel against the shared read-only index; the
    /// per-file edge sets are merged afterwards in input order.
    #[must_use]
    pub fn build(files: &[SourceFile]) -> DependencyGraph {
        let index = ModuleIndex::build(files);

        let per_file: Vec<(&str, BTreeSet<String>)> = files
            .par_iter()
            .map(|file| (file.path.as_str(), resolve_file(&index, file)))
            .collect();

        let mut graph = DependencyGraph::new();
        for (path, targets) in per_file {
            for target in targets {
                graph.add_edge(path, &target);
            }
        }

        tracing::info!(
            files = files.len(),
            edges = graph.edge_count(),
            "built dependency graph"
        );
        graph
    }
}

fn resolve_file(index: &ModuleIndex, file: &SourceFile) -> BTreeSet<String> {
    let mut targets = BTreeSet::new();
    for import in imports::extract(&file.path, &file.content) {
        match index.resolve(&file.path, &import) {
            Some(target) => {
                targets.insert(target);
            }
            None => tracing::trace!(file = %file.path, import = %import, "unresolved import"),
        }
    }
    targets
}

#[cfg(test)]
mod tests {
    use super::*;

    fn files(pairs: &[(&str, &str)]) -> Vec<SourceFile> {
        pairs.iter().map(|(p, c)| SourceFile::new(*p, *c)).collect()
    }

    #[test]
    fn python_exact_module_edge() {
        let g = GraphBuilder::build(&files(&[("a.py", "import b"), ("b.py", "")]));
        assert_eq!(g.dependencies("a.py"), vec!["b.py"]);
        assert!(g.dependencies("b.py").is_empty());
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn stdlib_imports_create_no_edges() {
        let g = GraphBuilder::build(&files(&[
            ("os.py", ""),
            ("main.py", "import os\nimport json"),
        ]));
        assert!(g.is_empty());
    }

    #[test]
    fn unresolvable_imports_are_dropped() {
        let g = GraphBuilder::build(&files(&[("app.js", "import x from './nowhere';")]));
        assert!(g.is_empty());
    }

    #[test]
    fn self_import_is_kept_as_loop() {
        let g = GraphBuilder::build(&files(&[("a.py", "import a")]));
        assert_eq!(g.dependencies("a.py"), vec!["a.py"]);
    }

    #[test]
    fn unsupported_files_still_receive_edges() {
        let g = GraphBuilder::build(&files(&[
            ("src/app.ts", "import './theme.css';"),
            ("src/theme.css", "body {}"),
        ]));
        assert_eq!(g.dependents("src/theme.css"), vec!["src/app.ts"]);
    }
}
