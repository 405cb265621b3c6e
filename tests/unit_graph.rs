// tests/unit_graph.rs
//! Import extraction, resolution and centrality across languages.

use repoaudit_core::graph::{imports, CentralityRanker, GraphBuilder, GraphEngine};
use repoaudit_core::SourceFile;

fn files(pairs: &[(&str, &str)]) -> Vec<SourceFile> {
    pairs.iter().map(|(p, c)| SourceFile::new(*p, *c)).collect()
}

#[test]
fn test_rust_use_and_mod_extraction() {
    let content = r"
use std::collections::HashMap;
use crate::config::Config;
pub(crate) use super::types::Violation;
mod analysis;
";
    let found = imports::extract("src/lib.rs", content);
    assert!(found.contains(&"crate::config::Config".to_string()));
    assert!(found.contains(&"super::types::Violation".to_string()));
    assert!(found.contains(&"self::analysis".to_string()));
    assert!(
        !found.iter().any(|i| i.starts_with("std")),
        "std imports must be filtered"
    );
}

#[test]
fn test_python_builtins_filtered() {
    let found = imports::extract("main.py", "import os, sys\nimport app.models\nfrom json import dumps\n");
    assert_eq!(found, vec!["app.models"]);
}

#[test]
fn test_js_forms() {
    let content = r#"
import React from 'react';
import './styles.css';
export { x } from "./x";
const fs = require('fs');
const util = require('./util');
const lazy = import('./lazy');
"#;
    let found = imports::extract("src/index.js", content);
    assert_eq!(found, vec!["react", "./x", "./styles.css", "./util", "./lazy"]);
}

#[test]
fn test_unsupported_extension_yields_nothing() {
    assert!(imports::extract("README.md", "import foo").is_empty());
}

#[test]
fn test_scenario_python_pair() {
    let analysis = GraphEngine::analyze(&files(&[("a.py", "import b"), ("b.py", "")]));
    assert_eq!(analysis.graph.dependencies("a.py"), vec!["b.py"]);
    assert_eq!(analysis.centrality["b.py"], 2);
    assert_eq!(analysis.centrality["a.py"], 1);
    assert_eq!(analysis.important_files, vec!["b.py", "a.py"]);
}

#[test]
fn test_edges_only_point_at_input_files() {
    let input = files(&[
        ("src/app.ts", "import { x } from './lib';\nimport y from 'lodash';\nimport z from '../outside';"),
        ("src/lib/index.ts", "export const x = 1;"),
        ("tools/run.py", "import os\nimport missing.module\nfrom src import app"),
    ]);
    let graph = GraphBuilder::build(&input);
    let paths: Vec<_> = input.iter().map(|f| f.path.as_str()).collect();
    for (source, targets) in graph.edges() {
        assert!(paths.contains(&source.as_str()));
        for t in targets {
            assert!(paths.contains(&t.as_str()), "dangling edge to {t}");
        }
    }
    assert_eq!(graph.dependencies("src/app.ts"), vec!["src/lib/index.ts"]);
}

#[test]
fn test_rust_crate_graph() {
    let input = files(&[
        ("src/main.rs", "mod config;\nmod graph;\nuse crate::graph::rank;\nfn main() {}"),
        ("src/config.rs", "use crate::graph::GraphEngine;"),
        ("src/graph/mod.rs", "pub mod rank;"),
        ("src/graph/rank.rs", "use super::GraphEngine;"),
    ]);
    let graph = GraphBuilder::build(&input);
    assert_eq!(
        graph.dependencies("src/main.rs"),
        vec!["src/config.rs", "src/graph/mod.rs", "src/graph/rank.rs"]
    );
    assert_eq!(graph.dependencies("src/graph/rank.rs"), vec!["src/graph/mod.rs"]);
    let ranked = CentralityRanker::rank(&graph);
    assert_eq!(ranked[0], "src/graph/mod.rs");
}

#[test]
fn test_isolated_node_scores_zero() {
    let graph = GraphBuilder::build(&files(&[("a.py", "import b"), ("b.py", ""), ("c.py", "")]));
    assert_eq!(CentralityRanker::score(&graph, "c.py"), 0);
    assert!(!CentralityRanker::rank(&graph).contains(&"c.py".to_string()));
}

#[test]
fn test_self_import_is_a_loop() {
    let graph = GraphBuilder::build(&files(&[("a.py", "import a"), ("b.py", "import a")]));
    assert_eq!(graph.dependencies("a.py"), vec!["a.py"]);
    assert_eq!(graph.dependents("a.py"), vec!["a.py", "b.py"]);
    assert_eq!(CentralityRanker::score(&graph, "a.py"), 5);
}
