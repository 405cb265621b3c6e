// tests/integration_analyzer.rs
//! End-to-end analysis over in-memory and on-disk repositories.

use std::cell::RefCell;
use std::fs;

use repoaudit_core::classify::Classification;
use repoaudit_core::config::{Config, SelectionConfig};
use repoaudit_core::scoring::{CategoryProcessor, ScoreResult};
use repoaudit_core::select::SelectReason;
use repoaudit_core::{
    AnalysisOutcome, AuditError, DirSource, FileSource, MemorySource, RepoAnalysis, RepoAnalyzer,
};

fn analyze(pairs: &[(&str, &str)]) -> AnalysisOutcome {
    RepoAnalyzer::new(MemorySource::from_pairs(pairs), Config::default())
        .unwrap()
        .analyze()
        .unwrap()
}

fn complete(outcome: &AnalysisOutcome) -> &RepoAnalysis {
    outcome.as_complete().expect("non-empty repository")
}

const SAMPLE_REPO: &[(&str, &str)] = &[
    ("README.md", "# Counter\nA NEAR counter."),
    ("contract/src/lib.rs", "use near_sdk::near;\nmod state;\n#[near(contract_state)]\npub struct Counter { n: u64 }"),
    ("contract/src/state.rs", "use crate::Counter;\npub fn bump(c: &mut Counter) { c.n += 1; }"),
    ("web/src/App.jsx", "import React, { useState } from 'react';\nimport { api } from './api';\nexport default function App() { return null; }"),
    ("web/src/api.js", "export const api = () => fetch('/api/count');"),
    ("web/node_modules/left-pad/index.js", "module.exports = function () {};"),
    ("docs/design.md", "# Design"),
    ("tsconfig.json", "{\"compilerOptions\": {}}"),
];

#[test]
fn test_python_pair_ranking() {
    let outcome = analyze(&[("a.py", "import b"), ("b.py", "")]);
    let analysis = complete(&outcome);
    let deps = &analysis.dependency_analysis;
    assert_eq!(deps.important_files, vec!["b.py", "a.py"]);
    assert_eq!(deps.centrality["b.py"], 2);
    assert_eq!(deps.centrality["a.py"], 1);
    assert_eq!(deps.edge_count, 1);
}

#[test]
fn test_contract_file_categories_and_provenance() {
    let outcome = analyze(&[("contract.rs", "#[near(contract_state)]\npub struct Contract {}")]);
    let analysis = complete(&outcome);

    assert_eq!(analysis.categorized_files["near_protocol_integration"], vec!["contract.rs"]);
    assert_eq!(analysis.categorized_files["onchain_quality"], vec!["contract.rs"]);
    assert!(analysis.categorized_files["offchain_quality"].is_empty());
    assert_eq!(analysis.classification("contract.rs"), Some(Classification::Custom));

    let onchain = &analysis.file_summaries["onchain_quality"];
    assert_eq!(onchain.file_count, 1);
    assert!((onchain.custom_percentage - 100.0).abs() < f64::EPSILON);
    assert!(onchain
        .technologies
        .contains(&"NEAR SDK: near-sdk-rs".to_string()));
    assert!(
        !analysis.file_summaries.contains_key("offchain_quality"),
        "empty categories get no summary"
    );
}

#[test]
fn test_empty_repository_report() {
    let outcome = analyze(&[]);
    assert!(outcome.is_empty());
    assert_eq!(outcome.file_count(), 0);
    assert_eq!(
        serde_json::to_string(&outcome).unwrap(),
        r#"{"file_count":0,"error":"Repository is empty"}"#
    );
}

#[test]
fn test_analysis_is_deterministic() {
    let first = serde_json::to_string(&analyze(SAMPLE_REPO)).unwrap();
    for _ in 0..3 {
        assert_eq!(serde_json::to_string(&analyze(SAMPLE_REPO)).unwrap(), first);
    }
}

#[test]
fn test_sample_repo_summary() {
    let outcome = analyze(SAMPLE_REPO);
    let analysis = complete(&outcome);
    let summary = &analysis.summary;

    assert_eq!(summary.file_count, SAMPLE_REPO.len());
    assert_eq!(summary.category_stats.len(), 7);
    assert_eq!(summary.category_stats["team_activity_project_maturity"], SAMPLE_REPO.len());
    assert_eq!(summary.top_file_types[0], (".js".to_string(), 2));
    assert!(summary.custom_code_percentage > 0.0 && summary.custom_code_percentage < 100.0);
    assert_eq!(
        summary.third_party_technologies.get("NEAR SDK"),
        Some(&vec!["near-sdk-rs".to_string()])
    );

    assert_eq!(
        analysis.classification("web/node_modules/left-pad/index.js"),
        Some(Classification::ThirdParty)
    );
    assert_eq!(analysis.classification("tsconfig.json"), Some(Classification::Boilerplate));

    let graph = analysis.graph();
    assert_eq!(graph.dependencies("contract/src/lib.rs"), vec!["contract/src/state.rs"]);
    assert_eq!(graph.dependencies("contract/src/state.rs"), vec!["contract/src/lib.rs"]);
    assert_eq!(graph.dependencies("web/src/App.jsx"), vec!["web/src/api.js"]);

    let grant = &analysis.categorized_files["grant_impact_ecosystem_fit"];
    assert_eq!(grant, &vec!["README.md".to_string(), "docs/design.md".to_string()]);
}

#[test]
fn test_category_important_files_come_from_global_ranking() {
    let outcome = analyze(SAMPLE_REPO);
    let analysis = complete(&outcome);
    let near = &analysis.file_summaries["near_protocol_integration"];
    for path in &near.important_files {
        assert!(analysis.categorized_files["near_protocol_integration"].contains(path));
        assert!(analysis.ranking().contains(path));
    }
    let positions: Vec<usize> = near
        .important_files
        .iter()
        .filter_map(|p| analysis.ranking().iter().position(|r| r == p))
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "ranking order is kept");
}

#[test]
fn test_select_through_analysis() {
    let (big, mid, small) = ("x".repeat(100_000), "x".repeat(50), "x".repeat(20));
    let outcome = analyze(&[
        ("big.txt", big.as_str()),
        ("mid.txt", mid.as_str()),
        ("small.txt", small.as_str()),
    ]);
    let analysis = complete(&outcome);
    let config = SelectionConfig {
        budget: 60,
        ..SelectionConfig::default()
    };
    let picked = analysis.select("team_activity_project_maturity", &config).unwrap();
    let paths: Vec<&str> = picked.iter().map(|s| s.path.as_str()).collect();
    assert_eq!(paths, vec!["small.txt", "mid.txt"]);
    assert!(picked.iter().all(|s| s.reason == SelectReason::Proportional));

    assert!(matches!(
        analysis.select("no_such_category", &config),
        Err(AuditError::UnknownCategory(_))
    ));
}

#[test]
fn test_processor_renders_and_clamps() {
    let outcome = analyze(SAMPLE_REPO);
    let analysis = complete(&outcome);
    let registry = repoaudit_core::categorize::CategoryRegistry::builtin();
    let def = registry.require("near_protocol_integration").unwrap().def();

    let seen = RefCell::new(String::new());
    let scorer = |prompt: &str| -> repoaudit_core::Result<ScoreResult> {
        *seen.borrow_mut() = prompt.to_string();
        Ok(ScoreResult {
            score: 42,
            feedback: "solid".to_string(),
        })
    };
    let scored =
        CategoryProcessor::process(def, analysis, &SelectionConfig::default(), &scorer).unwrap();

    assert_eq!(scored.score, def.max_points, "scores are clamped to max_points");
    assert_eq!(scored.name, "NEAR Protocol Integration");
    assert!(!scored.files.is_empty());

    let prompt = seen.borrow();
    assert!(prompt.contains("NEAR Protocol Integration"));
    assert!(prompt.contains("File: contract/src/lib.rs"));
    assert!(prompt.contains("\"file_count\""));
    assert!(!prompt.contains("{FILES_CONTENT}"));
}

#[test]
fn test_processor_surfaces_scorer_failure() {
    let outcome = analyze(SAMPLE_REPO);
    let analysis = complete(&outcome);
    let registry = repoaudit_core::categorize::CategoryRegistry::builtin();
    let def = registry.require("offchain_quality").unwrap().def();

    let scorer = |_: &str| -> repoaudit_core::Result<ScoreResult> {
        Err(AuditError::Scorer("backend offline".to_string()))
    };
    let err = CategoryProcessor::process(def, analysis, &SelectionConfig::default(), &scorer)
        .unwrap_err();
    assert!(matches!(err, AuditError::Scorer(ref msg) if msg.contains("offchain_quality")));
}

#[test]
fn test_dir_source_filters_the_walk() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("src")).unwrap();
    fs::create_dir_all(root.join("node_modules/pkg")).unwrap();
    fs::create_dir_all(root.join("fixtures")).unwrap();
    fs::write(root.join("README.md"), "# demo").unwrap();
    fs::write(root.join("src/main.rs"), "mod util;\nfn main() {}").unwrap();
    fs::write(root.join("src/util.rs"), "pub fn f() {}").unwrap();
    fs::write(root.join("node_modules/pkg/index.js"), "x").unwrap();
    fs::write(root.join("fixtures/sample.rs"), "fn x() {}").unwrap();
    fs::write(root.join("logo.png"), "not really a png").unwrap();
    fs::write(root.join("blob.dat"), [0u8, 1, 2, 3]).unwrap();
    fs::write(root.join("huge.txt"), "y".repeat(4096)).unwrap();
    fs::write(root.join(".gitignore"), "target\n").unwrap();

    let mut config = Config::default();
    config.scan.exclude = vec!["^fixtures/".to_string()];
    config.scan.max_file_bytes = 1024;
    let source = DirSource::new(root, &config.scan).unwrap();

    let paths: Vec<String> = source.get_files().unwrap().into_iter().map(|f| f.path).collect();
    assert_eq!(paths, vec!["README.md", "src/main.rs", "src/util.rs"]);

    let analyzer = RepoAnalyzer::new(source, config).unwrap();
    let analysis = complete(analyzer.analysis().unwrap());
    assert_eq!(analysis.graph().dependencies("src/main.rs"), vec!["src/util.rs"]);
}

#[test]
fn test_dir_source_rejects_missing_root() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent");
    assert!(DirSource::new(&missing, &Config::default().scan).is_err());
}
