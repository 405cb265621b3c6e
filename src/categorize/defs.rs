// src/categorize/defs.rs
//! Plain category definitions and the built-in set.

use serde::{Deserialize, Serialize};

use crate::select::SelectionStrategy;

/// How membership in a category is decided.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryKind {
    /// Extension gate plus path/content/file-name patterns.
    #[default]
    Rules,
    /// Every file, unconditionally.
    AllFiles,
    /// Documentation: file names (case-insensitive) or doc-path patterns,
    /// independent of the extension gate.
    Docs,
}

/// A category as written in configuration. Compiled into a `CategoryRule`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryDef {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub kind: CategoryKind,
    /// Lowercase extensions without the dot.
    #[serde(default)]
    pub extensions: Vec<String>,
    #[serde(default)]
    pub path_patterns: Vec<String>,
    #[serde(default)]
    pub content_patterns: Vec<String>,
    /// Path-only regexes that veto membership.
    #[serde(default)]
    pub exclude_patterns: Vec<String>,
    #[serde(default)]
    pub filenames: Vec<String>,
    #[serde(default)]
    pub selection: SelectionStrategy,
    #[serde(default = "default_max_points")]
    pub max_points: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_template: Option<String>,
}

const fn default_max_points() -> u32 {
    10
}

impl CategoryDef {
    /// Display name, falling back to the id.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}

fn rules(id: &str, name: &str) -> CategoryDef {
    CategoryDef {
        id: id.to_string(),
        name: name.to_string(),
        kind: CategoryKind::Rules,
        extensions: Vec::new(),
        path_patterns: Vec::new(),
        content_patterns: Vec::new(),
        exclude_patterns: Vec::new(),
        filenames: Vec::new(),
        selection: SelectionStrategy::ImportanceFirst,
        max_points: default_max_points(),
        prompt_template: None,
    }
}

/// Built-in categories in evaluation order.
#[must_use]
pub fn builtin_defs() -> Vec<CategoryDef> {
    vec![
        CategoryDef {
            extensions: strings(&["js", "ts", "jsx", "tsx", "rs", "py", "wasm"]),
            path_patterns: strings(&[
                r"contracts?/",
                r".*near.*",
                r".*blockchain.*",
                r".*wallet.*",
                r".*token.*",
            ]),
            content_patterns: strings(&[
                r"import.*near-api-js",
                r#"import.*from ['"]near-"#,
                r"new near\.",
                r#"\.connect\(.*['"]near.*['"]\)"#,
                r"\.accountId",
                r"\.createTransaction",
                r"\.functionCall",
                r"\.viewFunction",
                r"use near_sdk",
                r"#\[near\(",
                r"#\[derive\(.*Near",
                r"import near",
                r"from near",
            ]),
            filenames: strings(&["near.config.js", "near.config.ts"]),
            ..rules("near_protocol_integration", "NEAR Protocol Integration")
        },
        CategoryDef {
            extensions: strings(&["rs", "js", "ts", "wasm"]),
            path_patterns: strings(&[r"contracts?/", r".*near.*contract.*", r".*blockchain.*"]),
            content_patterns: strings(&[
                r"#\[near\(",
                r"#\[payable\]",
                r"Contract",
                r"transfer",
                r"balance_of",
                r"assert!",
                r"require\(",
                r"state",
                r"\.signAndSendTransaction",
                r"\.functionCall",
                r"\.sendTokens",
                r"\.stake",
            ]),
            filenames: strings(&["contract.rs", "contract.ts", "contract.js"]),
            ..rules("onchain_quality", "Onchain Quality")
        },
        CategoryDef {
            extensions: strings(&["js", "ts", "jsx", "tsx", "py", "html", "css", "vue", "svelte"]),
            path_patterns: strings(&[
                r"src/",
                r"pages/",
                r"components/",
                r"api/",
                r"backend/",
                r"frontend/",
                r"ui/",
                r"views/",
                r"hooks/",
                r"utils/",
                r"services/",
            ]),
            content_patterns: strings(&[
                r"import React",
                r"import Vue",
                r"import Angular",
                r"import.*svelte",
                r"import.*next",
                r"import.*nuxt",
                r"import express",
                r"import fastify",
                r"import nestjs",
                r"import flask",
                r"import django",
                r"import fastapi",
                r"fetch\(",
                r"axios\.",
                r"\.get\(",
                r"\.post\(",
                r"api\.",
                r"router\.",
                r"app\.use\(",
                r"app\.get\(",
                r"app\.post\(",
            ]),
            exclude_patterns: strings(&[
                r"contracts?/",
                r"node_modules/",
                r".*\.test\.",
                r".*\.spec\.",
            ]),
            ..rules("offchain_quality", "Offchain Quality")
        },
        CategoryDef {
            extensions: strings(&[
                "js", "ts", "jsx", "tsx", "py", "rs", "go", "java", "c", "cpp", "cs", "html",
                "css", "scss", "sass", "less", "md", "rst", "txt", "adoc", "wiki", "ipynb",
            ]),
            path_patterns: strings(&[r"src/", r"docs?/", r"wiki/", r"examples?/", r"tutorials?/"]),
            filenames: strings(&[
                "README.md",
                "CONTRIBUTING.md",
                "CHANGELOG.md",
                "LICENSE",
                "CODE_OF_CONDUCT.md",
                "SECURITY.md",
                "api.md",
                "architecture.md",
                "design.md",
            ]),
            ..rules("code_quality_documentation", "Code Quality & Documentation")
        },
        CategoryDef {
            extensions: strings(&["js", "ts", "jsx", "tsx", "py", "rs", "go", "wasm"]),
            path_patterns: strings(&[
                r"src/core/",
                r"src/lib/",
                r"lib/",
                r"algorithm/",
                r"engine/",
                r"core/",
            ]),
            exclude_patterns: strings(&[
                r".*\.test\.",
                r".*\.spec\.",
                r"test/",
                r"tests/",
                r"__tests__/",
            ]),
            ..rules("technical_innovation", "Technical Innovation")
        },
        CategoryDef {
            kind: CategoryKind::AllFiles,
            ..rules("team_activity_project_maturity", "Team Activity & Project Maturity")
        },
        CategoryDef {
            kind: CategoryKind::Docs,
            filenames: strings(&[
                "readme.md",
                "design.md",
                "architecture.md",
                "overview.md",
                "vision.md",
            ]),
            path_patterns: strings(&[r"(?:^|/)docs?/.*\.(?:md|rst|txt)$"]),
            selection: SelectionStrategy::SizeSpread,
            ..rules("grant_impact_ecosystem_fit", "Grant Impact & Ecosystem Fit")
        },
    ]
}
