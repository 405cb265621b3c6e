// src/classify/signatures.rs
//! Pattern tables for SDK, framework, template and boilerplate detection.

use std::sync::LazyLock;

use regex::Regex;

use super::types::SignatureKind;

/// Path, import and content patterns identifying one SDK or framework.
pub struct SignatureDef {
    pub name: &'static str,
    pub kind: SignatureKind,
    pub path_patterns: &'static [&'static str],
    pub import_patterns: &'static [&'static str],
    pub content_patterns: &'static [&'static str],
}

/// Files and content snippets left behind by a starter template.
pub struct TemplateDef {
    pub name: &'static str,
    pub files: &'static [&'static str],
    pub content_patterns: &'static [&'static str],
}

pub const SIGNATURES: &[SignatureDef] = &[
    SignatureDef {
        name: "near-api-js",
        kind: SignatureKind::NearSdk,
        path_patterns: &[
            r"node_modules/near-api-js/",
            r"src/near-api-js/",
            r"lib/near-api-js/",
        ],
        import_patterns: &[
            r#"import.*from ['"]near-api-js['"]"#,
            r#"require\(['"]near-api-js['"]\)"#,
        ],
        content_patterns: &[
            r"class NearAPI",
            r"class Near\b",
            r"class Connection\b",
            r"class Account\b",
            r"class Contract\b",
            r"class WalletConnection\b",
        ],
    },
    SignatureDef {
        name: "near-sdk-rs",
        kind: SignatureKind::NearSdk,
        path_patterns: &[r"near-sdk/", r"near-sdk-rs/", r"near_sdk/"],
        import_patterns: &[
            r"use near_sdk::",
            r"use near_sdk as",
            r"extern crate near_sdk",
        ],
        content_patterns: &[
            r"#\[near\(",
            r"#\[derive\(BorshDeserialize, BorshSerialize\)\]",
            r"#\[derive\(Near",
            r"pub struct Contract \{",
        ],
    },
    SignatureDef {
        name: "near-sdk-as",
        kind: SignatureKind::NearSdk,
        path_patterns: &[
            r"node_modules/near-sdk-as/",
            r"src/near-sdk-as/",
            r"lib/near-sdk-as/",
        ],
        import_patterns: &[r#"import \{.*\} from ['"]near-sdk-as['"]"#],
        content_patterns: &[r"@nearBindgen", r"export class \w+ implements Contract"],
    },
    SignatureDef {
        name: "react",
        kind: SignatureKind::Framework,
        path_patterns: &[r"node_modules/react/", r"node_modules/react-dom/"],
        import_patterns: &[
            r"import React",
            r"import \* as React",
            r"import \{ useState, useEffect",
            r"import ReactDOM",
        ],
        content_patterns: &[
            r"class \w+ extends React\.Component",
            r"const \w+ = \(\) => \{",
            r"function \w+\(\) \{.*return \(",
            r"<React\.Fragment>",
            r"<>.*</>",
            r"useState\(",
            r"useEffect\(",
        ],
    },
    SignatureDef {
        name: "vue",
        kind: SignatureKind::Framework,
        path_patterns: &[r"node_modules/vue/"],
        import_patterns: &[r"import Vue", r"import \* as Vue", r"import \{ ref, computed"],
        content_patterns: &[
            r"new Vue\(\{",
            r"export default \{",
            r"<template>",
            r"<script>",
            r"components: \{",
        ],
    },
    SignatureDef {
        name: "angular",
        kind: SignatureKind::Framework,
        path_patterns: &[r"node_modules/@angular/"],
        import_patterns: &[r"import \{ Component", r"import \{ NgModule"],
        content_patterns: &[
            r"@Component\(\{",
            r"@NgModule\(\{",
            r#"selector: ['"]app-"#,
            r"templateUrl: ",
        ],
    },
    SignatureDef {
        name: "express",
        kind: SignatureKind::Framework,
        path_patterns: &[r"node_modules/express/"],
        import_patterns: &[r"import express", r#"require\(['"]express['"]\)"#],
        content_patterns: &[
            r"const app = express\(\)",
            r#"app\.get\(['"]"#,
            r#"app\.post\(['"]"#,
            r"app\.use\(",
            r"app\.listen\(",
        ],
    },
    SignatureDef {
        name: "nextjs",
        kind: SignatureKind::Framework,
        path_patterns: &[r"node_modules/next/", r"\.next/"],
        import_patterns: &[r#"import \{.*\} from ['"]next"#, r"import next"],
        content_patterns: &[
            r"export default function",
            r"getStaticProps",
            r"getServerSideProps",
            r"export async function getStaticPaths",
        ],
    },
];

pub const TEMPLATES: &[TemplateDef] = &[
    TemplateDef {
        name: "create-react-app",
        files: &[
            "public/index.html",
            "src/App.js",
            "src/index.js",
            "src/logo.svg",
            "src/App.css",
            "src/App.test.js",
        ],
        content_patterns: &[r"ReactDOM\.render\(", r#"<div className="App">"#, r"Learn React"],
    },
    TemplateDef {
        name: "nextjs-starter",
        files: &[
            "pages/index.js",
            "pages/_app.js",
            "styles/globals.css",
            "public/vercel.svg",
        ],
        content_patterns: &[
            r#"Welcome to <a href="https://nextjs\.org">Next\.js!</a>"#,
            r"Get started by editing",
            r"Powered by",
        ],
    },
    TemplateDef {
        name: "near-rust-template",
        files: &["Cargo.toml", "src/lib.rs"],
        content_patterns: &[
            r#"name = "hello-near""#,
            r#"crate-type = \["cdylib"\]"#,
            r"pub struct Contract \{",
            r"impl Default for Contract \{",
        ],
    },
];

const BOILERPLATE_PATHS: &[&str] = &[
    r"src/serviceWorker\.js",
    r"src/setupTests\.js",
    r"src/reportWebVitals\.js",
    r"tsconfig\.json",
    r"babel\.config\.js",
    r"jest\.config\.js",
    r"webpack\.config\.js",
    r"\.eslintrc\.js",
    r"\.prettierrc",
    r"CONTRIBUTING\.md",
    r"CODE_OF_CONDUCT\.md",
];

const BOILERPLATE_CONTENT: &[&str] = &[
    r"This code was generated by create-react-app",
    r"This file is auto-generated",
    r"// @generated",
    r"# Code of Conduct",
    r"# Contributing",
    r"MIT License",
    r"Apache License",
    r#""compilerOptions":"#,
];

/// One alternation per family; all patterns are fixed at compile time.
pub static BOILERPLATE_PATH_RE: LazyLock<Regex> = LazyLock::new(|| alternation(BOILERPLATE_PATHS));

pub static BOILERPLATE_CONTENT_RE: LazyLock<Regex> =
    LazyLock::new(|| alternation(BOILERPLATE_CONTENT));

/// Vendor-like directory anywhere in the path, matched on a segment boundary.
pub static THIRD_PARTY_DIR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|/)(?:node_modules|vendor|third[_-]party|external|libs?|packages|dist|build)/")
        .unwrap_or_else(|_| panic!("Invalid Regex"))
});

/// A signature with its pattern families compiled.
pub struct CompiledSignature {
    pub def: &'static SignatureDef,
    pub path: Vec<Regex>,
    pub import: Vec<Regex>,
    pub content: Vec<Regex>,
}

pub struct CompiledTemplate {
    pub def: &'static TemplateDef,
    pub content: Vec<Regex>,
}

pub static COMPILED_SIGNATURES: LazyLock<Vec<CompiledSignature>> = LazyLock::new(|| {
    SIGNATURES
        .iter()
        .map(|def| CompiledSignature {
            def,
            path: compile_all(def.path_patterns),
            import: compile_all(def.import_patterns),
            content: compile_all(def.content_patterns),
        })
        .collect()
});

pub static COMPILED_TEMPLATES: LazyLock<Vec<CompiledTemplate>> = LazyLock::new(|| {
    TEMPLATES
        .iter()
        .map(|def| CompiledTemplate {
            def,
            content: compile_all(def.content_patterns),
        })
        .collect()
});

fn compile_all(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).unwrap_or_else(|_| panic!("Invalid Regex: {p}")))
        .collect()
}

fn alternation(patterns: &[&str]) -> Regex {
    let joined = patterns
        .iter()
        .map(|p| format!("(?:{p})"))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&joined).unwrap_or_else(|_| panic!("Invalid Regex"))
}
