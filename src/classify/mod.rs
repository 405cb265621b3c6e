// src/classify/mod.rs
//! File provenance classification and SDK/framework/template detection.

pub mod signatures;
pub mod types;

pub use types::{
    BoilerplateAnalysis, Classification, ClassificationCounts, ContentHit, SdkDetection,
    SignatureKind, SignatureMatch, TemplateDetection,
};

use indexmap::IndexMap;
use rayon::prelude::*;

use crate::source::SourceFile;
use signatures::{
    CompiledSignature, CompiledTemplate, BOILERPLATE_CONTENT_RE, BOILERPLATE_PATH_RE,
    COMPILED_SIGNATURES, COMPILED_TEMPLATES, THIRD_PARTY_DIR_RE,
};

/// Detail rows kept per detection.
const MATCH_DETAIL_LIMIT: usize = 10;
/// Templates above this confidence are reported in the third-party summary.
const TEMPLATE_REPORT_THRESHOLD: f64 = 0.5;
const FILE_WEIGHT: f64 = 0.7;
const CONTENT_WEIGHT: f64 = 0.3;

/// Labels files as boilerplate, third-party or custom and detects known
/// SDKs, frameworks and starter templates.
pub struct BoilerplateClassifier;

impl BoilerplateClassifier {
    /// Boilerplate wins over third-party; anything else is custom.
    #[must_use]
    pub fn classify(path: &str, content: &str) -> Classification {
        if Self::is_boilerplate(path, content) {
            Classification::Boilerplate
        } else if Self::is_third_party(path) {
            Classification::ThirdParty
        } else {
            Classification::Custom
        }
    }

    #[must_use]
    pub fn is_boilerplate(path: &str, content: &str) -> bool {
        BOILERPLATE_PATH_RE.is_match(path) || BOILERPLATE_CONTENT_RE.is_match(content)
    }

    #[must_use]
    pub fn is_third_party(path: &str) -> bool {
        THIRD_PARTY_DIR_RE.is_match(path)
    }

    /// Classifies every file in parallel, preserving input order.
    #[must_use]
    pub fn classify_all(files: &[SourceFile]) -> Vec<Classification> {
        files
            .par_iter()
            .map(|f| Self::classify(&f.path, &f.content))
            .collect()
    }

    /// Evaluates every signature independently against every file.
    #[must_use]
    pub fn detect_sdk(files: &[SourceFile]) -> IndexMap<String, SdkDetection> {
        COMPILED_SIGNATURES
            .iter()
            .map(|sig| (sig.def.name.to_string(), detect_signature(sig, files)))
            .collect()
    }

    /// Scores every known starter template.
    #[must_use]
    pub fn detect_templates(files: &[SourceFile]) -> IndexMap<String, TemplateDetection> {
        COMPILED_TEMPLATES
            .iter()
            .map(|tpl| (tpl.def.name.to_string(), detect_template(tpl, files)))
            .collect()
    }

    /// Full repository-level detection with a grouped summary.
    #[must_use]
    pub fn detect(files: &[SourceFile]) -> BoilerplateAnalysis {
        let mut analysis = BoilerplateAnalysis {
            templates: Self::detect_templates(files),
            ..BoilerplateAnalysis::default()
        };
        for (name, detection) in Self::detect_sdk(files) {
            match detection.kind {
                SignatureKind::NearSdk => analysis.near_sdk.insert(name, detection),
                SignatureKind::Framework => analysis.frameworks.insert(name, detection),
            };
        }

        let mut summary: IndexMap<String, Vec<String>> = IndexMap::new();
        for det in analysis.detected() {
            summary
                .entry(det.kind.summary_heading().to_string())
                .or_default()
                .push(det.sdk_name.clone());
        }
        for (name, tpl) in &analysis.templates {
            if tpl.confidence > TEMPLATE_REPORT_THRESHOLD {
                summary
                    .entry("Boilerplate".to_string())
                    .or_default()
                    .push(name.clone());
            }
        }
        analysis.third_party_summary = summary;

        tracing::info!(
            detected = analysis.detected().count(),
            "boilerplate detection complete"
        );
        analysis
    }
}

fn detect_signature(sig: &CompiledSignature, files: &[SourceFile]) -> SdkDetection {
    let matches: Vec<SignatureMatch> = files
        .par_iter()
        .filter_map(|file| {
            let m = SignatureMatch {
                file_path: file.path.clone(),
                path_match: sig.path.iter().any(|re| re.is_match(&file.path)),
                import_match: sig.import.iter().any(|re| re.is_match(&file.content)),
                content_match: sig.content.iter().any(|re| re.is_match(&file.content)),
            };
            (m.path_match || m.import_match || m.content_match).then_some(m)
        })
        .collect();

    if !matches.is_empty() {
        tracing::debug!(sdk = sig.def.name, files = matches.len(), "signature matched");
    }

    SdkDetection {
        sdk_name: sig.def.name.to_string(),
        kind: sig.def.kind,
        detected: !matches.is_empty(),
        matched_files: matches.iter().map(|m| m.file_path.clone()).collect(),
        match_count: matches.len(),
        matches: matches.into_iter().take(MATCH_DETAIL_LIMIT).collect(),
    }
}

#[allow(clippy::cast_precision_loss)]
fn detect_template(tpl: &CompiledTemplate, files: &[SourceFile]) -> TemplateDetection {
    let file_matches: Vec<String> = tpl
        .def
        .files
        .iter()
        .filter_map(|expected| {
            files
                .iter()
                .find(|f| path_ends_with(&f.path, expected))
                .map(|f| f.path.clone())
        })
        .collect();

    let mut content_matches = Vec::new();
    for (re, pattern) in tpl.content.iter().zip(tpl.def.content_patterns) {
        for file in files.iter().filter(|f| re.is_match(&f.content)) {
            content_matches.push(ContentHit {
                file_path: file.path.clone(),
                pattern: (*pattern).to_string(),
            });
        }
    }

    let ratio = |hits: usize, expected: usize| match expected {
        0 => 0.0,
        n => hits.min(n) as f64 / n as f64,
    };
    let confidence = FILE_WEIGHT * ratio(file_matches.len(), tpl.def.files.len())
        + CONTENT_WEIGHT * ratio(content_matches.len(), tpl.def.content_patterns.len());

    content_matches.truncate(MATCH_DETAIL_LIMIT);
    TemplateDetection {
        name: tpl.def.name.to_string(),
        confidence,
        file_matches,
        content_matches,
    }
}

fn path_ends_with(path: &str, suffix: &str) -> bool {
    path == suffix
        || path
            .strip_suffix(suffix)
            .is_some_and(|head| head.ends_with('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(path: &str, content: &str) -> SourceFile {
        SourceFile::new(path, content)
    }

    #[test]
    fn boilerplate_checked_before_third_party() {
        assert_eq!(
            BoilerplateClassifier::classify("node_modules/x/LICENSE.md", "MIT License"),
            Classification::Boilerplate
        );
        assert_eq!(
            BoilerplateClassifier::classify("vendor/jquery.js", "(function(){})"),
            Classification::ThirdParty
        );
        assert_eq!(
            BoilerplateClassifier::classify("src/app.js", "export const x = 1;"),
            Classification::Custom
        );
    }

    #[test]
    fn generated_config_paths_are_boilerplate() {
        for path in ["tsconfig.json", "web/.eslintrc.js", "CODE_OF_CONDUCT.md"] {
            assert_eq!(
                BoilerplateClassifier::classify(path, ""),
                Classification::Boilerplate,
                "{path}"
            );
        }
    }

    #[test]
    fn near_sdk_rs_detected_by_attribute() {
        let files = vec![
            file("contract/src/lib.rs", "#[near(contract_state)]\npub struct C;"),
            file("web/app.js", "console.log(1)"),
        ];
        let sdks = BoilerplateClassifier::detect_sdk(&files);
        let rs = &sdks["near-sdk-rs"];
        assert!(rs.detected);
        assert_eq!(rs.matched_files, vec!["contract/src/lib.rs"]);
        assert!(rs.matches[0].content_match);
        assert!(!rs.matches[0].import_match);
        assert!(!sdks["near-api-js"].detected);
    }

    #[test]
    fn detection_lists_every_signature_in_table_order() {
        let sdks = BoilerplateClassifier::detect_sdk(&[]);
        let names: Vec<_> = sdks.keys().map(String::as_str).collect();
        assert_eq!(
            names,
            vec![
                "near-api-js",
                "near-sdk-rs",
                "near-sdk-as",
                "react",
                "vue",
                "angular",
                "express",
                "nextjs"
            ]
        );
        assert!(sdks.values().all(|d| !d.detected && d.match_count == 0));
    }

    #[test]
    fn template_confidence_weights_files_and_content() {
        let files = vec![
            file("Cargo.toml", "[lib]\ncrate-type = [\"cdylib\"]"),
            file("src/lib.rs", "pub struct Contract {\n}"),
        ];
        let tpl = &BoilerplateClassifier::detect_templates(&files)["near-rust-template"];
        assert_eq!(tpl.file_matches.len(), 2);
        assert_eq!(tpl.content_matches.len(), 2);
        assert!((tpl.confidence - (0.7 + 0.3 * 0.5)).abs() < 1e-9);
    }

    #[test]
    fn template_file_match_respects_segments() {
        assert!(path_ends_with("app/src/App.js", "src/App.js"));
        assert!(!path_ends_with("mysrc/App.js", "src/App.js"));
    }

    #[test]
    fn summary_groups_detected_names() {
        let files = vec![
            file("src/index.js", "import React from 'react';"),
            file("Cargo.toml", "name = \"hello-near\""),
            file("src/lib.rs", "use near_sdk::near;"),
        ];
        let analysis = BoilerplateClassifier::detect(&files);
        assert_eq!(analysis.third_party_summary["NEAR SDK"], vec!["near-sdk-rs"]);
        assert_eq!(analysis.third_party_summary["Frameworks"], vec!["react"]);
        assert_eq!(
            analysis.third_party_summary["Boilerplate"],
            vec!["near-rust-template"]
        );
    }
}
