// src/classify/types.rs
//! Result types for boilerplate, third-party and SDK detection.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Provenance of a file. Every file gets exactly one label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Classification {
    /// Generated by scaffolding tools or copied from a template.
    Boilerplate,
    /// Vendored from an external dependency.
    ThirdParty,
    /// Written by the project team.
    Custom,
}

impl Classification {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Boilerplate => "boilerplate",
            Self::ThirdParty => "third-party",
            Self::Custom => "custom",
        }
    }
}

/// What a signature set identifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignatureKind {
    NearSdk,
    Framework,
}

impl SignatureKind {
    /// Prefix used when listing detected technologies.
    #[must_use]
    pub fn display_prefix(self) -> &'static str {
        match self {
            Self::NearSdk => "NEAR SDK",
            Self::Framework => "Framework",
        }
    }

    /// Heading in the third-party summary.
    #[must_use]
    pub fn summary_heading(self) -> &'static str {
        match self {
            Self::NearSdk => "NEAR SDK",
            Self::Framework => "Frameworks",
        }
    }
}

/// Which pattern families matched a single file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignatureMatch {
    pub file_path: String,
    pub path_match: bool,
    pub import_match: bool,
    pub content_match: bool,
}

/// Detection outcome for one SDK or framework.
#[derive(Debug, Clone, Serialize)]
pub struct SdkDetection {
    pub sdk_name: String,
    pub kind: SignatureKind,
    pub detected: bool,
    pub matched_files: Vec<String>,
    pub match_count: usize,
    /// First few matches with per-family detail.
    pub matches: Vec<SignatureMatch>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentHit {
    pub file_path: String,
    pub pattern: String,
}

/// Likelihood that the repository started from a known template.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateDetection {
    pub name: String,
    pub confidence: f64,
    pub file_matches: Vec<String>,
    pub content_matches: Vec<ContentHit>,
}

/// Repository-wide boilerplate and third-party findings.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BoilerplateAnalysis {
    pub near_sdk: IndexMap<String, SdkDetection>,
    pub frameworks: IndexMap<String, SdkDetection>,
    pub templates: IndexMap<String, TemplateDetection>,
    /// Heading ("NEAR SDK", "Frameworks", "Boilerplate") to detected names.
    pub third_party_summary: IndexMap<String, Vec<String>>,
}

impl BoilerplateAnalysis {
    /// All detected SDKs and frameworks, SDKs first.
    pub fn detected(&self) -> impl Iterator<Item = &SdkDetection> {
        self.near_sdk
            .values()
            .chain(self.frameworks.values())
            .filter(|d| d.detected)
    }
}

/// Per-label file counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ClassificationCounts {
    pub boilerplate: usize,
    #[serde(rename = "third-party")]
    pub third_party: usize,
    pub custom: usize,
}

impl ClassificationCounts {
    pub fn add(&mut self, class: Classification) {
        match class {
            Classification::Boilerplate => self.boilerplate += 1,
            Classification::ThirdParty => self.third_party += 1,
            Classification::Custom => self.custom += 1,
        }
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.boilerplate + self.third_party + self.custom
    }

    /// Share of custom files in `0.0..=1.0`; zero for an empty tally.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn custom_ratio(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.custom as f64 / total as f64,
        }
    }
}

impl FromIterator<Classification> for ClassificationCounts {
    fn from_iter<I: IntoIterator<Item = Classification>>(iter: I) -> Self {
        let mut counts = Self::default();
        for class in iter {
            counts.add(class);
        }
        counts
    }
}
