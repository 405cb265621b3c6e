pub mod analyzer;
pub mod categorize;
pub mod classify;
pub mod cli;
pub mod config;
pub mod error;
pub mod exit;
pub mod graph;
pub mod lang;
pub mod reporting;
pub mod scoring;
pub mod select;
pub mod source;
pub mod tokens;

pub use analyzer::{AnalysisOutcome, RepoAnalysis, RepoAnalyzer};
pub use error::{AuditError, Result};
pub use source::{DirSource, FileSource, MemorySource, SourceFile};
