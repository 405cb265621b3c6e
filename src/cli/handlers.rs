// src/cli/handlers.rs
use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;

use crate::analyzer::{AnalysisOutcome, RepoAnalyzer};
use crate::config::Config;
use crate::exit::AuditExit;
use crate::reporting;
use crate::source::DirSource;

fn load_config(root: &Path, explicit: Option<&Path>) -> Result<Config> {
    let config = match explicit {
        Some(file) => Config::load(file)
            .with_context(|| format!("failed to load config {}", file.display()))?,
        None => Config::discover(root)?,
    };
    Ok(config)
}

fn build_analyzer(root: &Path, config: Config) -> Result<RepoAnalyzer<DirSource>> {
    let source = DirSource::new(root, &config.scan)
        .with_context(|| format!("cannot scan {}", root.display()))?;
    Ok(RepoAnalyzer::new(source, config)?)
}

fn report_empty(root: &Path) -> AuditExit {
    eprintln!(
        "{} {} contains no analyzable files",
        "warning:".yellow().bold(),
        root.display()
    );
    AuditExit::EmptyRepository
}

/// Handles the `analyze` command.
///
/// # Errors
/// Returns error if configuration or scanning fails.
pub fn handle_analyze(root: &Path, config: Option<&Path>, json: bool) -> Result<AuditExit> {
    let analyzer = build_analyzer(root, load_config(root, config)?)?;
    let outcome = analyzer.analysis()?;

    if json {
        println!("{}", serde_json::to_string_pretty(outcome)?);
    }
    match outcome {
        AnalysisOutcome::Empty(_) => Ok(report_empty(root)),
        AnalysisOutcome::Complete(analysis) => {
            if !json {
                reporting::print_analysis(analysis);
            }
            Ok(AuditExit::Success)
        }
    }
}

/// Handles the `graph` command.
///
/// # Errors
/// Returns error if configuration or scanning fails.
pub fn handle_graph(root: &Path, config: Option<&Path>, top: usize, edges: bool) -> Result<AuditExit> {
    let analyzer = build_analyzer(root, load_config(root, config)?)?;
    match analyzer.analysis()? {
        AnalysisOutcome::Empty(_) => Ok(report_empty(root)),
        AnalysisOutcome::Complete(analysis) => {
            reporting::print_graph(analysis, top, edges);
            Ok(AuditExit::Success)
        }
    }
}

/// Handles the `select` command.
///
/// # Errors
/// Returns error if configuration, scanning, or the category lookup fails.
pub fn handle_select(
    root: &Path,
    config: Option<&Path>,
    category: &str,
    budget: Option<i64>,
    json: bool,
) -> Result<AuditExit> {
    let mut cfg = load_config(root, config)?;
    if let Some(units) = budget {
        cfg.selection.budget = units;
    }
    let selection = cfg.selection.clone();
    let analyzer = build_analyzer(root, cfg)?;
    analyzer.registry().require(category)?;

    let analysis = match analyzer.analysis()? {
        AnalysisOutcome::Empty(_) => return Ok(report_empty(root)),
        AnalysisOutcome::Complete(analysis) => analysis,
    };
    let selected = analysis.select(category, &selection)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&selected)?);
    } else {
        reporting::print_selection(category, selection.budget, &selected);
    }
    Ok(AuditExit::Success)
}
