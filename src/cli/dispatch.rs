// src/cli/dispatch.rs
//! Command dispatch, kept out of the binary.

use std::path::Path;

use anyhow::Result;

use super::args::Commands;
use super::handlers::{handle_analyze, handle_graph, handle_select};
use crate::exit::AuditExit;

/// Executes the parsed command.
///
/// # Errors
/// Returns error if the command handler fails.
pub fn execute(command: Commands, config: Option<&Path>) -> Result<AuditExit> {
    match command {
        Commands::Analyze { path, json } => handle_analyze(&path, config, json),
        Commands::Graph { path, top, edges } => handle_graph(&path, config, top, edges),
        Commands::Select {
            path,
            category,
            budget,
            json,
        } => handle_select(&path, config, &category, budget, json),
    }
}
