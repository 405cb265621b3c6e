// src/cli/args.rs
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "repoaudit",
    version,
    about = "Repository analysis for audit scoring"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
    /// Read configuration from FILE instead of `<PATH>/repoaudit.toml`
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Raise log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the full analysis and print the report
    Analyze {
        #[arg(default_value = ".")]
        path: PathBuf,
        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the most central files of the dependency graph
    Graph {
        #[arg(default_value = ".")]
        path: PathBuf,
        #[arg(long, default_value = "20")]
        top: usize,
        /// Also list each file's resolved dependencies
        #[arg(long)]
        edges: bool,
    },
    /// Show which files a category would forward under the budget
    Select {
        #[arg(default_value = ".")]
        path: PathBuf,
        #[arg(long, short)]
        category: String,
        /// Override `selection.budget`
        #[arg(long)]
        budget: Option<i64>,
        /// Emit the selection, including forwarded content, as JSON
        #[arg(long)]
        json: bool,
    },
}
