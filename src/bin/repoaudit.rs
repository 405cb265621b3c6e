// src/bin/repoaudit.rs
use clap::{CommandFactory, Parser};
use colored::Colorize;
use repoaudit_core::cli::{self, Cli};
use repoaudit_core::exit::AuditExit;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn main() -> AuditExit {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let Some(command) = cli.command else {
        let _ = Cli::command().print_help();
        return AuditExit::Success;
    };

    match cli::dispatch::execute(command, cli.config.as_deref()) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("{} {e:#}", "error:".red().bold());
            AuditExit::Error
        }
    }
}
