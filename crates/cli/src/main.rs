//! Merkle proof validator - Main entry point

use clap::{CommandFactory, Parser};
use solvency_cli::commands;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "merkle-validator")]
#[command(about = "Verify a proof-of-reserves Merkle proof", long_about = None)]
struct Cli {
    /// merkle proof file
    #[arg(short = 'f', value_name = "PATH")]
    file: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries the report
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let Some(path) = cli.file else {
        Cli::command().print_help()?;
        return Ok(());
    };

    commands::validate_file(&path)?;

    Ok(())
}
