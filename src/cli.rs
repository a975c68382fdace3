//! CLI argument parsing module for stale-deps

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Dependency health auditor
#[derive(Parser, Debug, Clone)]
#[command(
    name = "stale-deps",
    version,
    about = "Audit dependency health: staleness, version drift, and unused packages"
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Audit dependencies in a project directory or manifest file
    Check(CheckArgs),
}

/// Arguments for the check subcommand
#[derive(clap::Args, Debug, Clone)]
pub struct CheckArgs {
    /// Project directory or manifest file path (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Output results as JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// Skip the source scan for import usage
    #[arg(long)]
    pub no_import_check: bool,

    /// Days threshold for 'stale' (default: 365)
    #[arg(long, value_name = "DAYS", default_value_t = 365)]
    pub stale_days: i64,

    /// Enable quiet mode - no progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,
}

impl CheckArgs {
    /// Whether progress display should be shown on stderr.
    /// JSON output is meant for machine consumption, so it stays silent too.
    pub fn show_progress(&self) -> bool {
        !self.quiet && !self.json
    }
}
