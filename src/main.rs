//! stale-deps - Dependency staleness audit CLI tool
//!
//! Audits project manifests against their public registries:
//! - Python (requirements.txt, pyproject.toml) against PyPI
//! - Node.js (package.json) against the npm registry

use clap::{CommandFactory, Parser};
use stale_deps::cli::{CheckArgs, CliArgs, Command};
use stale_deps::orchestrator::Orchestrator;
use stale_deps::output::formatter_for;
use std::io::{self, Write};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    let Some(command) = args.command else {
        // No subcommand: print help and exit cleanly
        let mut cmd = CliArgs::command();
        let _ = cmd.print_help();
        return ExitCode::SUCCESS;
    };

    match command {
        Command::Check(check_args) => match run_check(check_args).await {
            Ok(code) => code,
            Err(e) => {
                eprintln!("Error: {}", e);
                ExitCode::FAILURE
            }
        },
    }
}

/// Run the check subcommand
async fn run_check(args: CheckArgs) -> anyhow::Result<ExitCode> {
    if args.verbose {
        eprintln!("stale-deps v{}", env!("CARGO_PKG_VERSION"));
        eprintln!("Target: {}", args.path.display());
        eprintln!("Stale threshold: {} days", args.stale_days);
    }

    let formatter = formatter_for(&args);
    let orchestrator = Orchestrator::new(args)?;
    let report = orchestrator.run().await?;

    let mut stdout = io::stdout().lock();
    formatter.format(&report, &mut stdout)?;
    stdout.flush()?;

    Ok(ExitCode::SUCCESS)
}
