//! Report rendering
//!
//! Two renderers over the same AuditReport: an aligned colored table for
//! terminals and a pretty-printed JSON document for machine consumers.

mod json;
mod table;

pub use json::JsonFormatter;
pub use table::TableFormatter;

use crate::cli::CheckArgs;
use crate::orchestrator::AuditReport;
use std::io::Write;

/// How much the table renderer says
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Summary line only
    Quiet,
    #[default]
    Normal,
    /// Adds per-package fetch-failure reasons
    Verbose,
}

/// Renders an audit report to a writer
pub trait OutputFormatter {
    /// Format and write the audit report
    fn format(&self, report: &AuditReport, writer: &mut dyn Write) -> std::io::Result<()>;
}

/// Pick the formatter the CLI flags ask for
pub fn formatter_for(args: &CheckArgs) -> Box<dyn OutputFormatter> {
    if args.json {
        Box::new(JsonFormatter)
    } else {
        Box::new(TableFormatter::new(table_verbosity(args), true))
    }
}

fn table_verbosity(args: &CheckArgs) -> Verbosity {
    if args.quiet {
        Verbosity::Quiet
    } else if args.verbose {
        Verbosity::Verbose
    } else {
        Verbosity::Normal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn args(extra: &[&str]) -> CheckArgs {
        let mut argv = vec!["stale-deps", "check"];
        argv.extend(extra);
        let cli = crate::cli::CliArgs::parse_from(argv);
        match cli.command.unwrap() {
            crate::cli::Command::Check(check) => check,
        }
    }

    #[test]
    fn test_default_verbosity() {
        assert_eq!(table_verbosity(&args(&[])), Verbosity::Normal);
        assert_eq!(Verbosity::default(), Verbosity::Normal);
    }

    #[test]
    fn test_quiet_wins_over_verbose() {
        assert_eq!(table_verbosity(&args(&["--quiet"])), Verbosity::Quiet);
        assert_eq!(
            table_verbosity(&args(&["--quiet", "--verbose"])),
            Verbosity::Quiet
        );
    }

    #[test]
    fn test_verbose_verbosity() {
        assert_eq!(table_verbosity(&args(&["--verbose"])), Verbosity::Verbose);
    }
}
