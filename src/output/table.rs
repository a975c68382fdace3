//! Table output formatter for human-readable display
//!
//! This module provides:
//! - Aligned per-dependency table with colors
//! - Staleness and version status highlighting
//! - Summary with detailed breakdown

use crate::domain::{ReportRow, StalenessBucket, Summary, VersionStatus};
use crate::orchestrator::AuditReport;
use crate::output::{OutputFormatter, Verbosity};
use colored::Colorize;
use std::io::Write;

/// Placeholder for values the registry could not provide
const PLACEHOLDER: &str = "—";

/// Table formatter for human-readable output
pub struct TableFormatter {
    /// Verbosity level
    verbosity: Verbosity,
    /// Whether to use colors
    color: bool,
}

/// One row reduced to display strings, before width calculation
struct DisplayRow {
    package: String,
    pinned: String,
    latest: String,
    release: String,
    age: String,
    status: String,
    imported: String,
}

impl TableFormatter {
    /// Create a new table formatter
    pub fn new(verbosity: Verbosity, color: bool) -> Self {
        Self { verbosity, color }
    }

    fn display_row(&self, row: &ReportRow) -> DisplayRow {
        let package = format!(
            "{} [{}]",
            row.dependency.name,
            row.dependency.ecosystem.registry_name()
        );

        let pinned = row
            .dependency
            .pinned_version
            .clone()
            .unwrap_or_else(|| "unpinned".to_string());

        let latest = row
            .record
            .latest_version
            .clone()
            .unwrap_or_else(|| PLACEHOLDER.to_string());

        let release = row
            .record
            .last_release_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| PLACEHOLDER.to_string());

        let age = row
            .days_since_update
            .map(|d| format!("{}d", d))
            .unwrap_or_else(|| PLACEHOLDER.to_string());

        let imported = match row.imported {
            Some(true) => "yes".to_string(),
            Some(false) => "no".to_string(),
            None => PLACEHOLDER.to_string(),
        };

        DisplayRow {
            package,
            pinned,
            latest,
            release,
            age,
            status: row.version_status.label().to_string(),
            imported,
        }
    }

    /// Pad to width, then colorize. Padding before coloring keeps the ANSI
    /// escape bytes out of the width calculation.
    fn cell(&self, text: &str, width: usize, paint: impl Fn(&str) -> String) -> String {
        let padded = format!("{:width$}", text, width = width);
        if self.color {
            paint(&padded)
        } else {
            padded
        }
    }

    fn status_paint(&self, status: VersionStatus, text: &str) -> String {
        match status {
            VersionStatus::UpToDate => text.green().to_string(),
            VersionStatus::MinorBehind => text.yellow().to_string(),
            VersionStatus::MajorBehind => text.red().bold().to_string(),
            VersionStatus::Unpinned => text.yellow().to_string(),
            VersionStatus::Unknown => text.dimmed().to_string(),
        }
    }

    fn age_paint(&self, bucket: Option<StalenessBucket>, text: &str) -> String {
        match bucket {
            Some(StalenessBucket::Fresh) => text.green().to_string(),
            Some(StalenessBucket::Stale) => text.yellow().to_string(),
            Some(StalenessBucket::VeryStale) => text.red().bold().to_string(),
            None => text.dimmed().to_string(),
        }
    }

    fn write_summary(&self, summary: &Summary, writer: &mut dyn Write) -> std::io::Result<()> {
        let line = format!(
            "{} dependencies: {} stale ({} very stale), {} major behind, {} possibly unused, {} fetch errors",
            summary.total,
            summary.stale,
            summary.very_stale,
            summary.major_behind,
            summary.possibly_unused,
            summary.fetch_errors
        );
        if self.color {
            writeln!(writer, "{}", line.bold())
        } else {
            writeln!(writer, "{}", line)
        }
    }
}

impl OutputFormatter for TableFormatter {
    fn format(&self, report: &AuditReport, writer: &mut dyn Write) -> std::io::Result<()> {
        if self.verbosity == Verbosity::Quiet {
            return self.write_summary(&report.summary, writer);
        }

        let display: Vec<DisplayRow> = report
            .rows
            .iter()
            .map(|row| self.display_row(row))
            .collect();

        let headers = [
            "Package", "Pinned", "Latest", "Last Release", "Age", "Status", "Imported",
        ];
        let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
        for row in &display {
            let cells = [
                &row.package,
                &row.pinned,
                &row.latest,
                &row.release,
                &row.age,
                &row.status,
                &row.imported,
            ];
            for (width, cell) in widths.iter_mut().zip(cells) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let header_line = headers
            .iter()
            .zip(&widths)
            .map(|(h, w)| format!("{:width$}", h, width = w))
            .collect::<Vec<_>>()
            .join("  ");
        if self.color {
            writeln!(writer, "{}", header_line.bold())?;
        } else {
            writeln!(writer, "{}", header_line)?;
        }

        for (row, disp) in report.rows.iter().zip(&display) {
            let bucket = row.bucket(report.stale_days);
            let cells = [
                self.cell(&disp.package, widths[0], |t| t.to_string()),
                self.cell(&disp.pinned, widths[1], |t| {
                    if row.dependency.is_pinned() {
                        t.to_string()
                    } else {
                        t.dimmed().to_string()
                    }
                }),
                self.cell(&disp.latest, widths[2], |t| t.to_string()),
                self.cell(&disp.release, widths[3], |t| t.to_string()),
                self.cell(&disp.age, widths[4], |t| self.age_paint(bucket, t)),
                self.cell(&disp.status, widths[5], |t| {
                    self.status_paint(row.version_status, t)
                }),
                self.cell(&disp.imported, widths[6], |t| {
                    if row.imported == Some(false) {
                        t.yellow().to_string()
                    } else {
                        t.to_string()
                    }
                }),
            ];
            writeln!(writer, "{}", cells.join("  ").trim_end())?;
        }

        // Failed fetches get their reason spelled out in verbose mode
        if self.verbosity == Verbosity::Verbose {
            let failures: Vec<&ReportRow> =
                report.rows.iter().filter(|r| !r.record.found).collect();
            if !failures.is_empty() {
                writeln!(writer)?;
                if self.color {
                    writeln!(writer, "{}:", "Fetch errors".red().bold())?;
                } else {
                    writeln!(writer, "Fetch errors:")?;
                }
                for row in failures {
                    let reason = row.record.error.as_deref().unwrap_or("unknown error");
                    writeln!(writer, "  {}: {}", row.dependency.name, reason)?;
                }
            }
        }

        writeln!(writer)?;
        self.write_summary(&report.summary, writer)
    }
}
