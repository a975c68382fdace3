//! JSON output formatter for machine processing
//!
//! Emits the full report as a single pretty-printed JSON document with a
//! stable field layout, suitable for piping into other tools.

use crate::domain::{ReportRow, Summary};
use crate::orchestrator::AuditReport;
use crate::output::OutputFormatter;
use serde::Serialize;
use std::io::Write;

/// JSON formatter for machine-readable output
pub struct JsonFormatter;

/// JSON representation of the full report
#[derive(Serialize)]
struct JsonOutput<'a> {
    /// Per-dependency rows in declaration order
    rows: Vec<JsonRow<'a>>,
    /// Aggregate counts
    summary: &'a Summary,
}

/// JSON representation of one report row
#[derive(Serialize)]
struct JsonRow<'a> {
    /// Package name as declared
    name: &'a str,
    /// Ecosystem (pypi or npm)
    ecosystem: crate::domain::Ecosystem,
    /// Exact pinned version, null when unpinned
    pinned_version: Option<&'a str>,
    /// Latest published version, null when the fetch failed
    latest_version: Option<&'a str>,
    /// Publish date of the latest version (RFC 3339), null when unknown
    last_release_date: Option<String>,
    /// Whole days since the latest release, null when unknown
    days_since_update: Option<i64>,
    /// Pinned-vs-latest verdict
    version_status: crate::domain::VersionStatus,
    /// Whether the package is imported, null when the scan did not apply
    imported: Option<bool>,
    /// Fetch failure reason, omitted on success
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
}

impl<'a> JsonRow<'a> {
    fn from_row(row: &'a ReportRow) -> Self {
        Self {
            name: &row.dependency.name,
            ecosystem: row.dependency.ecosystem,
            pinned_version: row.dependency.pinned_version.as_deref(),
            latest_version: row.record.latest_version.as_deref(),
            last_release_date: row.record.last_release_date.map(|d| d.to_rfc3339()),
            days_since_update: row.days_since_update,
            version_status: row.version_status,
            imported: row.imported,
            error: row.record.error.as_deref(),
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, report: &AuditReport, writer: &mut dyn Write) -> std::io::Result<()> {
        let output = JsonOutput {
            rows: report.rows.iter().map(JsonRow::from_row).collect(),
            summary: &report.summary,
        };

        let json = serde_json::to_string_pretty(&output).map_err(std::io::Error::other)?;
        writeln!(writer, "{}", json)?;

        Ok(())
    }
}
