//! Audit report structures
//!
//! A ReportRow joins one declared dependency with its registry record,
//! version verdict, and import status. The Summary is derived from the rows
//! and never persisted.

use super::{compare, Dependency, VersionStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fixed secondary staleness threshold in days
pub const VERY_STALE_DAYS: i64 = 730;

/// Metadata fetched from a package registry for one dependency
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryRecord {
    /// Whether the registry returned usable metadata
    pub found: bool,
    /// Latest published version
    pub latest_version: Option<String>,
    /// Publish date of the latest version
    pub last_release_date: Option<DateTime<Utc>>,
    /// Short failure note when found is false
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RegistryRecord {
    /// Creates a record for a successful fetch
    pub fn found(latest_version: impl Into<String>, last_release_date: Option<DateTime<Utc>>) -> Self {
        Self {
            found: true,
            latest_version: Some(latest_version.into()),
            last_release_date,
            error: None,
        }
    }

    /// Creates a record for a failed fetch
    pub fn missing(error: impl Into<String>) -> Self {
        Self {
            found: false,
            latest_version: None,
            last_release_date: None,
            error: Some(error.into()),
        }
    }
}

/// Staleness classification from days since the last release
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StalenessBucket {
    /// Last release within the primary threshold
    Fresh,
    /// Last release beyond the primary threshold
    Stale,
    /// Last release beyond the fixed secondary threshold
    VeryStale,
}

impl StalenessBucket {
    /// Classify elapsed days against the primary threshold. Returns None
    /// when the release date is unknown.
    pub fn classify(days: Option<i64>, stale_days: i64) -> Option<Self> {
        let days = days?;
        if days >= VERY_STALE_DAYS {
            Some(StalenessBucket::VeryStale)
        } else if days >= stale_days {
            Some(StalenessBucket::Stale)
        } else {
            Some(StalenessBucket::Fresh)
        }
    }
}

/// One rendered line of the audit report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    /// The declared dependency
    pub dependency: Dependency,
    /// Registry metadata (found = false on fetch failure)
    pub record: RegistryRecord,
    /// Pinned-vs-latest verdict
    pub version_status: VersionStatus,
    /// Whole days since the latest release, when known
    pub days_since_update: Option<i64>,
    /// Whether the package is imported in the scanned source tree.
    /// None when the scan did not apply (npm, or scan disabled).
    pub imported: Option<bool>,
}

impl ReportRow {
    /// Joins a dependency with its registry record, computing the version
    /// verdict and elapsed days relative to `now`
    pub fn new(
        dependency: Dependency,
        record: RegistryRecord,
        imported: Option<bool>,
        now: DateTime<Utc>,
    ) -> Self {
        let version_status = compare(
            dependency.pinned_version.as_deref(),
            record.latest_version.as_deref(),
        );
        let days_since_update = record
            .last_release_date
            .map(|date| (now - date).num_days());

        Self {
            dependency,
            record,
            version_status,
            days_since_update,
            imported,
        }
    }

    /// Staleness bucket for this row, None when the release date is unknown
    pub fn bucket(&self, stale_days: i64) -> Option<StalenessBucket> {
        StalenessBucket::classify(self.days_since_update, stale_days)
    }
}

/// Aggregate counts over all report rows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// Total dependencies scanned
    pub total: usize,
    /// Rows in the stale bucket (includes very stale)
    pub stale: usize,
    /// Rows in the very-stale bucket
    pub very_stale: usize,
    /// Rows a major version behind
    pub major_behind: usize,
    /// Python rows with no observed import
    pub possibly_unused: usize,
    /// Rows whose registry fetch failed
    pub fetch_errors: usize,
}

impl Summary {
    /// Derives the summary from all rows
    pub fn from_rows(rows: &[ReportRow], stale_days: i64) -> Self {
        let mut summary = Summary {
            total: rows.len(),
            stale: 0,
            very_stale: 0,
            major_behind: 0,
            possibly_unused: 0,
            fetch_errors: 0,
        };

        for row in rows {
            match row.bucket(stale_days) {
                Some(StalenessBucket::VeryStale) => {
                    summary.very_stale += 1;
                    summary.stale += 1;
                }
                Some(StalenessBucket::Stale) => summary.stale += 1,
                Some(StalenessBucket::Fresh) | None => {}
            }
            if row.version_status == VersionStatus::MajorBehind {
                summary.major_behind += 1;
            }
            if row.imported == Some(false) {
                summary.possibly_unused += 1;
            }
            if !row.record.found {
                summary.fetch_errors += 1;
            }
        }

        summary
    }
}
