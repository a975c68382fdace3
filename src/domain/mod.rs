//! Domain types for the dependency audit
//!
//! This module provides:
//! - Ecosystem: supported package registries
//! - Dependency: a declared dependency from a manifest
//! - VersionStatus: pinned-vs-latest comparison verdict
//! - ReportRow / Summary: aggregated audit results

mod dependency;
mod ecosystem;
mod report;
mod version_status;

pub use dependency::{normalize_name, Dependency};
pub use ecosystem::Ecosystem;
pub use report::{RegistryRecord, ReportRow, StalenessBucket, Summary, VERY_STALE_DAYS};
pub use version_status::{compare, VersionStatus};
