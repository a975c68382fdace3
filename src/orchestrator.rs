//! Audit orchestrator coordinating the entire workflow
//!
//! This module provides:
//! - Workflow coordination: detect → parse → scan → fetch → report
//! - Parallel registry queries with a concurrency bound
//! - Partial continuation: a failed fetch becomes a not-found row instead of
//!   aborting the audit

use crate::cli::CheckArgs;
use crate::domain::{Dependency, Ecosystem, RegistryRecord, ReportRow, Summary};
use crate::error::AppError;
use crate::manifest::{dedup_dependencies, detect_manifests, get_parser};
use crate::progress::Progress;
use crate::registry::{create_adapter, HttpClient};
use crate::scanner::{is_imported, scan_imports};
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Concurrency limit for registry requests
const FETCH_CONCURRENCY: usize = 8;

/// Orchestrator for coordinating the audit workflow
pub struct Orchestrator {
    /// CLI arguments for configuration
    args: CheckArgs,
    /// HTTP client for registry requests
    client: HttpClient,
    /// Semaphore bounding in-flight registry requests
    semaphore: Arc<Semaphore>,
}

/// Result of running the audit
#[derive(Debug)]
pub struct AuditReport {
    /// Per-dependency rows in declaration order
    pub rows: Vec<ReportRow>,
    /// Aggregate counts over all rows
    pub summary: Summary,
    /// Primary staleness threshold the report was built with
    pub stale_days: i64,
}

impl Orchestrator {
    /// Create a new orchestrator with the given CLI arguments
    pub fn new(args: CheckArgs) -> Result<Self, AppError> {
        let client = HttpClient::new()?;
        Ok(Self::with_client(args, client))
    }

    /// Create an orchestrator with a custom HTTP client (for testing)
    pub fn with_client(args: CheckArgs, client: HttpClient) -> Self {
        Self {
            args,
            client,
            semaphore: Arc::new(Semaphore::new(FETCH_CONCURRENCY)),
        }
    }

    /// Run the audit workflow
    pub async fn run(&self) -> Result<AuditReport, AppError> {
        let mut progress = Progress::new(self.args.show_progress());

        let path = self.args.path.as_path();
        if !path.exists() {
            return Err(AppError::PathNotFound {
                path: path.to_path_buf(),
            });
        }

        // Step 1: Detect and parse manifests. Any parse failure is fatal.
        progress.spinner("Reading manifests...");
        let manifests = detect_manifests(path)?;

        let mut dependencies = Vec::new();
        for info in &manifests {
            let content = std::fs::read_to_string(&info.path).map_err(|e| {
                crate::error::ManifestError::Unreadable {
                    path: info.path.clone(),
                    source: e,
                }
            })?;
            dependencies.extend(get_parser(info.kind).parse(&content)?);
        }
        let dependencies = dedup_dependencies(dependencies);
        progress.finish_and_clear();

        // Step 2: Scan Python sources for imports
        let imports = self.scan(path, &dependencies, &mut progress);

        // Step 3: Fetch registry metadata concurrently
        progress.start(dependencies.len() as u64, "Checking dependencies");
        let records = self.fetch_all(&dependencies, &progress).await;
        progress.finish_and_clear();

        // Step 4: Assemble the report
        let now = Utc::now();
        let rows = assemble_rows(dependencies, records, imports.as_ref(), now);
        let summary = Summary::from_rows(&rows, self.args.stale_days);

        Ok(AuditReport {
            rows,
            summary,
            stale_days: self.args.stale_days,
        })
    }

    /// Collect the import set when the scan applies, None otherwise
    fn scan(
        &self,
        path: &Path,
        dependencies: &[Dependency],
        progress: &mut Progress,
    ) -> Option<HashSet<String>> {
        if self.args.no_import_check {
            return None;
        }
        if !dependencies.iter().any(|d| d.ecosystem == Ecosystem::PyPi) {
            return None;
        }

        // A direct manifest path scans the tree around it
        let root = if path.is_file() {
            path.parent().unwrap_or(Path::new("."))
        } else {
            path
        };

        progress.spinner("Scanning imports...");
        let imports = scan_imports(root);
        progress.finish_and_clear();
        Some(imports)
    }

    /// Fetch registry metadata for every dependency, bounded by the
    /// semaphore. Results come back in declaration order; a failed fetch
    /// yields a not-found record carrying the failure reason.
    async fn fetch_all(
        &self,
        dependencies: &[Dependency],
        progress: &Progress,
    ) -> Vec<RegistryRecord> {
        let mut handles = Vec::with_capacity(dependencies.len());

        for dep in dependencies {
            let semaphore = Arc::clone(&self.semaphore);
            let adapter = create_adapter(dep.ecosystem, self.client.clone());
            let name = dep.name.clone();

            handles.push(tokio::spawn(async move {
                let _permit = semaphore.acquire_owned().await.unwrap();
                adapter.fetch_latest(&name).await
            }));
        }

        let mut records = Vec::with_capacity(handles.len());
        for (handle, dep) in handles.into_iter().zip(dependencies) {
            let record = match handle.await {
                Ok(Ok(record)) => record,
                Ok(Err(e)) => RegistryRecord::missing(e.to_string()),
                Err(e) => RegistryRecord::missing(format!(
                    "fetch task for '{}' failed: {}",
                    dep.name, e
                )),
            };
            progress.set_message(&dep.name);
            progress.inc();
            records.push(record);
        }

        records
    }
}

/// Join dependencies with their records into report rows
fn assemble_rows(
    dependencies: Vec<Dependency>,
    records: Vec<RegistryRecord>,
    imports: Option<&HashSet<String>>,
    now: DateTime<Utc>,
) -> Vec<ReportRow> {
    dependencies
        .into_iter()
        .zip(records)
        .map(|(dep, record)| {
            let imported = match (imports, dep.ecosystem) {
                (Some(imports), Ecosystem::PyPi) => Some(is_imported(&dep.name, imports)),
                _ => None,
            };
            ReportRow::new(dep, record, imported, now)
        })
        .collect()
}
