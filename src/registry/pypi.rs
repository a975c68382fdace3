//! PyPI adapter over the JSON API (`https://pypi.org/pypi/{package}/json`)
//!
//! The latest version is `info.version`; its publish date is the earliest
//! file-upload timestamp among that version's release files.

use crate::domain::{Ecosystem, RegistryRecord};
use crate::error::RegistryError;
use crate::registry::{HttpClient, RegistryAdapter};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashMap;

pub struct PyPiAdapter {
    client: HttpClient,
}

impl PyPiAdapter {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct PyPiResponse {
    info: PackageInfo,
    /// Release file lists keyed by version
    #[serde(default)]
    releases: HashMap<String, Vec<ReleaseFile>>,
}

#[derive(Debug, Deserialize)]
struct PackageInfo {
    version: String,
}

#[derive(Debug, Deserialize)]
struct ReleaseFile {
    upload_time_iso_8601: Option<String>,
}

#[async_trait]
impl RegistryAdapter for PyPiAdapter {
    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::PyPi
    }

    fn registry_name(&self) -> &'static str {
        "PyPI"
    }

    async fn fetch_latest(&self, package: &str) -> Result<RegistryRecord, RegistryError> {
        let url = format!("https://pypi.org/pypi/{}/json", package);
        let response: PyPiResponse = self
            .client
            .get_json(&url, package, self.registry_name())
            .await?;

        let latest = response.info.version;
        let release_date = response
            .releases
            .get(&latest)
            .and_then(|files| earliest_upload(files));

        Ok(RegistryRecord::found(latest, release_date))
    }
}

/// Earliest upload time among a version's release files
fn earliest_upload(files: &[ReleaseFile]) -> Option<DateTime<Utc>> {
    files
        .iter()
        .filter_map(|f| f.upload_time_iso_8601.as_deref())
        .filter_map(|t| t.parse::<DateTime<Utc>>().ok())
        .min()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_earliest_upload_picks_minimum() {
        let files = vec![
            ReleaseFile {
                upload_time_iso_8601: Some("2024-03-01T12:00:00Z".to_string()),
            },
            ReleaseFile {
                upload_time_iso_8601: Some("2024-02-15T08:30:00Z".to_string()),
            },
            ReleaseFile {
                upload_time_iso_8601: None,
            },
        ];
        let earliest = earliest_upload(&files).unwrap();
        assert_eq!(
            earliest,
            "2024-02-15T08:30:00Z".parse::<DateTime<Utc>>().unwrap()
        );
    }

    #[test]
    fn test_earliest_upload_empty() {
        assert!(earliest_upload(&[]).is_none());
    }

    #[test]
    fn test_response_deserialization() {
        let json = r#"{
            "info": {"version": "2.31.0"},
            "releases": {
                "2.31.0": [{"upload_time_iso_8601": "2023-05-22T15:12:42Z"}]
            }
        }"#;
        let response: PyPiResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.info.version, "2.31.0");
        assert_eq!(response.releases["2.31.0"].len(), 1);
    }

    #[test]
    fn test_response_without_releases_map() {
        let json = r#"{"info": {"version": "1.0.0"}}"#;
        let response: PyPiResponse = serde_json::from_str(json).unwrap();
        assert!(response.releases.is_empty());
    }
}
