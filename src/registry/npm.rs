//! npm adapter over the registry API (`https://registry.npmjs.org/{package}`)
//!
//! The latest version comes from `dist-tags.latest`; its publish date is
//! the matching entry of the `time` map.

use crate::domain::{Ecosystem, RegistryRecord};
use crate::error::RegistryError;
use crate::registry::{HttpClient, RegistryAdapter};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashMap;

pub struct NpmAdapter {
    client: HttpClient,
}

impl NpmAdapter {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct NpmPackageResponse {
    #[serde(rename = "dist-tags")]
    dist_tags: DistTags,
    /// Publish times keyed by version (plus `created`/`modified` entries)
    #[serde(default)]
    time: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct DistTags {
    latest: String,
}

#[async_trait]
impl RegistryAdapter for NpmAdapter {
    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::Npm
    }

    fn registry_name(&self) -> &'static str {
        "npm"
    }

    async fn fetch_latest(&self, package: &str) -> Result<RegistryRecord, RegistryError> {
        let url = format!("https://registry.npmjs.org/{}", package);
        let response: NpmPackageResponse = self
            .client
            .get_json(&url, package, self.registry_name())
            .await?;

        let latest = response.dist_tags.latest;
        let release_date = response
            .time
            .get(&latest)
            .and_then(|t| t.parse::<DateTime<Utc>>().ok());

        Ok(RegistryRecord::found(latest, release_date))
    }
}
