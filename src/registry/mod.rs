//! Registry adapters for fetching package metadata
//!
//! This module provides:
//! - HTTP client shared foundation with retry logic
//! - PyPI JSON API adapter
//! - npm Registry adapter

mod client;
mod npm;
mod pypi;

pub use client::HttpClient;
pub use npm::NpmAdapter;
pub use pypi::PyPiAdapter;

use crate::domain::{Ecosystem, RegistryRecord};
use crate::error::RegistryError;
use async_trait::async_trait;

/// Trait for registry adapters
#[async_trait]
pub trait RegistryAdapter: Send + Sync {
    /// Get the ecosystem this adapter handles
    fn ecosystem(&self) -> Ecosystem;

    /// Get the registry name
    fn registry_name(&self) -> &'static str;

    /// Fetch the latest version and its publish date for a package
    async fn fetch_latest(&self, package: &str) -> Result<RegistryRecord, RegistryError>;
}

/// Create a registry adapter for the given ecosystem
pub fn create_adapter(ecosystem: Ecosystem, client: HttpClient) -> Box<dyn RegistryAdapter> {
    match ecosystem {
        Ecosystem::PyPi => Box::new(PyPiAdapter::new(client)),
        Ecosystem::Npm => Box::new(NpmAdapter::new(client)),
    }
}
