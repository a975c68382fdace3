//! Dependency information structures

use super::Ecosystem;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A dependency declared in a manifest file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    /// Package name, as written in the manifest
    pub name: String,
    /// The ecosystem this dependency belongs to
    pub ecosystem: Ecosystem,
    /// Exact pinned version, or None for range/caret/unconstrained specs
    pub pinned_version: Option<String>,
}

impl Dependency {
    /// Creates a new dependency
    pub fn new(
        name: impl Into<String>,
        ecosystem: Ecosystem,
        pinned_version: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            ecosystem,
            pinned_version,
        }
    }

    /// Creates a new pinned dependency
    pub fn pinned(name: impl Into<String>, ecosystem: Ecosystem, version: impl Into<String>) -> Self {
        Self::new(name, ecosystem, Some(version.into()))
    }

    /// Creates a new unpinned dependency
    pub fn unpinned(name: impl Into<String>, ecosystem: Ecosystem) -> Self {
        Self::new(name, ecosystem, None)
    }

    /// Returns true if this dependency has an exact version pin
    pub fn is_pinned(&self) -> bool {
        self.pinned_version.is_some()
    }

    /// Deduplication key: normalized name plus ecosystem
    pub fn dedup_key(&self) -> (String, Ecosystem) {
        (normalize_name(&self.name), self.ecosystem)
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.pinned_version {
            Some(v) => write!(f, "{}=={} [{}]", self.name, v, self.ecosystem),
            None => write!(f, "{} [{}]", self.name, self.ecosystem),
        }
    }
}

/// Normalize a package or import name for loose comparison: lowercase,
/// with hyphens and dots mapped to underscores.
pub fn normalize_name(name: &str) -> String {
    name.to_lowercase().replace(['-', '.'], "_")
}
