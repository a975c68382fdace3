//! Manifest file detection and parsing
//!
//! This module provides functionality to:
//! - Detect manifest files in a directory (requirements.txt, pyproject.toml,
//!   package.json, in that order)
//! - Parse dependencies from each format into a uniform Dependency list
//! - Deduplicate declarations across manifests

mod detector;
mod package_json;
mod pyproject_toml;
mod requirements_txt;

pub use detector::{detect_manifests, ManifestInfo, ManifestKind};
pub use package_json::PackageJsonParser;
pub use pyproject_toml::PyprojectTomlParser;
pub use requirements_txt::RequirementsTxtParser;

use crate::domain::{Dependency, Ecosystem};
use crate::error::ManifestError;
use std::collections::HashSet;
use std::path::Path;

/// Trait for parsing manifest files
pub trait ManifestParser {
    /// Parse dependencies from manifest content
    fn parse(&self, content: &str) -> Result<Vec<Dependency>, ManifestError>;

    /// Returns the manifest kind this parser handles
    fn kind(&self) -> ManifestKind;
}

/// Get a manifest parser for the specified kind
pub fn get_parser(kind: ManifestKind) -> Box<dyn ManifestParser> {
    match kind {
        ManifestKind::RequirementsTxt => Box::new(RequirementsTxtParser),
        ManifestKind::PyprojectToml => Box::new(PyprojectTomlParser),
        ManifestKind::PackageJson => Box::new(PackageJsonParser),
    }
}

/// Parse dependencies from a manifest file path
pub fn parse_manifest(path: &Path) -> Result<Vec<Dependency>, ManifestError> {
    let kind = ManifestKind::from_path(path).ok_or_else(|| ManifestError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;

    let content = std::fs::read_to_string(path).map_err(|e| ManifestError::Unreadable {
        path: path.to_path_buf(),
        source: e,
    })?;

    get_parser(kind).parse(&content)
}

/// Remove duplicate declarations, keeping the first occurrence of each
/// (normalized name, ecosystem) pair
pub fn dedup_dependencies(deps: Vec<Dependency>) -> Vec<Dependency> {
    let mut seen: HashSet<(String, Ecosystem)> = HashSet::new();
    deps.into_iter()
        .filter(|dep| seen.insert(dep.dedup_key()))
        .collect()
}
