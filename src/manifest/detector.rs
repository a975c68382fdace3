//! Manifest file detection
//!
//! A directory is probed for the three supported manifests in a fixed order;
//! a direct file path is dispatched on its name.

use crate::domain::Ecosystem;
use crate::error::ManifestError;
use std::path::{Path, PathBuf};

/// Supported manifest file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestKind {
    /// requirements.txt (PyPI)
    RequirementsTxt,
    /// pyproject.toml (PyPI, PEP 621 or Poetry)
    PyprojectToml,
    /// package.json (npm)
    PackageJson,
}

impl ManifestKind {
    /// Returns the canonical filename for this manifest kind
    pub fn filename(&self) -> &'static str {
        match self {
            ManifestKind::RequirementsTxt => "requirements.txt",
            ManifestKind::PyprojectToml => "pyproject.toml",
            ManifestKind::PackageJson => "package.json",
        }
    }

    /// Returns the ecosystem this manifest declares dependencies for
    pub fn ecosystem(&self) -> Ecosystem {
        match self {
            ManifestKind::RequirementsTxt | ManifestKind::PyprojectToml => Ecosystem::PyPi,
            ManifestKind::PackageJson => Ecosystem::Npm,
        }
    }

    /// All manifest kinds in detection order
    pub fn all() -> &'static [ManifestKind] {
        &[
            ManifestKind::RequirementsTxt,
            ManifestKind::PyprojectToml,
            ManifestKind::PackageJson,
        ]
    }

    /// Recognize a manifest kind from a file path's name
    pub fn from_path(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?;
        ManifestKind::all()
            .iter()
            .copied()
            .find(|kind| kind.filename() == name)
    }
}

/// A detected manifest file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestInfo {
    /// Path to the manifest file
    pub path: PathBuf,
    /// Format of the manifest
    pub kind: ManifestKind,
}

impl ManifestInfo {
    /// Create a new ManifestInfo
    pub fn new(path: impl Into<PathBuf>, kind: ManifestKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }
}

/// Locate manifest files at the given path.
///
/// A directory yields every recognized manifest it contains, in detection
/// order. A file path is dispatched on its name. Failing to find any
/// recognized manifest is a fatal error.
pub fn detect_manifests(path: &Path) -> Result<Vec<ManifestInfo>, ManifestError> {
    if path.is_file() {
        let kind = ManifestKind::from_path(path).ok_or_else(|| ManifestError::UnsupportedFormat {
            path: path.to_path_buf(),
        })?;
        return Ok(vec![ManifestInfo::new(path, kind)]);
    }

    let manifests: Vec<ManifestInfo> = ManifestKind::all()
        .iter()
        .filter_map(|kind| {
            let candidate = path.join(kind.filename());
            candidate.exists().then(|| ManifestInfo::new(candidate, *kind))
        })
        .collect();

    if manifests.is_empty() {
        return Err(ManifestError::NoManifest {
            path: path.to_path_buf(),
        });
    }

    Ok(manifests)
}
