//! Error taxonomy for the audit pipeline
//!
//! Manifest problems are fatal: they abort the run before any network
//! activity. Registry problems are recovered per dependency, the
//! orchestrator turns them into not-found report rows.

use std::path::PathBuf;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Manifest file related errors
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// Package registry related errors
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Audited path does not exist
    #[error("path does not exist: {path}")]
    PathNotFound { path: PathBuf },
}

/// Errors raised while locating or parsing manifest files
#[derive(Error, Debug)]
pub enum ManifestError {
    /// No recognized manifest file at the audited path
    #[error("no requirements.txt, pyproject.toml, or package.json found in {path}")]
    NoManifest { path: PathBuf },

    /// Manifest file exists but could not be read
    #[error("failed to read manifest file {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// package.json is not valid JSON
    #[error("failed to parse JSON in {path}: {message}")]
    JsonSyntax { path: PathBuf, message: String },

    /// pyproject.toml is not valid TOML
    #[error("failed to parse TOML in {path}: {message}")]
    TomlSyntax { path: PathBuf, message: String },

    /// requirements.txt line with no usable package-name token
    #[error("invalid requirement '{line}' in {path}")]
    InvalidRequirement { path: PathBuf, line: String },

    /// File path given directly but not a recognized manifest name
    #[error("unsupported manifest format: {path}")]
    UnsupportedFormat { path: PathBuf },
}

/// Errors raised while talking to a package registry
#[derive(Error, Debug)]
pub enum RegistryError {
    /// The shared HTTP client could not be constructed
    #[error("failed to build HTTP client: {message}")]
    ClientInit { message: String },

    /// Registry answered 404 for the package
    #[error("package '{package}' not found on {registry}")]
    PackageNotFound {
        package: String,
        registry: &'static str,
    },

    /// Registry answered with a non-success status other than 404/429
    #[error("{registry} answered HTTP {status} for '{package}'")]
    Status {
        package: String,
        registry: &'static str,
        status: u16,
    },

    /// Request never completed (DNS, connect, TLS, ...)
    #[error("request for '{package}' to {registry} failed: {message}")]
    Transport {
        package: String,
        registry: &'static str,
        message: String,
    },

    /// 429 responses outlasted the retry budget
    #[error("{registry} rate limit exceeded while fetching '{package}'")]
    RateLimited {
        package: String,
        registry: &'static str,
    },

    /// Request exceeded the per-request timeout
    #[error("timed out fetching '{package}' from {registry}")]
    TimedOut {
        package: String,
        registry: &'static str,
    },

    /// Response body did not match the registry's documented schema
    #[error("unexpected {registry} response for '{package}': {message}")]
    MalformedResponse {
        package: String,
        registry: &'static str,
        message: String,
    },
}
