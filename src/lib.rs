//! stale-deps - Dependency health audit library
//!
//! This library provides the core functionality for auditing dependency
//! manifests against public package registries:
//! - Python (requirements.txt, pyproject.toml) against PyPI
//! - Node.js (package.json) against the npm registry
//!
//! It reports staleness (days since last release), version drift (pinned vs
//! latest), and, for Python projects, whether each package is actually
//! imported anywhere in the source tree.

pub mod cli;
pub mod domain;
pub mod error;
pub mod manifest;
pub mod orchestrator;
pub mod output;
pub mod progress;
pub mod registry;
pub mod scanner;
