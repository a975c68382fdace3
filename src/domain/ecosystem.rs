//! Ecosystem type definitions for supported package registries

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported package ecosystems
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ecosystem {
    /// Python ecosystem (requirements.txt, pyproject.toml)
    #[serde(rename = "pypi")]
    PyPi,
    /// Node.js ecosystem (package.json)
    Npm,
}

impl Ecosystem {
    /// Returns the registry name for this ecosystem
    pub fn registry_name(&self) -> &'static str {
        match self {
            Ecosystem::PyPi => "PyPI",
            Ecosystem::Npm => "npm",
        }
    }
}

impl fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.registry_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_names() {
        assert_eq!(Ecosystem::PyPi.registry_name(), "PyPI");
        assert_eq!(Ecosystem::Npm.registry_name(), "npm");
    }

    #[test]
    fn test_display_trait() {
        assert_eq!(format!("{}", Ecosystem::PyPi), "PyPI");
        assert_eq!(format!("{}", Ecosystem::Npm), "npm");
    }

    #[test]
    fn test_serde_serialization() {
        let json = serde_json::to_string(&Ecosystem::PyPi).unwrap();
        assert_eq!(json, "\"pypi\"");

        let json = serde_json::to_string(&Ecosystem::Npm).unwrap();
        assert_eq!(json, "\"npm\"");
    }

    #[test]
    fn test_serde_deserialization() {
        let eco: Ecosystem = serde_json::from_str("\"pypi\"").unwrap();
        assert_eq!(eco, Ecosystem::PyPi);

        let eco: Ecosystem = serde_json::from_str("\"npm\"").unwrap();
        assert_eq!(eco, Ecosystem::Npm);
    }
}
