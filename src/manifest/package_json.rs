//! package.json parser for npm projects
//!
//! Merges the `dependencies`, `devDependencies`, and `peerDependencies`
//! objects. Only a bare version literal (`1.2.3`) counts as a pin; caret,
//! tilde, comparison, wildcard, tag, and URL specifiers are ranges.

use crate::domain::{Dependency, Ecosystem};
use crate::error::ManifestError;
use crate::manifest::{ManifestKind, ManifestParser};
use serde_json::Value;
use std::path::PathBuf;

/// Parser for package.json files
pub struct PackageJsonParser;

/// Dependency sections read, in merge order
const SECTIONS: [&str; 3] = ["dependencies", "devDependencies", "peerDependencies"];

impl ManifestParser for PackageJsonParser {
    fn parse(&self, content: &str) -> Result<Vec<Dependency>, ManifestError> {
        let root: Value = serde_json::from_str(content).map_err(|e| ManifestError::JsonSyntax {
            path: PathBuf::from("package.json"),
            message: e.to_string(),
        })?;

        let mut dependencies = Vec::new();

        for section in SECTIONS {
            let Some(Value::Object(entries)) = root.get(section) else {
                continue;
            };

            // JSON objects carry no reliable order; sort for a stable report
            let mut names: Vec<&String> = entries.keys().collect();
            names.sort_by_key(|name| name.to_lowercase());

            for name in names {
                let pin = entries.get(name).and_then(Value::as_str).and_then(exact_pin);
                dependencies.push(Dependency::new(name, Ecosystem::Npm, pin));
            }
        }

        Ok(dependencies)
    }

    fn kind(&self) -> ManifestKind {
        ManifestKind::PackageJson
    }
}

/// Extract an exact version pin from an npm version specifier, if any
fn exact_pin(spec: &str) -> Option<String> {
    let spec = spec.trim();
    let spec = spec.strip_prefix('=').unwrap_or(spec).trim();
    let is_literal = !spec.is_empty()
        && spec.starts_with(|c: char| c.is_ascii_digit())
        && !spec.contains(['^', '~', '*', '>', '<', '=', '!', ',', ' ', '|']);
    is_literal.then(|| spec.to_string())
}
