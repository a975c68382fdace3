//! pyproject.toml parser for Python projects
//!
//! Reads both declaration styles:
//! - PEP 621: `[project] dependencies` array plus every
//!   `[project.optional-dependencies]` group, each entry a PEP 508 string
//! - Poetry: the `[tool.poetry.dependencies]` table, where values are either
//!   version strings or inline tables with a `version` key
//!
//! The interpreter requirement (`python` in Poetry tables) is not a package
//! and is skipped.

use crate::domain::{Dependency, Ecosystem};
use crate::error::ManifestError;
use crate::manifest::requirements_txt::parse_requirement_line;
use crate::manifest::{ManifestKind, ManifestParser};
use std::path::PathBuf;
use toml::Value;

/// Parser for pyproject.toml files
pub struct PyprojectTomlParser;

impl ManifestParser for PyprojectTomlParser {
    fn parse(&self, content: &str) -> Result<Vec<Dependency>, ManifestError> {
        let root: Value = toml::from_str(content).map_err(|e| ManifestError::TomlSyntax {
            path: PathBuf::from("pyproject.toml"),
            message: e.to_string(),
        })?;

        let mut dependencies = Vec::new();

        if let Some(project) = root.get("project") {
            collect_pep621_array(project.get("dependencies"), &mut dependencies);

            if let Some(Value::Table(groups)) = project.get("optional-dependencies") {
                let mut group_names: Vec<&String> = groups.keys().collect();
                group_names.sort_by_key(|name| name.to_lowercase());
                for name in group_names {
                    collect_pep621_array(groups.get(name), &mut dependencies);
                }
            }
        }

        if let Some(poetry_deps) = root
            .get("tool")
            .and_then(|t| t.get("poetry"))
            .and_then(|p| p.get("dependencies"))
            .and_then(Value::as_table)
        {
            let mut names: Vec<&String> = poetry_deps.keys().collect();
            names.sort_by_key(|name| name.to_lowercase());

            for name in names {
                if name.eq_ignore_ascii_case("python") {
                    continue;
                }
                let pin = poetry_deps.get(name).and_then(poetry_exact_pin);
                dependencies.push(Dependency::new(name, Ecosystem::PyPi, pin));
            }
        }

        Ok(dependencies)
    }

    fn kind(&self) -> ManifestKind {
        ManifestKind::PyprojectToml
    }
}

/// Append every parseable entry of a PEP 621 dependency array
fn collect_pep621_array(value: Option<&Value>, out: &mut Vec<Dependency>) {
    let Some(Value::Array(entries)) = value else {
        return;
    };
    for entry in entries {
        if let Some(dep) = entry.as_str().and_then(parse_requirement_line) {
            out.push(dep);
        }
    }
}

/// Extract an exact version pin from a Poetry constraint value.
///
/// Only a bare version literal counts as a pin; caret, tilde, wildcard,
/// comparison, and multi-clause constraints are ranges. Inline tables are
/// dispatched on their `version` key.
fn poetry_exact_pin(value: &Value) -> Option<String> {
    match value {
        Value::String(spec) => {
            let spec = spec.trim();
            let spec = spec.strip_prefix("==").unwrap_or(spec).trim();
            let is_literal = !spec.is_empty()
                && spec.starts_with(|c: char| c.is_ascii_digit())
                && !spec.contains(['^', '~', '*', '>', '<', '=', '!', ',', ' ']);
            is_literal.then(|| spec.to_string())
        }
        Value::Table(table) => table.get("version").and_then(poetry_exact_pin),
        _ => None,
    }
}
