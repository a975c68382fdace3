//! requirements.txt parser for Python projects
//!
//! Handles:
//! - One declaration per non-comment, non-blank line
//! - Exact pins (`pkg==1.2.3`) vs range specs (treated as unpinned)
//! - Extras (`pkg[extra]`), environment markers (`; sys_platform == ...`),
//!   and inline comments, all stripped
//! - Skips pip directives (`-r`, `--index-url`), VCS and URL requirements

use crate::domain::{Dependency, Ecosystem};
use crate::error::ManifestError;
use crate::manifest::{ManifestKind, ManifestParser};
use regex::Regex;
use std::path::PathBuf;
use std::sync::LazyLock;

/// Parser for requirements.txt files
pub struct RequirementsTxtParser;

// PEP 508-ish requirement line: name, optional extras, optional spec tail
static REQUIREMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z0-9][A-Za-z0-9._-]*)\s*(\[[^\]]*\])?\s*(.*)$").unwrap()
});

impl ManifestParser for RequirementsTxtParser {
    fn parse(&self, content: &str) -> Result<Vec<Dependency>, ManifestError> {
        let mut dependencies = Vec::new();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty()
                || line.starts_with('#')
                || line.starts_with('-')
                || line.starts_with("git+")
                || line.starts_with("http://")
                || line.starts_with("https://")
            {
                continue;
            }

            let dep = parse_requirement_line(line).ok_or_else(|| {
                ManifestError::InvalidRequirement {
                    path: PathBuf::from("requirements.txt"),
                    line: line.to_string(),
                }
            })?;
            dependencies.push(dep);
        }

        Ok(dependencies)
    }

    fn kind(&self) -> ManifestKind {
        ManifestKind::RequirementsTxt
    }
}

/// Parse a single PEP 508-style requirement string into a Dependency.
///
/// Returns None when the line has no leading package-name token. Shared with
/// the pyproject.toml parser for PEP 621 dependency arrays.
pub(crate) fn parse_requirement_line(line: &str) -> Option<Dependency> {
    // Drop environment markers and inline comments first
    let line = line.split(';').next().unwrap_or(line);
    let line = line.split('#').next().unwrap_or(line).trim();
    if line.is_empty() {
        return None;
    }

    let caps = REQUIREMENT_RE.captures(line)?;
    let name = caps.get(1)?.as_str();
    let spec = caps.get(3).map(|m| m.as_str()).unwrap_or("").trim();

    Some(Dependency::new(
        name,
        Ecosystem::PyPi,
        extract_exact_pin(spec),
    ))
}

/// Extract the version from an exact-pin clause (`==X.Y.Z`), if any.
/// Range operators and bare names yield None.
fn extract_exact_pin(spec: &str) -> Option<String> {
    for clause in spec.split(',') {
        let clause = clause.trim();
        if let Some(version) = clause.strip_prefix("==") {
            // `===` (arbitrary equality) pins just as hard as `==`
            let version = version.strip_prefix('=').unwrap_or(version).trim();
            if !version.is_empty() && !version.ends_with('*') {
                return Some(version.to_string());
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Result<Vec<Dependency>, ManifestError> {
        RequirementsTxtParser.parse(content)
    }

    #[test]
    fn test_parse_pinned_line() {
        let deps = parse("requests==2.28.0\n").unwrap();
        assert_eq!(deps.len(), 1);
        assert_eq!(deps[0].name, "requests");
        assert_eq!(deps[0].ecosystem, Ecosystem::PyPi);
        assert_eq!(deps[0].pinned_version.as_deref(), Some("2.28.0"));
    }

    #[test]
    fn test_parse_range_is_unpinned() {
        let deps = parse("flask>=2.0.0\ndjango~=4.2\n").unwrap();
        assert_eq!(deps.len(), 2);
        assert!(deps.iter().all(|d| d.pinned_version.is_none()));
    }

    #[test]
    fn test_parse_bare_name() {
        let deps = parse("rich\n").unwrap();
        assert_eq!(deps.len(), 1);
        assert_eq!(deps[0].name, "rich");
        assert!(deps[0].pinned_version.is_none());
    }

    #[test]
    fn test_parse_skips_comments_and_blanks() {
        let content = "# a comment\n\n  \nrequests==2.28.0\n";
        let deps = parse(content).unwrap();
        assert_eq!(deps.len(), 1);
    }

    #[test]
    fn test_parse_skips_directives_and_urls() {
        let content = "-r other.txt\n--index-url https://example.com\ngit+https://github.com/x/y\nhttps://example.com/pkg.whl\nrequests\n";
        let deps = parse(content).unwrap();
        assert_eq!(deps.len(), 1);
        assert_eq!(deps[0].name, "requests");
    }

    #[test]
    fn test_parse_strips_extras() {
        let deps = parse("httpx[http2]==0.24.0\n").unwrap();
        assert_eq!(deps[0].name, "httpx");
        assert_eq!(deps[0].pinned_version.as_deref(), Some("0.24.0"));
    }

    #[test]
    fn test_parse_strips_environment_markers() {
        let deps = parse("pywin32==300; sys_platform == 'win32'\n").unwrap();
        assert_eq!(deps[0].name, "pywin32");
        assert_eq!(deps[0].pinned_version.as_deref(), Some("300"));
    }

    #[test]
    fn test_parse_strips_inline_comment() {
        let deps = parse("requests==2.28.0  # pinned for CI\n").unwrap();
        assert_eq!(deps[0].pinned_version.as_deref(), Some("2.28.0"));
    }

    #[test]
    fn test_parse_multi_clause_spec_finds_pin() {
        let deps = parse("pkg>=1.0,==1.4.2\n").unwrap();
        assert_eq!(deps[0].pinned_version.as_deref(), Some("1.4.2"));
    }

    #[test]
    fn test_parse_wildcard_equality_is_unpinned() {
        let deps = parse("pkg==1.4.*\n").unwrap();
        assert!(deps[0].pinned_version.is_none());
    }

    #[test]
    fn test_parse_invalid_line_is_fatal() {
        let result = parse("==1.2.3\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_every_line_yields_one_declaration() {
        let content = "requests==2.28.0\nflask>=2.0.0\nrich\n";
        let deps = parse(content).unwrap();
        assert_eq!(deps.len(), 3);
        let names: Vec<&str> = deps.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["requests", "flask", "rich"]);
    }

    #[test]
    fn test_kind() {
        assert_eq!(
            RequirementsTxtParser.kind(),
            ManifestKind::RequirementsTxt
        );
    }
}
