//! End-to-end tests for the stale-deps CLI
//!
//! These tests verify:
//! - Help and argument handling
//! - Exit codes for fatal manifest errors
//! - Report output for projects that need no registry round-trips

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Command under test
fn stale_deps() -> Command {
    Command::cargo_bin("stale-deps").expect("binary should build")
}

fn create_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

mod cli_surface {
    use super::*;

    /// No subcommand prints help and exits cleanly
    #[test]
    fn test_no_subcommand_shows_help() {
        stale_deps()
            .assert()
            .success()
            .stdout(predicate::str::contains("Usage"))
            .stdout(predicate::str::contains("check"));
    }

    #[test]
    fn test_check_help() {
        stale_deps()
            .args(["check", "--help"])
            .assert()
            .success()
            .stdout(predicate::str::contains("--json"))
            .stdout(predicate::str::contains("--no-import-check"))
            .stdout(predicate::str::contains("--stale-days"));
    }

    #[test]
    fn test_unknown_subcommand_fails() {
        stale_deps().arg("frobnicate").assert().failure();
    }

    #[test]
    fn test_version_flag() {
        stale_deps()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("stale-deps"));
    }
}

mod fatal_errors {
    use super::*;

    /// A nonexistent path is a fatal error
    #[test]
    fn test_missing_path_fails() {
        stale_deps()
            .args(["check", "/definitely/not/a/real/path"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Error"));
    }

    /// A directory without any recognized manifest is a fatal error
    #[test]
    fn test_no_manifest_fails() {
        let temp_dir = create_test_dir();

        stale_deps()
            .args(["check", temp_dir.path().to_str().unwrap()])
            .assert()
            .failure()
            .stderr(predicate::str::contains("no requirements.txt"));
    }

    /// Malformed manifest content aborts the audit
    #[test]
    fn test_invalid_package_json_fails() {
        let temp_dir = create_test_dir();
        fs::write(temp_dir.path().join("package.json"), "{not json").unwrap();

        stale_deps()
            .args(["check", temp_dir.path().to_str().unwrap()])
            .assert()
            .failure()
            .stderr(predicate::str::contains("failed to parse JSON"));
    }

    #[test]
    fn test_invalid_requirements_line_fails() {
        let temp_dir = create_test_dir();
        fs::write(temp_dir.path().join("requirements.txt"), "==1.2.3\n").unwrap();

        stale_deps()
            .args(["check", temp_dir.path().to_str().unwrap()])
            .assert()
            .failure()
            .stderr(predicate::str::contains("invalid requirement"));
    }
}

mod empty_reports {
    use super::*;

    /// A manifest with no dependencies produces an empty report without
    /// touching the network
    #[test]
    fn test_empty_manifest_table_output() {
        let temp_dir = create_test_dir();
        fs::write(
            temp_dir.path().join("package.json"),
            r#"{"name": "demo", "version": "1.0.0"}"#,
        )
        .unwrap();

        stale_deps()
            .args(["check", temp_dir.path().to_str().unwrap()])
            .assert()
            .success()
            .stdout(predicate::str::contains("0 dependencies"));
    }

    #[test]
    fn test_empty_manifest_json_output() {
        let temp_dir = create_test_dir();
        fs::write(
            temp_dir.path().join("package.json"),
            r#"{"name": "demo", "version": "1.0.0"}"#,
        )
        .unwrap();

        let output = stale_deps()
            .args(["check", "--json", temp_dir.path().to_str().unwrap()])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let json: serde_json::Value =
            serde_json::from_slice(&output).expect("Output should be valid JSON");

        assert!(json["rows"].as_array().unwrap().is_empty());
        assert_eq!(json["summary"]["total"].as_i64(), Some(0));
        assert_eq!(json["summary"]["fetch_errors"].as_i64(), Some(0));
    }

    #[test]
    fn test_quiet_mode_is_summary_only() {
        let temp_dir = create_test_dir();
        fs::write(temp_dir.path().join("package.json"), r#"{"name": "demo"}"#).unwrap();

        stale_deps()
            .args(["check", "--quiet", temp_dir.path().to_str().unwrap()])
            .assert()
            .success()
            .stdout(predicate::str::contains("Package").not())
            .stdout(predicate::str::contains("0 dependencies"));
    }
}
