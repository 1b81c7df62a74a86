//! CLI integration tests for the reportgen command-line interface.
//!
//! These tests verify:
//! - Help text is displayed correctly
//! - Report data files are validated and rendered without the UI
//! - Config commands respect `--config-dir` / `REPORTGEN_CONFIG_DIR`
//!
//! Every test runs against a temporary config directory and working
//! directory so the user's own configuration is never read or touched.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const VALID_REPORT: &str = r#"{
  "examTitle": "2학기 중간고사",
  "studentName": "이하늘",
  "score": 92,
  "examDate": "2025년 10월 20일",
  "difficultyStats": [{"label": "중", "total": 7, "correct": 6}]
}"#;

/// Get a command for the reportgen binary, isolated in `dir`.
fn reportgen(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("reportgen").unwrap();
    cmd.current_dir(dir.path())
        .env("REPORTGEN_CONFIG_DIR", dir.path().join("config"))
        .env_remove("GEMINI_API_KEY")
        .env_remove("API_KEY");
    cmd
}

fn write(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

// ─────────────────────────────────────────────────────────────────────────────
// Help and Version Tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_help_displays() {
    let dir = TempDir::new().unwrap();
    reportgen(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Reportgen"))
        .stdout(predicate::str::contains("exam report generator"));
}

#[test]
fn test_version_displays() {
    let dir = TempDir::new().unwrap();
    reportgen(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("reportgen"));
}

#[test]
fn test_help_lists_subcommands() {
    let dir = TempDir::new().unwrap();
    reportgen(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("tui"))
        .stdout(predicate::str::contains("render"))
        .stdout(predicate::str::contains("validate"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_unknown_subcommand_rejected() {
    let dir = TempDir::new().unwrap();
    reportgen(&dir)
        .arg("chat")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Validate
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_validate_accepts_sparse_report() {
    let dir = TempDir::new().unwrap();
    let file = write(dir.path(), "report.json", VALID_REPORT);
    reportgen(&dir)
        .arg("validate")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("is valid"))
        .stdout(predicate::str::contains("이하늘 학생"));
}

#[test]
fn test_validate_verbose_shows_rates() {
    let dir = TempDir::new().unwrap();
    let file = write(dir.path(), "report.json", VALID_REPORT);
    reportgen(&dir)
        .args(["--verbose", "validate"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("86%"));
}

#[test]
fn test_validate_rejects_missing_score() {
    let dir = TempDir::new().unwrap();
    let file = write(dir.path(), "report.json", r#"{"examTitle": "T"}"#);
    reportgen(&dir)
        .arg("validate")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to import"));
}

#[test]
fn test_validate_rejects_non_json() {
    let dir = TempDir::new().unwrap();
    let file = write(dir.path(), "report.json", "not json");
    reportgen(&dir)
        .arg("validate")
        .arg(&file)
        .assert()
        .failure();
}

#[test]
fn test_validate_json_output() {
    let dir = TempDir::new().unwrap();
    let file = write(dir.path(), "report.json", VALID_REPORT);
    reportgen(&dir)
        .args(["--json", "validate"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"valid\": true"))
        .stdout(predicate::str::contains("\"score\": 92"));

    let bad = write(dir.path(), "bad.json", "[]");
    reportgen(&dir)
        .args(["--json", "validate"])
        .arg(&bad)
        .assert()
        .failure()
        .stdout(predicate::str::contains("\"valid\": false"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Render
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_render_to_stdout() {
    let dir = TempDir::new().unwrap();
    let file = write(dir.path(), "report.json", VALID_REPORT);
    reportgen(&dir)
        .arg("render")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("<!DOCTYPE html>"))
        .stdout(predicate::str::contains("2학기 중간고사"))
        .stdout(predicate::str::contains("86%"));
}

#[test]
fn test_render_html_file() {
    let dir = TempDir::new().unwrap();
    let file = write(dir.path(), "report.json", VALID_REPORT);
    let out = dir.path().join("out.html");
    reportgen(&dir)
        .arg("render")
        .arg(&file)
        .arg("--html")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("HTML written"));

    let html = std::fs::read_to_string(&out).unwrap();
    assert!(html.contains("이하늘 학생"));
}

#[test]
fn test_render_rejects_invalid_file() {
    let dir = TempDir::new().unwrap();
    let file = write(dir.path(), "report.json", r#"{"score": 1}"#);
    reportgen(&dir)
        .arg("render")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to import"));
}

#[test]
fn test_render_png_reports_missing_browser() {
    let dir = TempDir::new().unwrap();
    let file = write(dir.path(), "report.json", VALID_REPORT);
    std::fs::create_dir_all(dir.path().join("config")).unwrap();
    write(
        &dir.path().join("config"),
        "config.toml",
        "[export]\nbrowser = \"reportgen-test-no-such-browser\"\n",
    );
    reportgen(&dir)
        .arg("render")
        .arg(&file)
        .arg("--png")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to export"));
}

#[test]
fn test_render_output_requires_png() {
    let dir = TempDir::new().unwrap();
    let file = write(dir.path(), "report.json", VALID_REPORT);
    reportgen(&dir)
        .arg("render")
        .arg(&file)
        .args(["--output", "x.png"])
        .assert()
        .failure();
}

// ─────────────────────────────────────────────────────────────────────────────
// Config
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_config_path_uses_config_dir() {
    let dir = TempDir::new().unwrap();
    reportgen(&dir)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_dir_flag_overrides_env() {
    let dir = TempDir::new().unwrap();
    let other = dir.path().join("elsewhere");
    reportgen(&dir)
        .arg("--config-dir")
        .arg(&other)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("elsewhere"));
}

#[test]
fn test_config_show_defaults() {
    let dir = TempDir::new().unwrap();
    reportgen(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No config files loaded"))
        .stdout(predicate::str::contains("gemini-2.5-flash"))
        .stdout(predicate::str::contains("API key: not set"));
}

#[test]
fn test_config_show_reads_project_file() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "reportgen.toml", "[ai]\nmodel = \"gemini-test\"\n");
    reportgen(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Config files:"))
        .stdout(predicate::str::contains("gemini-test"));
}

#[test]
fn test_set_and_clear_key() {
    let dir = TempDir::new().unwrap();

    reportgen(&dir)
        .args(["config", "set-key"])
        .write_stdin("secret-key\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("API key stored"));

    let stored = std::fs::read_to_string(dir.path().join("config").join("credential")).unwrap();
    assert_eq!(stored.trim(), "secret-key");

    reportgen(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("API key: set"))
        .stdout(predicate::str::contains("secret-key").not());

    reportgen(&dir)
        .args(["config", "clear-key"])
        .assert()
        .success()
        .stdout(predicate::str::contains("removed"));

    assert!(!dir.path().join("config").join("credential").exists());
}

#[test]
fn test_set_key_empty_input_aborts() {
    let dir = TempDir::new().unwrap();
    reportgen(&dir)
        .args(["config", "set-key"])
        .write_stdin("\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("aborting"));

    assert!(!dir.path().join("config").join("credential").exists());
}
