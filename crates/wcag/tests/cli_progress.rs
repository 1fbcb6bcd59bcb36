mod cli_support;

use cli_support::{run_cli, run_cli_json, run_cli_json_error, run_cli_ok};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use tempfile::TempDir;

#[derive(Debug, Deserialize)]
struct ProgressResult {
    percent: u8,
    checked: usize,
    total: usize,
    label: String,
    levels: Vec<LevelResult>,
}

#[derive(Debug, Deserialize)]
struct LevelResult {
    level: String,
    checked: usize,
    total: usize,
}

#[derive(Debug, Deserialize)]
struct ImportResult {
    applied: usize,
    skipped: Vec<String>,
}

fn progress(home: &std::path::Path) -> ProgressResult {
    run_cli_json(home, &["progress", "show", "--json"])
}

#[test]
fn test_check_persists_progress() {
    let home = TempDir::new().expect("create temp home");

    let stdout = run_cli_ok(home.path(), &["check", "1.4.3", "sc-1-1-1"]);
    assert!(stdout.contains("[x] 1.4.3 Contrast (Minimum)"));
    assert!(home.path().join("progress.json").exists());

    let result = progress(home.path());
    assert_eq!(result.checked, 2);
    assert_eq!(result.total, 78);
    assert_eq!(result.percent, 3);
    assert_eq!(result.label, "3% (2/78)");
    let a = result.levels.iter().find(|l| l.level == "A").expect("level A");
    assert_eq!((a.checked, a.total), (1, 30));
    let aa = result.levels.iter().find(|l| l.level == "AA").expect("level AA");
    assert_eq!((aa.checked, aa.total), (1, 20));

    run_cli_ok(home.path(), &["uncheck", "1.4.3"]);
    assert_eq!(progress(home.path()).checked, 1);

    run_cli_ok(home.path(), &["progress", "reset"]);
    assert_eq!(progress(home.path()).checked, 0);
}

#[test]
fn test_check_unknown_criterion_changes_nothing() {
    let home = TempDir::new().expect("create temp home");
    let output = run_cli(home.path(), &["check", "1.4.3", "9.9.9"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown criteria: 9.9.9"), "stderr: {}", stderr);
    assert!(!home.path().join("progress.json").exists());
}

#[test]
fn test_export_import_round_trip() {
    let source = TempDir::new().expect("create source home");
    let target = TempDir::new().expect("create target home");
    let export_path = source.path().join("export.json");
    let export_str = export_path.to_string_lossy().to_string();

    run_cli_ok(source.path(), &["check", "2.1.1", "1.4.6"]);
    run_cli_ok(source.path(), &["progress", "export", export_str.as_str()]);

    let exported: BTreeMap<String, bool> =
        serde_json::from_str(&fs::read_to_string(&export_path).expect("read export"))
            .expect("parse export");
    assert_eq!(exported.len(), 78);
    assert_eq!(exported.get("sc-2-1-1"), Some(&true));
    assert_eq!(exported.get("sc-1-1-1"), Some(&false));

    let outcome: ImportResult = run_cli_json(
        target.path(),
        &["progress", "import", export_str.as_str(), "--json"],
    );
    assert_eq!(outcome.applied, 2);
    assert!(outcome.skipped.is_empty());
    assert_eq!(progress(target.path()).checked, 2);
}

#[test]
fn test_import_skips_unknown_ids() {
    let home = TempDir::new().expect("create temp home");
    let path = home.path().join("partial.json");
    fs::write(&path, r#"{"sc-1-4-3": true, "sc-0-0-0": true}"#).expect("write import");
    let path_str = path.to_string_lossy().to_string();

    let outcome: ImportResult =
        run_cli_json(home.path(), &["progress", "import", path_str.as_str(), "--json"]);
    assert_eq!(outcome.applied, 1);
    assert_eq!(outcome.skipped, vec!["sc-0-0-0"]);
    assert_eq!(progress(home.path()).checked, 1);

    let again: ImportResult =
        run_cli_json(home.path(), &["progress", "import", path_str.as_str(), "--json"]);
    assert_eq!(again.applied, 0);
    assert_eq!(progress(home.path()).checked, 1);
}

#[test]
fn test_import_json_error_malformed_file() {
    let home = TempDir::new().expect("create temp home");
    run_cli_ok(home.path(), &["check", "1.1.1"]);

    let path = home.path().join("broken.json");
    fs::write(&path, "{ not json").expect("write import");
    let path_str = path.to_string_lossy().to_string();

    let value = run_cli_json_error(
        home.path(),
        &["progress", "import", path_str.as_str(), "--json"],
    );
    let message = value["error"].as_str().unwrap_or_default();
    assert!(
        message.contains("Could not import progress"),
        "unexpected error message: {}",
        message
    );
    assert!(value["suggestions"].as_array().is_some_and(|s| !s.is_empty()));
    assert_eq!(progress(home.path()).checked, 1);
}

#[test]
fn test_theme_toggle_persists() {
    let home = TempDir::new().expect("create temp home");
    assert_eq!(run_cli_ok(home.path(), &["theme"]).trim(), "light");
    assert_eq!(run_cli_ok(home.path(), &["theme", "toggle"]).trim(), "dark");
    assert_eq!(run_cli_ok(home.path(), &["theme", "show"]).trim(), "dark");

    let saved = fs::read_to_string(home.path().join("preferences.toml")).expect("read prefs");
    assert!(saved.contains("theme = \"dark\""));

    assert_eq!(run_cli_ok(home.path(), &["theme", "light"]).trim(), "light");
}

#[test]
fn test_config_json_reports_home_layout() {
    let home = TempDir::new().expect("create temp home");
    fs::write(home.path().join("config.toml"), "page_size = 8\n").expect("write config");

    let value: serde_json::Value = run_cli_json(home.path(), &["config", "--json"]);
    let home_str = home.path().to_string_lossy().to_string();
    assert_eq!(value["home"].as_str(), Some(home_str.as_str()));
    assert_eq!(value["config"]["exists"].as_bool(), Some(true));
    assert_eq!(value["progress"]["exists"].as_bool(), Some(false));
    assert_eq!(value["page_size"].as_u64(), Some(8));
    assert_eq!(value["tick_rate_ms"].as_u64(), Some(250));
    assert!(value["checklist"].is_null());
}

#[test]
fn test_custom_checklist_from_config() {
    let home = TempDir::new().expect("create temp home");
    fs::write(
        home.path().join("mini.toml"),
        r#"title = "Mini"

[[sections]]
heading = "1. Perceivable"

[[sections.guidelines]]
heading = "1.4 Distinguishable"

[[sections.guidelines.criteria]]
number = "1.4.3"
title = "Contrast (Minimum)"
level = "AA"
description = "Text has a contrast ratio of at least 4.5:1."
"#,
    )
    .expect("write checklist");
    fs::write(home.path().join("config.toml"), "checklist = \"mini.toml\"\n").expect("write config");

    let result = progress(home.path());
    assert_eq!(result.total, 1);
}
