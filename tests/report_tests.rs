//! Integration tests for the report command

#![allow(deprecated)]

use predicates::prelude::*;
use tempfile::TempDir;

mod common;
use common::{jambiato_cmd, write_source};

#[test]
fn test_report_empty_tree() {
    let temp = TempDir::new().unwrap();

    jambiato_cmd()
        .arg("report")
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No tags found"));
}

#[test]
fn test_report_lists_locations_in_path_then_line_order() {
    let temp = TempDir::new().unwrap();
    write_source(temp.path(), "b.txt", "1\n2\n3\n4\n5\n6\n$(1.0 - 1)\n");
    write_source(temp.path(), "a.txt", "1\n2\n$(1.0 - 1)\n");

    jambiato_cmd()
        .arg("report")
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Version 1.0 (target): 1 equation(s)"))
        .stdout(predicate::str::contains("1  a.txt:3  b.txt:7"));
}

#[test]
fn test_default_command_scans_positional_path() {
    let temp = TempDir::new().unwrap();
    write_source(temp.path(), "src/lib.rs", "// $(0.4.5 - 123 \\ 124 \\ 125)\nfn f() {}\n");

    let output = jambiato_cmd().arg(temp.path()).output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    for eq in ["123", "124", "125"] {
        assert!(stdout.contains(&format!("{}  src/lib.rs:1", eq)), "{}", stdout);
    }
}

#[test]
fn test_default_command_uses_current_directory() {
    let temp = TempDir::new().unwrap();
    write_source(temp.path(), "main.go", "// $(0.2 - 9)\n");

    jambiato_cmd()
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("9  main.go:1"));
}

#[test]
fn test_block_comment_tags_resolve_to_exact_line() {
    let temp = TempDir::new().unwrap();
    write_source(
        temp.path(),
        "state.rs",
        "fn a() {}\n/*\n * Accumulation\n * $(0.5.0 - 12.3)\n */\nfn b() {}\n",
    );

    jambiato_cmd()
        .arg("report")
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("12.3  state.rs:4"));
}

#[test]
fn test_strict_mode_ignores_tags_in_code() {
    let temp = TempDir::new().unwrap();
    write_source(temp.path(), "lib.rs", "let s = \"$(0.1 - 1)\";\n");

    jambiato_cmd()
        .arg("report")
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No tags found"));

    jambiato_cmd()
        .arg("report")
        .arg(temp.path())
        .arg("--permissive")
        .assert()
        .success()
        .stdout(predicate::str::contains("1  lib.rs:1"));
}

#[test]
fn test_excluded_directories_are_not_scanned() {
    let temp = TempDir::new().unwrap();
    write_source(temp.path(), "target/gen.rs", "// $(0.1 - 1)\n");
    write_source(temp.path(), ".hidden/x.rs", "// $(0.1 - 2)\n");
    write_source(temp.path(), "src/lib.rs", "// $(0.1 - 3)\n");

    jambiato_cmd()
        .arg("equations")
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::diff("0.1: 3\n"));
}

#[test]
fn test_report_json_output() {
    let temp = TempDir::new().unwrap();
    write_source(temp.path(), "a.rs", "// $(0.4.0 - 1)\n");
    write_source(temp.path(), "b.rs", "// $(0.5.0 - 1)\n");

    let output = jambiato_cmd()
        .arg("report")
        .arg(temp.path())
        .arg("--format")
        .arg("json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["target_version"], "0.5.0");
    assert_eq!(json["versions"].as_array().unwrap().len(), 2);
    assert_eq!(json["versions"][0]["version"], "0.4.0");
    assert_eq!(json["versions"][0]["equations"][0]["locations"][0]["file"], "a.rs");
    assert_eq!(json["versions"][0]["equations"][0]["locations"][0]["line"], 1);
    assert_eq!(json["conflicts"][0]["kind"], "multi_version_equation");
    assert_eq!(json["outdated"][0]["version"], "0.4.0");
}

#[test]
fn test_config_file_sets_target_and_comments() {
    let temp = TempDir::new().unwrap();
    write_source(
        temp.path(),
        "jambiato.toml",
        "target_version = \"0.6.0\"\n\n[comments.jam]\nline = [\"!!\"]\n",
    );
    write_source(temp.path(), "spec.jam", "x = $(0.5.0 - 2)\n!! $(0.6.0 - 3)\n");

    jambiato_cmd()
        .arg("report")
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Version 0.6.0 (target)"))
        .stdout(predicate::str::contains("0.5.0").not());
}

#[test]
fn test_config_env_var() {
    let temp = TempDir::new().unwrap();
    let config_dir = TempDir::new().unwrap();
    write_source(config_dir.path(), "custom.toml", "target_version = \"9.9\"\n");
    write_source(temp.path(), "a.rs", "// $(0.1 - 1)\n");

    jambiato_cmd()
        .env("JAMBIATO_CONFIG", config_dir.path().join("custom.toml"))
        .arg("report")
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Outdated tags (1, target 9.9)"));
}

#[test]
fn test_invalid_config_fails() {
    let temp = TempDir::new().unwrap();
    write_source(temp.path(), "jambiato.toml", "unknown_key = 1\n");

    jambiato_cmd()
        .arg("report")
        .arg(temp.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Failed to parse"));
}

#[test]
fn test_missing_root_fails() {
    let temp = TempDir::new().unwrap();

    jambiato_cmd()
        .arg("report")
        .arg(temp.path().join("missing"))
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Root path not found"));
}

#[test]
fn test_file_root_fails() {
    let temp = TempDir::new().unwrap();
    write_source(temp.path(), "a.rs", "");

    jambiato_cmd()
        .arg("report")
        .arg(temp.path().join("a.rs"))
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Not a directory"));
}

#[test]
fn test_verbose_logs_to_stderr_only() {
    let temp = TempDir::new().unwrap();
    write_source(temp.path(), "a.rs", "// $(0.1 - 1)\n");

    jambiato_cmd()
        .arg("report")
        .arg(temp.path())
        .arg("--verbose")
        .assert()
        .success()
        .stderr(predicate::str::contains("Scanned a.rs"))
        .stdout(predicate::str::contains("Scanned a.rs").not());
}
