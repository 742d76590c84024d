//! Integration tests for the check command

#![allow(deprecated)]

use predicates::prelude::*;
use tempfile::TempDir;

mod common;
use common::{jambiato_cmd, write_source};

#[test]
fn test_check_clean_tree() {
    let temp = TempDir::new().unwrap();
    write_source(temp.path(), "a.rs", "// $(0.1 - 1)\n// $(0.1 - 2)\n");

    jambiato_cmd()
        .arg("check")
        .arg(temp.path())
        .arg("--strict")
        .assert()
        .success()
        .stdout(predicate::str::diff("No issues found\n"));
}

#[test]
fn test_check_multi_version_equation() {
    let temp = TempDir::new().unwrap();
    write_source(temp.path(), "a.rs", "// $(0.4.0 - 7)\n");
    write_source(temp.path(), "b.rs", "// $(0.5.0 - 7)\n");

    jambiato_cmd()
        .arg("check")
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "[warning] multi-version equation: equation 7 is tagged under versions 0.4.0, 0.5.0 (a.rs:1, b.rs:1)",
        ))
        .stdout(predicate::str::contains("Outdated tags (1, target 0.5.0)"));
}

#[test]
fn test_check_strict_fails_on_warnings() {
    let temp = TempDir::new().unwrap();
    write_source(temp.path(), "a.rs", "// $(0.1 - 5 \\ 5)\n");

    jambiato_cmd()
        .arg("check")
        .arg(temp.path())
        .arg("--strict")
        .assert()
        .failure()
        .code(3)
        .stdout(predicate::str::contains("[warning] duplicate location"))
        .stderr(predicate::str::contains("Checks failed: 1 blocking issue(s)"));
}

#[test]
fn test_check_malformed_tag_is_not_fatal() {
    let temp = TempDir::new().unwrap();
    write_source(temp.path(), "a.py", "# $(0.1 - 5 \\ )\n# $(0.1 - 6)\n");

    jambiato_cmd()
        .arg("check")
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Malformed tags (1):"))
        .stdout(predicate::str::contains("a.py:1: empty equation at position 2"));
}

#[test]
fn test_check_two_tags_on_one_line() {
    let temp = TempDir::new().unwrap();
    write_source(temp.path(), "a.rs", "// $(0.1 - 1) $(0.1 - 2)\n");

    jambiato_cmd()
        .arg("check")
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("a.rs:1: 2 tags on one line"));
}

#[test]
fn test_check_sequence_gap_is_informational() {
    let temp = TempDir::new().unwrap();
    write_source(temp.path(), "a.rs", "// $(0.1 - 1)\n// $(0.1 - 4)\n");

    jambiato_cmd()
        .arg("check")
        .arg(temp.path())
        .arg("--strict")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "[info] non-monotonic sequence: version 0.1: equations 2..3 are untagged (2 between 1 and 4)",
        ));
}

#[test]
fn test_check_json_output() {
    let temp = TempDir::new().unwrap();
    write_source(temp.path(), "a.rs", "// $( - 1)\n");

    let output = jambiato_cmd()
        .arg("check")
        .arg(temp.path())
        .arg("--format")
        .arg("json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["blocking_issues"], 1);
    assert_eq!(json["parse_errors"][0]["error"]["reason"], "empty_version");
    assert_eq!(json["parse_errors"][0]["location"]["line"], 1);
}
