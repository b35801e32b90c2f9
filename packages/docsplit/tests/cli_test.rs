//! Tests for the docsplit binary.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn workspace() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join(".docsplit")).unwrap();
    fs::write(
        dir.path().join("doc.json"),
        r#"{"doc": {"title": "Doc", "items": [{"n": 1}, {"n": 2}]}}"#,
    )
    .unwrap();
    dir
}

fn docsplit() -> Command {
    let mut cmd = Command::cargo_bin("docsplit").unwrap();
    cmd.env_remove("DOCSPLIT_ROOT");
    cmd
}

#[test]
fn test_split_command() {
    let dir = workspace();

    docsplit()
        .current_dir(dir.path())
        .args(["split", "-f", "doc.json", "-e", "doc.items.*"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Files written: 3"));

    assert!(dir.path().join("doc/items/00001__item.json").is_file());
    assert!(dir.path().join(".docsplit/_trash/doc.json.bk").is_file());
}

#[test]
fn test_plan_command_changes_nothing() {
    let dir = workspace();

    docsplit()
        .current_dir(dir.path())
        .args(["plan", "-f", "doc.json", "-e", "doc.items.*"])
        .assert()
        .success()
        .stdout(predicate::str::contains("6 actions"))
        .stdout(predicate::str::contains("00000__item.json"));

    assert!(!dir.path().join("doc").exists());
    assert!(!dir.path().join(".docsplit/_trash").exists());
}

#[test]
fn test_split_outside_workspace_fails() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("doc.json"), r#"{"doc": {"items": [1]}}"#).unwrap();

    docsplit()
        .current_dir(dir.path())
        .args(["split", "-f", "doc.json", "-e", "doc.items.*"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not inside a docsplit workspace"));
}

#[test]
fn test_split_too_deep_path_fails() {
    let dir = workspace();

    docsplit()
        .current_dir(dir.path())
        .args(["split", "-f", "doc.json", "-e", "doc.a.b.c"])
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("Error:"));

    assert!(dir.path().join("doc.json").is_file());
}

#[test]
fn test_missing_file_fails() {
    docsplit()
        .args(["split", "-f", "/nonexistent/doc.json", "-e", "doc.items.*"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("file does not exist"));
}

#[test]
fn test_plan_uses_alias_overrides_of_given_root() {
    let dir = workspace();
    fs::write(
        dir.path().join(".docsplit").join("aliases.yaml"),
        "aliases:\n  doc.items: entry\n",
    )
    .unwrap();

    docsplit()
        .current_dir(dir.path())
        .args(["plan", "-f", "doc.json", "-e", "doc.items.*", "--root", "."])
        .assert()
        .success()
        .stdout(predicate::str::contains("00000__entry.json"));
}

#[test]
fn test_plan_missing_file_fails() {
    docsplit()
        .args(["plan", "-f", "/nonexistent/doc.json", "-e", "doc.items.*"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("file does not exist"));
}
