mod common;

use common::{nugraph_cmd, sample_feed};
use predicates::prelude::*;
use tempfile::TempDir;

#[test]
fn test_export_json() {
    let tmp = TempDir::new().unwrap();
    sample_feed(tmp.path());

    nugraph_cmd()
        .current_dir(tmp.path())
        .args(["export", "-p", "App", "--version", "1.0.0", "--local-feed", "."])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""root": "App 1.0.0""#))
        .stdout(predicate::str::contains(r#""status": "unresolved""#))
        .stdout(predicate::str::contains(r#""reason": "not found""#))
        .stdout(predicate::str::contains(r#""to": "Core 1.0.0""#));
}

#[test]
fn test_export_puml_to_stdout() {
    let tmp = TempDir::new().unwrap();
    sample_feed(tmp.path());

    nugraph_cmd()
        .current_dir(tmp.path())
        .args([
            "export",
            "-p",
            "App",
            "--version",
            "1.0.0",
            "--local-feed",
            ".",
            "--format",
            "puml",
        ])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("@startuml"))
        .stdout(predicate::str::contains("Lib_2_0_0 --> Core_1_0_0"));

    assert!(!tmp.path().join("dependencies.puml").exists());
}

#[test]
fn test_export_unknown_format_fails() {
    nugraph_cmd()
        .args(["export", "--format", "dot"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown export format"));
}
