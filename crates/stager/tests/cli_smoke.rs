//! Smoke tests for the `stager` binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn repository() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("build.toml"),
        "solution = \"src/App.sln\"\n\n[[projects]]\nname = \"App\"\n",
    )
    .unwrap();
    dir
}

fn stager(root: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("stager").unwrap();
    cmd.env_remove("RUST_LOG")
        .env("STAGER_COLOR", "never")
        .arg("--root")
        .arg(root.path());
    cmd
}

#[test]
fn help_lists_commands() {
    Command::cargo_bin("stager")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("plan"))
        .stdout(predicate::str::contains("list"));
}

#[test]
fn list_prints_standard_targets() {
    let root = repository();

    stager(&root)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Targets"))
        .stdout(predicate::str::contains("Package"))
        .stdout(predicate::str::contains("(depends on: Publish)"));
}

#[test]
fn plan_prints_ordered_targets() {
    let root = repository();

    stager(&root)
        .args(["plan", "Publish"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "[1/3] Clean\n[2/3] Restore\n[3/3] Publish",
        ));
}

#[test]
fn unknown_target_fails() {
    let root = repository();

    stager(&root)
        .args(["plan", "Deploy"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error: "))
        .stderr(predicate::str::contains("Deploy"));
}

#[test]
fn missing_manifest_fails() {
    let root = TempDir::new().unwrap();

    stager(&root)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("build.toml"));
}
