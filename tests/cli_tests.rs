//! `snapctl` command-line regression tests.

use assert_cmd::Command;
use predicates::prelude::*;
use snapcheck::store;
use tempfile::TempDir;

fn snapctl(root: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("snapctl").unwrap();
    cmd.arg("--root").arg(root.path());
    cmd
}

fn seeded() -> TempDir {
    let root = TempDir::new().unwrap();
    store::write(&root.path().join("Alpha.snap.txt"), b"alpha").unwrap();
    store::write(&root.path().join("Beta").join("one.snap.txt"), b"one").unwrap();
    store::write(&root.path().join("Beta").join("two.snap.txt"), b"two").unwrap();
    root
}

#[test]
fn test_list_prints_relative_paths() {
    let root = seeded();
    snapctl(&root)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Alpha.snap.txt"))
        .stdout(predicate::str::contains("Beta/one.snap.txt"))
        .stdout(predicate::str::contains("Beta/two.snap.txt"));
}

#[test]
fn test_show_prints_snapshot() {
    let root = seeded();
    snapctl(&root)
        .args(["show", "Beta/one"])
        .assert()
        .success()
        .stdout(predicate::str::contains("one.snap.txt"))
        .stdout(predicate::str::contains("one\n"));
}

#[test]
fn test_show_missing_snapshot_fails() {
    let root = seeded();
    snapctl(&root)
        .args(["show", "Gamma"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("could not read previous snapshot"));
}

#[test]
fn test_clean_identity_keeps_others() {
    let root = seeded();
    snapctl(&root).args(["clean", "Beta"]).assert().success();

    assert!(!root.path().join("Beta").exists());
    assert!(root.path().join("Alpha.snap.txt").exists());
}

#[test]
fn test_clean_all() {
    let root = seeded();
    snapctl(&root)
        .args(["clean", "--all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cleaned"));

    assert!(!root.path().exists());
}

#[test]
fn test_clean_requires_identity_or_all() {
    let root = seeded();
    snapctl(&root).arg("clean").assert().failure();
}
