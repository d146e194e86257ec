//! The `bubbleshow` binary in plain mode.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn bubbleshow(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("bubbleshow").unwrap();
    cmd.arg("--data-dir")
        .arg(data_dir.path())
        .args(["--plain", "--interval-ms", "0"]);
    cmd
}

#[test]
fn plain_mode_plays_manual_values() {
    let dir = TempDir::new().unwrap();
    bubbleshow(&dir)
        .args(["--values", "3,1,2"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "input: 3 1 2\nsorted: 1 2 3\ncells: 3 1 2\n",
        ))
        .stdout(predicate::str::contains("swap [0] [1] -> 1 3 2"))
        .stdout(predicate::str::ends_with("done: 1 2 3\n"));
}

#[test]
fn plain_mode_drops_junk_tokens() {
    let dir = TempDir::new().unwrap();
    bubbleshow(&dir)
        .args(["--values", "5 x -1 2.5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("input: 5 -1"))
        .stdout(predicate::str::contains("done: -1 5"));
}

#[test]
fn plain_mode_generates_with_fixed_params() {
    let dir = TempDir::new().unwrap();
    bubbleshow(&dir)
        .args(["--length", "4", "--range-from", "7", "--range-to", "7", "--seed", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("input: 7 7 7 7"))
        .stdout(predicate::str::contains("done: 7 7 7 7"));
}

#[test]
fn invalid_range_fails() {
    let dir = TempDir::new().unwrap();
    bubbleshow(&dir)
        .args(["--range-from", "9", "--range-to", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("greater than"));
}

#[test]
fn first_run_writes_example_config_and_log() {
    let dir = TempDir::new().unwrap();
    bubbleshow(&dir).args(["--values", "1"]).assert().success();
    let config = std::fs::read_to_string(dir.path().join("config.toml")).unwrap();
    assert!(config.contains("[playback]"));
    assert!(dir.path().join("logs").join("bubbleshow.log").exists());
}
