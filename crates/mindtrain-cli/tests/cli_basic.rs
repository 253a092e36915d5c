//! Basic CLI E2E tests.
//!
//! Each test points the binary at a config file inside a temp dir so nothing
//! touches the real config directory.

use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn mindtrain(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("mindtrain").unwrap();
    cmd.env("MINDTRAIN_CONFIG", config_path(dir))
        .env("MINDTRAIN_LOG", "off");
    cmd
}

fn config_path(dir: &TempDir) -> PathBuf {
    dir.path().join("config.toml")
}

fn final_snapshot(stdout: &[u8]) -> serde_json::Value {
    let text = String::from_utf8_lossy(stdout);
    let start = text.find("\n{\n").map(|i| i + 1).unwrap_or(0);
    serde_json::from_str(&text[start..]).unwrap()
}

#[test]
fn exercises_lists_the_catalogue() {
    let dir = TempDir::new().unwrap();
    let output = mindtrain(&dir).arg("exercises").output().unwrap();
    assert!(output.status.success());
    let list: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let ids: Vec<_> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids, ["sustained", "selective", "divided"]);
}

#[test]
fn simulate_reaches_the_quiz() {
    let dir = TempDir::new().unwrap();
    let output = mindtrain(&dir)
        .args(["session", "simulate", "--ticks", "1500"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.matches("\"type\":\"phase_switched\"").count(), 1);

    let snapshot = final_snapshot(&output.stdout);
    assert_eq!(snapshot["state"], "quiz");
    assert_eq!(snapshot["remaining_secs"], 1500);
    assert_eq!(snapshot["switch_trigger"], "exercises_exhausted");
}

#[test]
fn simulate_can_skip_the_completion_pause() {
    let dir = TempDir::new().unwrap();
    let output = mindtrain(&dir)
        .args(["session", "simulate", "--ticks", "200", "--complete-exercises"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let snapshot = final_snapshot(&output.stdout);
    assert_eq!(snapshot["state"], "quiz");
    // Three 60 s exercises with no dwell in between.
    assert_eq!(snapshot["remaining_secs"], 3000 - 200);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\"type\":\"focus_exhausted\""));
}

#[test]
fn full_simulation_completes() {
    let dir = TempDir::new().unwrap();
    mindtrain(&dir)
        .args(["session", "simulate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"type\":\"session_completed\""))
        .stdout(predicate::str::contains("\"state\": \"completed\""));
}

#[test]
fn session_run_stops_at_max_secs() {
    let dir = TempDir::new().unwrap();
    mindtrain(&dir)
        .args(["session", "run", "--speed", "100", "--max-secs", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"type\":\"session_started\""))
        .stdout(predicate::str::contains("\"type\":\"session_ended\""))
        .stderr(predicate::str::contains("Session Started"))
        .stderr(predicate::str::contains("session ended"));
}

#[test]
fn session_run_rejects_bad_speed() {
    let dir = TempDir::new().unwrap();
    mindtrain(&dir)
        .args(["session", "run", "--speed", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn quiz_scores_answers() {
    let dir = TempDir::new().unwrap();
    mindtrain(&dir)
        .args(["quiz", "--answers", "0,1,1,0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("score: 3/4"));
}

#[test]
fn quiz_rejects_out_of_range_option() {
    let dir = TempDir::new().unwrap();
    mindtrain(&dir)
        .args(["quiz", "--answers", "7"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of range"));
}

#[test]
fn calendar_renders_month() {
    let dir = TempDir::new().unwrap();
    mindtrain(&dir)
        .args(["calendar", "--month", "2026-02"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("February 2026\n"))
        .stdout(predicate::str::contains("Sun"))
        .stdout(predicate::str::contains("28"));
}

#[test]
fn calendar_rejects_bad_month() {
    let dir = TempDir::new().unwrap();
    mindtrain(&dir)
        .args(["calendar", "--month", "2026-13"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid month"));
}

#[test]
fn stats_reports_the_week() {
    let dir = TempDir::new().unwrap();
    let output = mindtrain(&dir).arg("stats").output().unwrap();
    assert!(output.status.success());
    let stats: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(stats["days"].as_array().unwrap().len(), 7);
    assert_eq!(stats["completed_days"], 0);
}

#[test]
fn config_set_persists() {
    let dir = TempDir::new().unwrap();
    mindtrain(&dir)
        .args(["config", "get", "session.tick_interval_ms"])
        .assert()
        .success()
        .stdout("1000\n");
    mindtrain(&dir)
        .args(["config", "set", "session.tick_interval_ms", "250"])
        .assert()
        .success()
        .stdout("ok\n");
    assert!(config_path(&dir).exists());
    mindtrain(&dir)
        .args(["config", "get", "session.tick_interval_ms"])
        .assert()
        .success()
        .stdout("250\n");
}

#[test]
fn config_rejects_unknown_key() {
    let dir = TempDir::new().unwrap();
    mindtrain(&dir)
        .args(["config", "set", "session.colour", "blue"])
        .assert()
        .failure();
    assert!(!config_path(&dir).exists());
}
