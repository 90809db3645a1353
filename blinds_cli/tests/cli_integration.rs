use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::tempdir;

// Short travel times so simulated runs finish quickly
fn write_valid_config(dir: &tempfile::TempDir) -> PathBuf {
    let toml = r#"
[drive]
open_duration_ms = 300
close_duration_ms = 300
tilt_duration_ms = 200
motor_warmup_delay_ms = 10

[buttons]
hold_repeat_wait_ms = 60
deferred_tilt_settle_ms = 40
"#;
    let path = dir.path().join("cfg.toml");
    fs::write(&path, toml).unwrap();
    path
}

fn blinds_cmd(dir: &tempfile::TempDir, cfg: &PathBuf) -> Command {
    let mut cmd = Command::cargo_bin("blinds_cli").unwrap();
    cmd.arg("--config")
        .arg(cfg)
        .arg("--state-file")
        .arg(dir.path().join("state.toml"));
    cmd
}

fn json_summary(output: &std::process::Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let line = stdout.lines().last().expect("summary line");
    serde_json::from_str(line).expect("valid JSON summary")
}

#[test]
fn help_prints_usage() {
    Command::cargo_bin("blinds_cli")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn missing_subcommand_is_a_usage_error() {
    Command::cargo_bin("blinds_cli")
        .unwrap()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn move_to_closed_settles_and_reports_json() {
    let dir = tempdir().unwrap();
    let cfg = write_valid_config(&dir);

    let output = blinds_cmd(&dir, &cfg)
        .args(["--json", "move", "--position", "1.0"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let summary = json_summary(&output);
    assert!((summary["position"].as_f64().unwrap() - 1.0).abs() < 1e-6);
    assert_eq!(summary["state"], "idle");
}

#[test]
fn state_persists_between_runs() {
    let dir = tempdir().unwrap();
    let cfg = write_valid_config(&dir);

    blinds_cmd(&dir, &cfg)
        .args(["move", "--position", "1.0"])
        .assert()
        .success();

    // a fresh process restores the persisted estimate
    let output = blinds_cmd(&dir, &cfg)
        .args(["--json", "stop"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let summary = json_summary(&output);
    assert!((summary["position"].as_f64().unwrap() - 1.0).abs() < 1e-6);
}

#[test]
fn combined_move_applies_deferred_tilt() {
    let dir = tempdir().unwrap();
    let cfg = write_valid_config(&dir);

    let output = blinds_cmd(&dir, &cfg)
        .args([
            "--json", "move", "--position", "0.5", "--tilt", "0.5",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    // real-clock ticks land the estimate within a couple of tick periods
    let summary = json_summary(&output);
    assert!((summary["tilt"].as_f64().unwrap() - 0.5).abs() < 0.2);
    assert_eq!(summary["state"], "idle");
}

#[test]
fn button_gesture_closes_the_blind() {
    let dir = tempdir().unwrap();
    let cfg = write_valid_config(&dir);

    let output = blinds_cmd(&dir, &cfg)
        .args([
            "--json", "button", "--kind", "down", "--press", "single",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let summary = json_summary(&output);
    assert!((summary["position"].as_f64().unwrap() - 1.0).abs() < 1e-6);
    assert!((summary["tilt"].as_f64().unwrap() - 1.0).abs() < 1e-6);
}

#[test]
fn calibrate_lands_on_an_extreme() {
    let dir = tempdir().unwrap();
    let cfg = write_valid_config(&dir);

    let output = blinds_cmd(&dir, &cfg)
        .args(["--json", "calibrate"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let summary = json_summary(&output);
    let position = summary["position"].as_f64().unwrap();
    assert!(position.abs() < 1e-6 || (position - 1.0).abs() < 1e-6);
}

#[test]
fn noop_move_settles_immediately() {
    let dir = tempdir().unwrap();
    let cfg = write_valid_config(&dir);

    blinds_cmd(&dir, &cfg)
        .arg("move")
        .assert()
        .success()
        .stdout(predicate::str::contains("settled:"));
}

#[test]
fn invalid_config_is_rejected() {
    let dir = tempdir().unwrap();
    let cfg = dir.path().join("bad.toml");
    fs::write(&cfg, "[drive]\nclose_duration_ms = 0\n").unwrap();

    blinds_cmd(&dir, &cfg)
        .arg("stop")
        .assert()
        .failure()
        .stderr(predicate::str::contains("close_duration_ms"));
}
