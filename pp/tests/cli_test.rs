//! Binary tests for the `pp` CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// `pp` isolated from any user or project config
fn pp(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("pp").expect("pp binary");
    cmd.current_dir(home.path())
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_run_default_pipeline() {
    let home = TempDir::new().expect("temp dir");

    pp(&home)
        .arg("run")
        .assert()
        .success()
        .stdout(predicate::eq("[content=text] HELLO WORLD\n"));
}

#[test]
fn test_run_msg_source_json_three_times() {
    let home = TempDir::new().expect("temp dir");

    let output = pp(&home)
        .args(["run", "--source", "msg", "--format", "json", "-n", "3"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let stdout = String::from_utf8(output).expect("utf8");
    assert_eq!(stdout.lines().count(), 3);
    assert!(stdout.lines().all(|l| l.contains("\"MSG SEND\"")));
}

#[test]
fn test_run_unknown_sink_fails() {
    let home = TempDir::new().expect("temp dir");

    pp(&home)
        .args(["run", "--sink", "missing"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Unknown sink plugin 'missing'"));
}

#[test]
fn test_run_uses_project_config() {
    let home = TempDir::new().expect("temp dir");
    fs::write(
        home.path().join(".plugpipe.yml"),
        "pipeline:\n  source:\n    name: msg\n  transform:\n    name: noop\n",
    )
    .expect("write config");

    pp(&home)
        .arg("run")
        .assert()
        .success()
        .stdout(predicate::str::contains("Msg Send"));
}

#[test]
fn test_malformed_project_config_fails() {
    let home = TempDir::new().expect("temp dir");
    fs::write(home.path().join(".plugpipe.yml"), "pipeline:\n  sink: [oops]\n").expect("write config");

    pp(&home)
        .arg("run")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Failed to load config from .plugpipe.yml"));
}

#[test]
fn test_run_uses_user_config() {
    let home = TempDir::new().expect("temp dir");
    // XDG layout on Linux, Application Support on macOS
    for dir in [home.path().join(".config"), home.path().join("Library/Application Support")] {
        let plugpipe_dir = dir.join("plugpipe");
        fs::create_dir_all(&plugpipe_dir).expect("create config dir");
        fs::write(plugpipe_dir.join("plugpipe.yml"), "pipeline:\n  source:\n    name: msg\n").expect("write config");
    }

    pp(&home)
        .arg("run")
        .assert()
        .success()
        .stdout(predicate::eq("[content=text] MSG SEND\n"))
        .stderr(predicate::str::contains("Loaded config"));
}

#[test]
fn test_json_format_does_not_warn_about_console() {
    let home = TempDir::new().expect("temp dir");

    pp(&home)
        .args(["run", "--format", "json"])
        .assert()
        .success()
        .stderr(predicate::str::contains("replaced existing plugin").not())
        .stderr(predicate::str::contains("WARN").not());
}

#[test]
fn test_explicit_missing_config_fails() {
    let home = TempDir::new().expect("temp dir");

    pp(&home)
        .args(["-c", "nope.yml", "run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load configuration"));
}

#[test]
fn test_plugins_lists_builtins() {
    let home = TempDir::new().expect("temp dir");

    pp(&home)
        .arg("plugins")
        .assert()
        .success()
        .stdout(predicate::str::contains("hello"))
        .stdout(predicate::str::contains("msg"))
        .stdout(predicate::str::contains("upper"))
        .stdout(predicate::str::contains("noop"))
        .stdout(predicate::str::contains("console"));
}

#[test]
fn test_config_prints_defaults() {
    let home = TempDir::new().expect("temp dir");

    pp(&home)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("name: hello"))
        .stdout(predicate::str::contains("name: upper"))
        .stdout(predicate::str::contains("name: console"));
}
