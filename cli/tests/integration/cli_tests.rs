//! CLI structure, global flags and exit codes.

#![allow(clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// `envmanager` with the store and startup file inside `home`.
pub fn envmanager(home: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("envmanager"));
    cmd.env("NO_COLOR", "1")
        .env("ENVMANAGER_HOME", home.path().join("store"))
        .env("ENVMANAGER_SHELL_RC", home.path().join(".bashrc"))
        .env_remove("ENVMANAGER_LOG")
        .env_remove("RUST_LOG");
    cmd
}

pub fn home() -> TempDir {
    tempfile::tempdir().expect("tempdir")
}

#[test]
fn test_cli_no_args_shows_help_and_exits_two() {
    let home = home();
    envmanager(&home)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn test_cli_help_lists_command_groups() {
    let home = home();
    envmanager(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("env"))
        .stdout(predicate::str::contains("profile"))
        .stdout(predicate::str::contains("service"))
        .stdout(predicate::str::contains("docker"));
}

#[test]
fn test_cli_version_flag_shows_version() {
    let home = home();
    envmanager(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("envmanager"));
}

#[test]
fn test_unknown_subcommand_is_usage_error() {
    let home = home();
    envmanager(&home).arg("frobnicate").assert().code(2);
}

#[test]
fn test_profile_help_lists_operations() {
    let home = home();
    envmanager(&home)
        .args(["profile", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("create"))
        .stdout(predicate::str::contains("load"))
        .stdout(predicate::str::contains("delete"));
}

#[test]
fn test_no_color_env_value_is_not_parsed_as_flag() {
    let home = home();
    for value in ["1", "true", "yes", ""] {
        envmanager(&home)
            .env("NO_COLOR", value)
            .args(["profile", "list"])
            .assert()
            .success()
            .stdout(predicate::str::contains("No profiles"));
    }
}

#[test]
fn test_verbose_logs_have_no_ansi_when_piped() {
    let home = home();
    envmanager(&home)
        .args(["profile", "list", "-v"])
        .assert()
        .success()
        .stderr(predicate::str::contains("profiles loaded"))
        .stderr(predicate::str::contains("\u{1b}[").not());
}

#[test]
fn test_corrupt_store_exit_code_and_file_untouched() {
    let home = home();
    let store = home.path().join("store");
    std::fs::create_dir_all(&store).expect("mkdir");
    std::fs::write(store.join("profiles.json"), "{oops").expect("write");

    envmanager(&home)
        .args(["profile", "list"])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("profiles.json"));
    envmanager(&home)
        .args(["profile", "create", "dev", r#"{"A":"1"}"#])
        .assert()
        .code(5);
    assert_eq!(
        std::fs::read_to_string(store.join("profiles.json")).expect("read"),
        "{oops"
    );
}

#[test]
fn test_json_error_object_on_stdout() {
    let home = home();
    let output = envmanager(&home)
        .args(["profile", "show", "ghost", "--json"])
        .assert()
        .code(3)
        .get_output()
        .stdout
        .clone();
    let v: serde_json::Value = serde_json::from_slice(&output).expect("valid JSON");
    assert_eq!(v["error"], true);
    assert_eq!(v["code"], "not_found");
    assert!(v["message"].as_str().expect("message").contains("ghost"));
}

#[test]
fn test_verbose_logs_go_to_stderr() {
    let home = home();
    envmanager(&home)
        .args(["profile", "list", "--json", "-v"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("{"))
        .stderr(predicate::str::contains("profiles loaded"));
}
