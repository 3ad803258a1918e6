//! `envmanager profile ...` end to end.

#![allow(clippy::expect_used)]

use predicates::prelude::*;
use serde_json::Value;

use crate::cli_tests::{envmanager, home};

fn json_stdout(cmd: &mut assert_cmd::Command) -> Value {
    let out = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&out).expect("valid JSON")
}

#[test]
fn test_create_list_show_cycle() {
    let home = home();
    envmanager(&home)
        .args([
            "profile",
            "create",
            "dev",
            r#"{"API_URL":"http://localhost:8080","DEBUG":"true"}"#,
            "--description",
            "Development",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Created profile 'dev' with 2 variable(s)",
        ));

    envmanager(&home)
        .args(["profile", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dev"))
        .stdout(predicate::str::contains("Description: Development"))
        .stdout(predicate::str::contains("Variables: 2"))
        .stdout(predicate::str::contains("Last Used: never"));

    let shown = json_stdout(envmanager(&home).args(["profile", "show", "dev", "--json"]));
    assert_eq!(shown["name"], "dev");
    assert_eq!(shown["variables"]["API_URL"], "http://localhost:8080");
    assert_eq!(shown["state"], "unused");
}

#[test]
fn test_list_and_show_survive_corrupt_settings() {
    let home = home();
    envmanager(&home)
        .args(["profile", "create", "dev", r#"{"A":"1"}"#])
        .assert()
        .success();
    envmanager(&home)
        .args(["profile", "default", "dev"])
        .assert()
        .success();
    std::fs::write(home.path().join("store").join("config.json"), "{not json").expect("write");

    envmanager(&home)
        .args(["profile", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dev"))
        .stdout(predicate::str::contains("[default]").not())
        .stderr(predicate::str::contains("settings unreadable"));
    envmanager(&home)
        .args(["profile", "show", "dev"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dev"));
}

#[test]
fn test_duplicate_create_exit_code() {
    let home = home();
    envmanager(&home)
        .args(["profile", "create", "dev", "{}"])
        .assert()
        .success();
    envmanager(&home)
        .args(["profile", "create", "dev", r#"{"A":"1"}"#])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_create_rejects_non_string_values() {
    let home = home();
    envmanager(&home)
        .args(["profile", "create", "dev", r#"{"PORT":8080}"#])
        .assert()
        .code(6)
        .stderr(predicate::str::contains("PORT"));
    envmanager(&home)
        .args(["profile", "create", "dev", "[1,2]"])
        .assert()
        .code(6);
}

#[test]
fn test_load_marks_profile_used() {
    let home = home();
    envmanager(&home)
        .args(["profile", "create", "dev", r#"{"A":"1"}"#])
        .assert()
        .success();
    envmanager(&home)
        .args(["profile", "load", "dev"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Loaded profile 'dev'"));

    let listed = json_stdout(envmanager(&home).args(["profile", "list", "--json"]));
    assert_eq!(listed["last_used"], "dev");
    assert_eq!(listed["profiles"][0]["state"], "used");
    assert!(listed["profiles"][0]["last_used_at"].is_string());
}

#[test]
fn test_load_export_prints_only_statements() {
    let home = home();
    envmanager(&home)
        .args([
            "profile",
            "create",
            "dev",
            r#"{"API_URL":"http://x","QUOTE":"it's"}"#,
        ])
        .assert()
        .success();

    let expected = if cfg!(windows) {
        "$env:API_URL = 'http://x'\n$env:QUOTE = 'it''s'\n"
    } else {
        "export API_URL='http://x'\nexport QUOTE='it'\\''s'\n"
    };
    envmanager(&home)
        .args(["profile", "load", "dev", "--export"])
        .assert()
        .success()
        .stdout(predicate::str::diff(expected));
}

#[test]
fn test_load_without_name_uses_default() {
    let home = home();
    envmanager(&home)
        .args(["profile", "load"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("no default profile"));

    envmanager(&home)
        .args(["profile", "create", "ci", r#"{"CI":"1"}"#])
        .assert()
        .success();
    envmanager(&home)
        .args(["profile", "default", "ci"])
        .assert()
        .success();
    envmanager(&home)
        .args(["profile", "load"])
        .assert()
        .success()
        .stdout(predicate::str::contains("'ci'"));
}

#[test]
fn test_load_missing_profile_exit_code() {
    let home = home();
    envmanager(&home)
        .args(["profile", "load", "ghost"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Profile 'ghost' not found"));
}

#[test]
fn test_default_set_missing_profile_warns() {
    let home = home();
    envmanager(&home)
        .args(["profile", "default", "later"])
        .assert()
        .success()
        .stdout(predicate::str::contains("does not exist yet"));
    let settings = json_stdout(envmanager(&home).args(["profile", "default", "--json"]));
    assert_eq!(settings["default_profile"], "later");

    envmanager(&home)
        .args(["profile", "default", "--clear"])
        .assert()
        .success();
    let settings = json_stdout(envmanager(&home).args(["profile", "default", "--json"]));
    assert!(settings["default_profile"].is_null());
}

#[test]
fn test_delete_with_yes_clears_default() {
    let home = home();
    envmanager(&home)
        .args(["profile", "create", "dev", "{}"])
        .assert()
        .success();
    envmanager(&home)
        .args(["profile", "default", "dev"])
        .assert()
        .success();
    envmanager(&home)
        .args(["profile", "delete", "dev", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted profile 'dev'"));

    let listed = json_stdout(envmanager(&home).args(["profile", "list", "--json"]));
    assert_eq!(listed["profiles"].as_array().map(Vec::len), Some(0));
    assert!(listed["default_profile"].is_null());
}

#[test]
fn test_delete_missing_profile_exit_code() {
    let home = home();
    envmanager(&home)
        .args(["profile", "delete", "ghost", "-y"])
        .assert()
        .code(3);
}
