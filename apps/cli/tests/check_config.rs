//! `keyrot check-config` end to end

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const VALID: &str = r#"
[policy]
create_age = 90
deactivate_age = 100
delete_age = 110

[aws]
region = "us-east-2"
topic_arn = "arn:aws:sns:us-east-2:123456789012:notify-sre"

[asana]
workspace_id = "551227202539"

[[roster]]
user_name = "alice"
email = "alice@example.com"
assignee_id = "1207"
parameter_name = "/keys/alice"

[[roster]]
user_name = "bob"
"#;

fn keyrot() -> Command {
    let mut cmd = Command::cargo_bin("keyrot").unwrap();
    cmd.env_clear();
    cmd
}

fn write_config(dir: &TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("keyrot.toml");
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn valid_configuration_passes_and_lists_skipped_entries() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, VALID);

    keyrot()
        .arg("--config")
        .arg(&path)
        .arg("check-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("configuration OK"))
        .stdout(predicate::str::contains(
            "policy: create 90 / deactivate 100 / delete 110 days, max 2 keys",
        ))
        .stdout(predicate::str::contains("roster: 2 entries"))
        .stdout(predicate::str::contains("bob: invalid user: missing email"));
}

#[test]
fn config_path_is_read_from_environment() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, VALID);

    keyrot()
        .env("KEYROT_CONFIG", &path)
        .arg("check-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("roster: 2 entries"));
}

#[test]
fn environment_overrides_are_applied() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, VALID);

    keyrot()
        .env("KEYROT_POLICY__MAX_KEYS", "3")
        .arg("--config")
        .arg(&path)
        .arg("check-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("max 3 keys"));
}

#[test]
fn missing_file_fails_with_exit_code_one() {
    keyrot()
        .arg("--config")
        .arg(Path::new("/nonexistent/keyrot.toml"))
        .arg("check-config")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("configuration file not found"));
}

#[test]
fn unordered_thresholds_are_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, &VALID.replace("create_age = 90", "create_age = 105"));

    keyrot()
        .arg("--config")
        .arg(&path)
        .arg("check-config")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid age thresholds"));
}

#[test]
fn missing_topic_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        &VALID.replace(
            "topic_arn = \"arn:aws:sns:us-east-2:123456789012:notify-sre\"",
            "",
        ),
    );

    keyrot()
        .arg("--config")
        .arg(&path)
        .arg("check-config")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("aws.topic_arn"));
}

#[test]
fn help_lists_subcommands() {
    keyrot()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("plan"))
        .stdout(predicate::str::contains("check-config"));
}
