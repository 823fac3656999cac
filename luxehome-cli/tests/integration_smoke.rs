//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const CONFIG_VARS: &[&str] = &[
    "DATABASE_URL",
    "SUPABASE_URL",
    "NEXT_PUBLIC_SUPABASE_URL",
    "SUPABASE_ANON_KEY",
    "NEXT_PUBLIC_SUPABASE_ANON_KEY",
    "SUPABASE_SERVICE_ROLE_KEY",
    "GEMINI_API_KEY",
    "GOOGLE_GENERATIVE_AI_API_KEY",
    "DEMO_RESET_SECRET",
    "LUXEHOME_BIND",
];

/// `luxehome` with an empty home and working directory and no config env
fn isolated(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("luxehome").unwrap();
    cmd.current_dir(home.path()).env("HOME", home.path());
    for var in CONFIG_VARS {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn test_help_lists_commands() {
    let mut cmd = Command::cargo_bin("luxehome").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("sanitize"))
        .stdout(predicate::str::contains("seed"))
        .stdout(predicate::str::contains("migrate"));
}

#[test]
fn test_serve_help() {
    let mut cmd = Command::cargo_bin("luxehome").unwrap();
    cmd.arg("serve").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--cors-permissive"));
}

#[test]
fn test_sanitize_help() {
    let mut cmd = Command::cargo_bin("luxehome").unwrap();
    cmd.arg("sanitize").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--dry-run"));
}

#[test]
fn test_seed_help() {
    let mut cmd = Command::cargo_bin("luxehome").unwrap();
    cmd.arg("seed").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--agent"))
        .stdout(predicate::str::contains("--database-url"));
}

#[test]
fn test_seed_rejects_malformed_agent() {
    let mut cmd = Command::cargo_bin("luxehome").unwrap();
    cmd.args(["seed", "--agent", "not-a-uuid"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("--agent"));
}

#[test]
fn test_seed_requires_database_url() {
    let home = TempDir::new().unwrap();
    let mut cmd = isolated(&home);
    cmd.args(["seed", "--agent", "6f1c2a9e-3b7d-4e2f-9a51-0c8d7e6b5a43"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("DATABASE_URL not set"));
}

#[test]
fn test_completions_bash() {
    let mut cmd = Command::cargo_bin("luxehome").unwrap();
    cmd.arg("completions").arg("bash");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("luxehome"));
}

#[test]
fn test_config_path_under_home() {
    let home = TempDir::new().unwrap();
    let mut cmd = isolated(&home);
    cmd.arg("config").arg("path");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(".luxehome"))
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_validate_reports_missing_settings() {
    let home = TempDir::new().unwrap();
    let mut cmd = isolated(&home);
    cmd.arg("config").arg("validate");

    cmd.assert()
        .failure()
        .stdout(predicate::str::contains("DATABASE_URL"))
        .stdout(predicate::str::contains("SUPABASE_URL"));
}

#[test]
fn test_config_show_masks_secrets() {
    let home = TempDir::new().unwrap();
    let mut cmd = isolated(&home);
    cmd.env("GEMINI_API_KEY", "abcd1234secret")
        .arg("config")
        .arg("show");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("abcd"))
        .stdout(predicate::str::contains("1234secret").not());
}

#[test]
fn test_config_init_writes_once() {
    let home = TempDir::new().unwrap();

    isolated(&home).args(["config", "init"]).assert().success();
    assert!(home.path().join(".luxehome/config.toml").exists());

    isolated(&home)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
}

#[test]
fn test_score_requires_api_key() {
    let home = TempDir::new().unwrap();
    let mut cmd = isolated(&home);
    cmd.arg("score").arg("Ready to buy this week");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("GEMINI_API_KEY"));
}
