//! Runs the built binary with a controlled environment and inspects its logs.

use std::fs;
use std::process::{Command, Output};

use tempfile::TempDir;

fn run_with(dir: &TempDir, vars: &[(&str, &str)]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_api-settings"))
        .current_dir(dir.path())
        .env_clear()
        .env("RUST_LOG", "info")
        .envs(vars.iter().copied())
        .output()
        .expect("failed to run api-settings")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// The settings summary is logged as a JSON string inside the JSON log line.
fn summary_app_env(value: &str) -> String {
    format!(r#"\"app_env\":\"{value}\""#)
}

#[test]
fn test_production_logs_json_without_secret() {
    let dir = TempDir::new().unwrap();
    let output = run_with(&dir, &[("APP_ENV", "production"), ("JWT_SECRET", "s3cr3t")]);

    assert!(output.status.success());
    let logs = stdout(&output);
    assert!(logs.contains(&summary_app_env("production")), "logs: {logs}");
    assert!(logs.contains("Settings loaded"));
    assert!(!logs.contains("s3cr3t"));
    assert!(!logs.contains("built-in default"));
}

#[test]
fn test_lowercase_variable_name() {
    let dir = TempDir::new().unwrap();
    let output = run_with(&dir, &[("app_env", "prod")]);

    assert!(output.status.success());
    let logs = stdout(&output);
    assert!(logs.contains(&summary_app_env("prod")), "logs: {logs}");
    assert!(logs.contains("\"environment\":\"production\""));
}

#[test]
fn test_warns_on_default_secret_in_production() {
    let dir = TempDir::new().unwrap();
    let output = run_with(&dir, &[("APP_ENV", "prod")]);

    assert!(output.status.success());
    let logs = stdout(&output);
    assert!(logs.contains("JWT_SECRET is the built-in default in production"), "logs: {logs}");
    assert!(!logs.contains("change_me"));
}

#[test]
fn test_reads_dotenv_file() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(".env"), "APP_ENV=prod\nJWT_SECRET=from-dotenv\n").unwrap();

    let output = run_with(&dir, &[]);

    assert!(output.status.success());
    let logs = stdout(&output);
    assert!(logs.contains(&summary_app_env("prod")), "logs: {logs}");
    assert!(!logs.contains("built-in default"));
    assert!(!logs.contains("from-dotenv"));
}

#[test]
fn test_process_environment_overrides_dotenv() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(".env"), "APP_ENV=staging\n").unwrap();

    let output = run_with(&dir, &[("APP_ENV", "production"), ("JWT_SECRET", "s3cr3t")]);

    assert!(output.status.success());
    let logs = stdout(&output);
    assert!(logs.contains(&summary_app_env("production")), "logs: {logs}");
}

#[test]
fn test_debug_logs_each_defaulted_variable() {
    let dir = TempDir::new().unwrap();
    let output = run_with(&dir, &[("APP_ENV", "production"), ("RUST_LOG", "debug")]);

    assert!(output.status.success());
    let logs = stdout(&output);
    let fallbacks: Vec<_> = logs
        .lines()
        .filter(|line| line.contains("not set, using default"))
        .collect();
    assert_eq!(fallbacks.len(), 1, "logs: {logs}");
    assert!(fallbacks[0].contains("\"var\":\"JWT_SECRET\""));
}

#[test]
fn test_no_fallback_lines_at_info() {
    let dir = TempDir::new().unwrap();
    let output = run_with(&dir, &[("APP_ENV", "production")]);

    assert!(output.status.success());
    assert!(!stdout(&output).contains("not set, using default"));
}
