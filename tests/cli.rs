//! Exit codes and top-level error reporting of the compiled binary.

use std::process::{Command, Output};

fn keep_cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_keep-cli"))
        .args(args)
        .env("NO_COLOR", "1")
        .env("KEEP_TOKEN_COMMAND", "keep-cli-no-such-helper-binary")
        .env("KEEP_API_BASE", "http://127.0.0.1:1")
        .env_remove("GOOGLE_ACCESS_TOKEN")
        .output()
        .expect("failed to run keep-cli")
}

#[test]
fn no_command_prints_help_and_succeeds() {
    let out = keep_cli(&[]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Google Keep CLI"));
    assert!(stdout.contains("Examples:"));
}

#[test]
fn unknown_command_prints_help_and_succeeds() {
    let out = keep_cli(&["archive"]);
    assert_eq!(out.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&out.stdout).contains("Commands:"));
}

#[test]
fn missing_id_exits_with_one() {
    let out = keep_cli(&["get"]);
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("❌ Error: Please provide a note ID"));
}

#[test]
fn empty_create_exits_with_one() {
    let out = keep_cli(&["create"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("Please provide at least a title or content."));
}

#[test]
fn missing_token_exits_with_one() {
    let out = keep_cli(&["list"]);
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("No Google access token found"));
    assert!(stderr.contains("GOOGLE_ACCESS_TOKEN"));
}
