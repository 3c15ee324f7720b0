//! End-to-end tests for the `expense` binary

mod common;

use assert_cmd::Command;
use common::{MockServer, Response};
use predicates::prelude::*;
use tempfile::TempDir;

/// The binary with its data directory pointed at `dir`
fn expense(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("expense").unwrap();
    cmd.env("EXPENSE_CLI_DATA_DIR", dir.path())
        .env_remove("EXPENSE_API_URL")
        .env_remove("EXPENSE_PASSWORD")
        .env_remove("EXPENSE_LOG");
    cmd
}

#[test]
fn test_help_lists_commands() {
    let dir = TempDir::new().unwrap();
    expense(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("login"))
        .stdout(predicate::str::contains("dashboard"))
        .stdout(predicate::str::contains("savings"));
}

#[test]
fn test_settings_show_defaults() {
    let dir = TempDir::new().unwrap();
    expense(&dir)
        .args(["settings", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("http://localhost:4000"))
        .stdout(predicate::str::contains("Not signed in"));
}

#[test]
fn test_theme_persists() {
    let dir = TempDir::new().unwrap();
    expense(&dir)
        .args(["settings", "theme", "dark"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Theme set to dark"));

    expense(&dir)
        .args(["settings", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dark"));
}

#[test]
fn test_invalid_page_size_rejected() {
    let dir = TempDir::new().unwrap();
    expense(&dir)
        .args(["settings", "page-size", "7"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("5, 10 or 20"));
}

#[test]
fn test_protected_command_requires_login() {
    let dir = TempDir::new().unwrap();
    expense(&dir)
        .args(["transaction", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not logged in"));
}

#[test]
fn test_login_stores_session() {
    let server = MockServer::start(|req| match (req.method.as_str(), req.path.as_str()) {
        ("POST", "/api/auth/login") => Response::ok(
            r#"{"token":"tok-1","user":{"name":"Ana","email":"ana@example.com"}}"#,
        ),
        _ => Response::not_found(),
    });
    let dir = TempDir::new().unwrap();

    expense(&dir)
        .args(["--api-url", server.base_url(), "login", "ana@example.com"])
        .env("EXPENSE_PASSWORD", "secret")
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged in as Ana"));

    expense(&dir)
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("Ana <ana@example.com>"));

    expense(&dir).arg("logout").assert().success();
    expense(&dir)
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not logged in"));
}

#[test]
fn test_login_failure_shows_server_message() {
    let server = MockServer::start(|_| Response::json(400, r#"{"message":"Invalid credentials"}"#));
    let dir = TempDir::new().unwrap();

    expense(&dir)
        .args(["--api-url", server.base_url(), "login", "ana@example.com"])
        .env("EXPENSE_PASSWORD", "wrong")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid credentials"));

    expense(&dir)
        .args(["settings", "show"])
        .assert()
        .stdout(predicate::str::contains("Not signed in"));
}

#[test]
fn test_rejected_login_has_no_session_hint() {
    let server = MockServer::start(|_| Response::json(401, r#"{"message":"Wrong password"}"#));
    let dir = TempDir::new().unwrap();

    expense(&dir)
        .args(["--api-url", server.base_url(), "login", "ana@example.com"])
        .env("EXPENSE_PASSWORD", "wrong")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Wrong password"))
        .stderr(predicate::str::contains("session may have expired").not());
}
