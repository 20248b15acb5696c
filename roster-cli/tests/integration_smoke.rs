//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A `roster` command isolated from the developer's home config and env
fn roster(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("roster").unwrap();
    cmd.env("HOME", home.path())
        .env_remove("ROSTER_DATABASE_URL")
        .env_remove("ROSTER_BIND")
        .env_remove("RUST_LOG")
        .current_dir(home.path());
    cmd
}

#[test]
fn test_help_lists_commands() {
    let home = TempDir::new().unwrap();

    roster(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("init-db"));
}

#[test]
fn test_serve_help() {
    let home = TempDir::new().unwrap();

    roster(&home)
        .args(["serve", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Address to bind to"))
        .stdout(predicate::str::contains("--database-url"));
}

#[test]
fn test_init_db_seed() {
    let home = TempDir::new().unwrap();
    let db = home.path().join("roster.db");
    let url = format!("sqlite://{}", db.display());

    roster(&home)
        .args(["init-db", "--seed", "--database-url", &url])
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized schema"))
        .stdout(predicate::str::contains(
            "Seeded 7 students, 7 instructors, 4 courses, 7 enrollments",
        ));

    assert!(db.exists());
}

#[test]
fn test_init_db_twice_resets() {
    let home = TempDir::new().unwrap();
    let url = format!("sqlite://{}", home.path().join("roster.db").display());

    roster(&home)
        .args(["init-db", "--seed", "--database-url", &url])
        .assert()
        .success();

    // Seeding again would hit duplicate ids unless the tables were dropped
    roster(&home)
        .args(["init-db", "--seed", "--database-url", &url])
        .assert()
        .success();
}

#[test]
fn test_init_db_reads_env_url() {
    let home = TempDir::new().unwrap();
    let db = home.path().join("from-env.db");

    roster(&home)
        .env("ROSTER_DATABASE_URL", format!("sqlite://{}", db.display()))
        .arg("init-db")
        .assert()
        .success();

    assert!(db.exists());
}

#[test]
fn test_config_path() {
    let home = TempDir::new().unwrap();

    roster(&home)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(".roster"))
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_show_defaults() {
    let home = TempDir::new().unwrap();

    roster(&home)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sqlite://roster.db"))
        .stdout(predicate::str::contains("127.0.0.1:3030"));
}

#[test]
fn test_config_show_reads_file() {
    let home = TempDir::new().unwrap();
    let dir = home.path().join(".roster");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("config.toml"), "bind = \"0.0.0.0:8080\"\n").unwrap();

    roster(&home)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0.0.0.0:8080"));
}

#[test]
fn test_debug_flag_logs_to_stderr() {
    let home = TempDir::new().unwrap();

    roster(&home)
        .args(["--debug", "config", "path"])
        .assert()
        .success()
        .stderr(predicate::str::contains("No config file at"));
}

#[test]
fn test_completions_bash() {
    let home = TempDir::new().unwrap();

    roster(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("roster"));
}
