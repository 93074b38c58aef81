use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_help_shows_all_commands() {
    cargo_bin_cmd!("trellis")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("board"))
        .stdout(predicate::str::contains("config"))
        .stdout(predicate::str::contains("decide"));
}

#[test]
fn test_decide_help_shows_flags() {
    cargo_bin_cmd!("trellis")
        .args(["decide", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--pop-over"))
        .stdout(predicate::str::contains("--focus-menu"))
        .stdout(predicate::str::contains("--menu-focus-aware"));
}

#[test]
fn test_version_flag() {
    cargo_bin_cmd!("trellis")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.1"));
}

#[test]
fn test_board_requires_terminal() {
    let dir = tempfile::tempdir().unwrap();

    cargo_bin_cmd!("trellis")
        .env("TRELLIS_HOME", dir.path())
        .env_remove("TRELLIS_TOKEN")
        .arg("board")
        .assert()
        .failure()
        .stderr(predicate::str::contains("requires a terminal"));
}
