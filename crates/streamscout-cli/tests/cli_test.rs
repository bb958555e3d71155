#![allow(clippy::unwrap_used)]
#![allow(missing_docs)]

use assert_cmd::cargo_bin_cmd;
use predicates::prelude::predicate;

/// Command isolated from the caller's config, `.env` and credentials.
fn isolated_cmd(dir: &tempfile::TempDir) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("streamscout");
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .env_remove("TMDB_API_KEY")
        .env_remove("TMDB_API_TOKEN")
        .env_remove("MIN_VOTES")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_lists_commands() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("streamscout");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("top"))
        .stdout(predicate::str::contains("popular"))
        .stdout(predicate::str::contains("shows"))
        .stdout(predicate::str::contains("search"))
        .stdout(predicate::str::contains("genres"))
        .stdout(predicate::str::contains("actor"));
}

#[test]
fn test_top_help_lists_filter_flags() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("streamscout");
    cmd.args(["top", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--providers"))
        .stdout(predicate::str::contains("--min-rating"))
        .stdout(predicate::str::contains("--genre"));
}

#[test]
fn test_unknown_command_fails() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("streamscout");
    cmd.arg("upcoming").assert().failure();
}

#[test]
fn test_search_requires_query() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("streamscout");
    cmd.arg("search")
        .assert()
        .failure()
        .stderr(predicate::str::contains("<QUERY>"));
}

#[test]
fn test_actor_index_zero_rejected() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("streamscout");
    cmd.args(["actor", "Tom Hanks", "0"]).assert().failure();
}

#[test]
fn test_missing_api_key_fails() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    isolated_cmd(&dir)
        .args(["--dir", dir.path().to_str().unwrap(), "top"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("TMDB_API_KEY is required"));
}

#[test]
fn test_invalid_config_file_fails() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("config.toml"), "[filter\nregion = ").unwrap();

    // Act & Assert
    isolated_cmd(&dir)
        .args(["--dir", dir.path().to_str().unwrap(), "genres"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse"));
}

#[test]
fn test_invalid_env_value_fails() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    isolated_cmd(&dir)
        .env("MIN_VOTES", "lots")
        .args(["--dir", dir.path().to_str().unwrap(), "top"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "invalid configuration in environment",
        ));
}
