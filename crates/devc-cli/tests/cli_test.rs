use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

fn devc_to_docker() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("devc_to_docker");
    cmd.env_remove("DEVC_TO_DOCKER_ENGINE");
    cmd
}

// ── Help / Version ──

#[test]
fn shows_help() {
    devc_to_docker()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Capture a running dev container, including its bind-mounted workspace",
        ))
        .stdout(predicate::str::contains("--output-image"))
        .stdout(predicate::str::contains("--intermediate-image"))
        .stdout(predicate::str::contains("--temp-root"))
        .stdout(predicate::str::contains("--keep-temp"))
        .stdout(predicate::str::contains("--keep-intermediate"));
}

#[test]
fn help_describes_defaults() {
    devc_to_docker()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("devc_to_docker/<container>:<timestamp>"))
        .stdout(predicate::str::contains("<output>-stage"));
}

#[test]
fn shows_version() {
    devc_to_docker()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("devc_to_docker"));
}

// ── Arguments ──

#[test]
fn container_id_is_required() {
    devc_to_docker()
        .assert()
        .failure()
        .stderr(predicate::str::contains("<CONTAINER_ID>"));
}

#[test]
fn rejects_unknown_flag() {
    devc_to_docker()
        .args(["abc123", "--squash"])
        .assert()
        .failure();
}

// ── Engine preflight ──

#[test]
fn missing_engine_fails_before_any_work() {
    let tmp = TempDir::new().unwrap();
    let temp_root = tmp.path().join("snapshots");

    devc_to_docker()
        .args(["--engine", "/nonexistent/engine", "abc123"])
        .arg("--temp-root")
        .arg(&temp_root)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Error: container engine is not available"))
        .stdout(predicate::str::contains("Summary:").not());

    assert!(!temp_root.exists());
}

#[test]
fn engine_can_be_set_from_environment() {
    devc_to_docker()
        .env("DEVC_TO_DOCKER_ENGINE", "/nonexistent/engine-from-env")
        .arg("abc123")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("$ /nonexistent/engine-from-env --version"))
        .stdout(predicate::str::contains("Error: container engine is not available"));
}

#[test]
fn error_message_includes_cause_chain() {
    devc_to_docker()
        .args(["--engine", "/nonexistent/engine", "abc123"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("not found on PATH"));
}
