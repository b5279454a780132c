//! # cmdbridge Run Integration Tests
//!
//! File: cli/tests/run.rs
//!
//! Drives `cmdbridge run` end to end: assignment parsing, combined output,
//! failure classification and the deadline.
//!
#![cfg(unix)]

mod common;
use common::*;
use predicates::prelude::*;

#[test]
fn test_run_echo_with_assignments() {
    Sandbox::new()
        .cmd()
        .args(["run", "FOO=1", "BAR=2", "echo", "hi"])
        .assert()
        .success()
        .stdout("hi\n");
}

#[test]
fn test_run_single_string_argument() {
    Sandbox::new()
        .cmd()
        .args(["run", "FOO=1 BAR=2 printenv BAR"])
        .assert()
        .success()
        .stdout("2\n");
}

#[test]
fn test_run_late_assignment_is_argument() {
    Sandbox::new()
        .cmd()
        .args(["run", "FOO=1", "echo", "BAR=2"])
        .assert()
        .success()
        .stdout("BAR=2\n");
}

#[test]
fn test_run_empty_command() {
    Sandbox::new()
        .cmd()
        .args(["run", "   "])
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("command cannot be empty"));
}

#[test]
fn test_run_only_assignments() {
    Sandbox::new()
        .cmd()
        .args(["run", "FOO=1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no command found"));
}

#[test]
fn test_run_dash_program_fails_to_launch() {
    Sandbox::new()
        .cmd()
        .args(["run", "FOO=1", "-x=2", "echo", "hi"])
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("failed to launch '-x=2'"));
}

#[test]
fn test_run_non_zero_exit_prints_output() {
    let sandbox = Sandbox::new();
    sandbox.write_script("fail.sh", "echo partial\necho broken >&2\nexit 1");
    sandbox
        .cmd()
        .args(["run", "sh", "fail.sh"])
        .assert()
        .code(1)
        .stdout("partial\nbroken\n")
        .stderr(predicate::str::contains("command execution failed"));
}

#[test]
fn test_run_timeout_flag() {
    Sandbox::new()
        .cmd()
        .args(["run", "--timeout-secs", "1", "sleep", "30"])
        .timeout(std::time::Duration::from_secs(20))
        .assert()
        .failure()
        .stderr(predicate::str::contains("timed out"));
}

#[test]
fn test_run_timeout_from_project_config() {
    let sandbox = Sandbox::new();
    sandbox.write_project_config("[runner]\ntimeout_secs = 1\n");
    sandbox
        .cmd()
        .args(["run", "sleep", "30"])
        .timeout(std::time::Duration::from_secs(20))
        .assert()
        .failure()
        .stderr(predicate::str::contains("timed out after 1s"));
}

#[test]
fn test_run_inherits_caller_environment() {
    Sandbox::new()
        .cmd()
        .env("CMDBRIDGE_INHERITED", "from-parent")
        .args(["run", "printenv", "CMDBRIDGE_INHERITED"])
        .assert()
        .success()
        .stdout("from-parent\n");
}

#[test]
fn test_run_assignment_overrides_inherited() {
    Sandbox::new()
        .cmd()
        .env("CMDBRIDGE_INHERITED", "from-parent")
        .args(["run", "CMDBRIDGE_INHERITED=override", "printenv", "CMDBRIDGE_INHERITED"])
        .assert()
        .success()
        .stdout("override\n");
}
