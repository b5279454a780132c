//! # cmdbridge Pick Integration Tests
//!
//! File: cli/tests/pick.rs
//!
//! Opening a real dialog needs a desktop session, so those tests are ignored.
//!

mod common;
use common::*;
use predicates::prelude::*;

#[test]
fn test_pick_rejects_unknown_target() {
    Sandbox::new()
        .cmd()
        .args(["pick", "directory"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
#[ignore] // Needs a desktop session and a user to answer the dialog
fn test_pick_file_interactive() {
    Sandbox::new().cmd().args(["pick", "file"]).assert().success();
}

#[test]
#[ignore] // Needs a desktop session and a user to answer the dialog
fn test_pick_folder_interactive() {
    Sandbox::new().cmd().args(["pick", "folder"]).assert().success();
}
