//! # cmdbridge Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration tests. Every test runs the binary inside
//! a `Sandbox`: a temporary directory that acts as the working directory,
//! the project root (it contains `.git`, so the config search stops there) and
//! the home/config directory, so a developer's own config never leaks in.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create sandbox directory");
        std::fs::create_dir(dir.path().join(".git")).expect("Failed to create .git marker");
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// `cmdbridge` running in the sandbox with an isolated config location.
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("cmdbridge").expect("Failed to find cmdbridge binary for testing");
        cmd.current_dir(self.path())
            .env("HOME", self.path())
            .env("XDG_CONFIG_HOME", self.path().join(".config"))
            .env_remove("RUST_LOG")
            .env_remove("CMDBRIDGE_LK_PATH");
        cmd
    }

    pub fn write_project_config(&self, contents: &str) {
        std::fs::write(self.path().join(".cmdbridge.toml"), contents)
            .expect("Failed to write project config");
    }

    /// Writes a shell script into the sandbox and returns its path.
    pub fn write_script(&self, name: &str, body: &str) -> PathBuf {
        let path = self.path().join(name);
        std::fs::write(&path, format!("{}\n", body)).expect("Failed to write script");
        path
    }
}
