//! # Request Composition (`common::process::compose`)
//!
//! File: cli/src/common/process/compose.rs
//!
//! ## Overview
//!
//! Builds the command string handed to `CommandRunner::run` from a LiveKit
//! CLI request and a table of environment parameters, the same way the
//! desktop UI does:
//!
//! - a request starting with `/` or `C:` is an explicit path and is kept;
//! - a leading `lk ` is replaced by the configured CLI path;
//! - a request that does not start with `lk` gets the CLI path prefixed;
//! - enabled parameters with a key and a value become leading `KEY=VALUE`
//!   assignments.
//!
//! ```text
//! compose("/opt/lk", "room list", [LIVEKIT_URL=ws://x])
//!     -> "LIVEKIT_URL=ws://x /opt/lk room list"
//! ```
//!
use crate::core::error::RunError;

/// One row of the environment parameter table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvParam {
    pub key: String,
    pub value: String,
    pub enabled: bool,
}

impl EnvParam {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            enabled: true,
        }
    }

    /// Parses `KEY=VALUE`; the value may itself contain `=`.
    pub fn parse(raw: &str) -> Option<Self> {
        let (key, value) = raw.split_once('=')?;
        Some(Self::new(key, value))
    }

    fn is_active(&self) -> bool {
        self.enabled && !self.key.is_empty() && !self.value.is_empty()
    }
}

/// Resolves the CLI path into `request` and prefixes active parameters.
pub fn compose(cli_path: &str, request: &str, params: &[EnvParam]) -> Result<String, RunError> {
    let request = request.trim();
    if request.is_empty() {
        return Err(RunError::EmptyCommand);
    }

    let command = if request.starts_with('/') || request.starts_with("C:") {
        request.to_string()
    } else if let Some(rest) = request.strip_prefix("lk ") {
        format!("{} {}", cli_path, rest)
    } else if !request.starts_with("lk") {
        format!("{} {}", cli_path, request)
    } else {
        request.to_string()
    };

    let assignments: Vec<String> = params
        .iter()
        .filter(|p| p.is_active())
        .map(|p| format!("{}={}", p.key, p.value))
        .collect();

    if assignments.is_empty() {
        Ok(command)
    } else {
        Ok(format!("{} {}", assignments.join(" "), command))
    }
}
