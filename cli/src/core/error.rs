//! # cmdbridge Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types shared across cmdbridge. It follows a
//! two-layer approach:
//! - `RunError` / `RunFailure`: the classified outcome of a single command run,
//!   returned to the caller together with whatever output was captured.
//! - `CmdbridgeError`: application-level failures (configuration, arguments).
//! - `Result<T>`: a type alias for `anyhow::Result<T>` used by command handlers
//!   and other plumbing where context matters more than the exact type.
//!
//! ## Examples
//!
//! ```rust
//! match runner.run("FOO=1 make test").await {
//!     Ok(output) => print!("{}", String::from_utf8_lossy(&output)),
//!     Err(failure) => {
//!         print!("{}", failure.output_lossy());
//!         eprintln!("Error: {}", failure.error);
//!     }
//! }
//! ```
//!
use std::time::Duration;
use thiserror::Error;

/// Application-level error type for cmdbridge.
#[derive(Error, Debug)]
pub enum CmdbridgeError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Argument parsing error: {0}")]
    ArgumentParsing(String),
}

/// Classification of a failed command run. None of these are retried.
#[derive(Error, Debug)]
pub enum RunError {
    /// The input was empty or whitespace only.
    #[error("command cannot be empty")]
    EmptyCommand,

    /// Tokenization produced no tokens.
    #[error("invalid command")]
    InvalidCommand,

    /// Every token was an environment assignment.
    #[error("no command found")]
    NoCommandFound,

    /// The OS could not start the program (not found, not executable, ...).
    #[error("failed to launch '{program}': {source}")]
    LaunchFailed {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The deadline elapsed and the process group was killed.
    #[error("command timed out after {timeout:?} and was killed")]
    Timeout { timeout: Duration },

    /// The process ran but did not exit successfully.
    #[error("command execution failed: {reason}")]
    ExecutionFailed { reason: String },
}

impl RunError {
    /// Short stable name of the error kind, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            RunError::EmptyCommand => "EmptyCommand",
            RunError::InvalidCommand => "InvalidCommand",
            RunError::NoCommandFound => "NoCommandFound",
            RunError::LaunchFailed { .. } => "LaunchFailed",
            RunError::Timeout { .. } => "Timeout",
            RunError::ExecutionFailed { .. } => "ExecutionFailed",
        }
    }
}

/// A failed run: the classified error paired with the bytes captured before
/// the failure (empty for parse and launch failures).
#[derive(Error, Debug)]
#[error("{error}")]
pub struct RunFailure {
    pub error: RunError,
    pub output: Vec<u8>,
}

impl RunFailure {
    pub fn new(error: RunError, output: Vec<u8>) -> Self {
        Self { error, output }
    }

    /// Captured output decoded as UTF-8, replacing invalid sequences.
    pub fn output_lossy(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }
}

impl From<RunError> for RunFailure {
    fn from(error: RunError) -> Self {
        Self::new(error, Vec::new())
    }
}

/// Type alias for Result using anyhow::Error for application plumbing.
pub type Result<T> = anyhow::Result<T>;
