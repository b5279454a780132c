//! # cmdbridge Run Handler
//!
//! File: cli/src/commands/run.rs
//!
//! ## Overview
//!
//! Implements `cmdbridge run`. The words after `run` are joined with single
//! spaces and handed to `CommandRunner::run`, so leading `NAME=VALUE` words
//! become environment assignments for the program that follows.
//!
//! Combined output is written to stdout unchanged, including when the run
//! fails; the error itself goes through the normal error path in `main.rs`.
//!
//! ## Usage
//!
//! ```bash
//! cmdbridge run FOO=1 BAR=2 printenv BAR
//! cmdbridge run --timeout-secs 10 LIVEKIT_URL=ws://localhost:7880 lk room list
//! ```
//!
use crate::common::process::CommandRunner;
use crate::core::{
    config::{self, Config},
    error::{Result, RunFailure},
};
use anyhow::Context;
use clap::Parser;
use std::io::Write;
use std::time::Duration;
use tracing::debug;

/// Arguments for the 'run' command.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Override the configured deadline, in seconds.
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_secs: Option<u64>,

    /// Command line to run: leading NAME=VALUE words, then the program and its arguments.
    #[arg(required = true, num_args = 1.., trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,
}

/// Handler for the 'run' command.
pub async fn handle_run(args: RunArgs) -> Result<()> {
    let cfg = config::load_config()?;
    let runner = runner_from_config(&cfg, args.timeout_secs);
    let cmd = args.command.join(" ");
    debug!("Running with deadline {:?}", runner.timeout());
    report(runner.run(&cmd).await)
}

/// Builds a runner from configuration, with an optional timeout override.
pub(crate) fn runner_from_config(cfg: &Config, timeout_secs: Option<u64>) -> CommandRunner {
    let timeout = timeout_secs
        .map(Duration::from_secs)
        .unwrap_or_else(|| cfg.runner.timeout());
    CommandRunner::new().with_timeout(timeout)
}

/// Writes captured output to stdout and turns a failure into an error.
pub(crate) fn report(result: std::result::Result<Vec<u8>, RunFailure>) -> Result<()> {
    let (output, error) = match result {
        Ok(output) => (output, None),
        Err(RunFailure { error, output }) => (output, Some(error)),
    };

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(&output)
        .and_then(|_| stdout.flush())
        .context("Failed to write command output")?;

    match error {
        Some(error) => Err(error.into()),
        None => Ok(()),
    }
}
