//! # cmdbridge LiveKit CLI Handler
//!
//! File: cli/src/commands/lk.rs
//!
//! ## Overview
//!
//! Implements `cmdbridge lk`, the path the desktop UI takes when the user
//! sends a request: the request is resolved against the configured LiveKit
//! CLI path, enabled `--env` parameters are prefixed as assignments, and the
//! composed string is run exactly like `cmdbridge run`.
//!
//! ## Usage
//!
//! ```bash
//! cmdbridge lk --env LIVEKIT_URL=ws://localhost:7880 room list
//! cmdbridge lk --cli-path /opt/livekit/lk lk token create --join
//! ```
//!
use super::run::{report, runner_from_config};
use crate::common::process::{compose, EnvParam};
use crate::core::{
    config,
    error::{CmdbridgeError, Result},
};
use clap::Parser;
use tracing::info;

/// Arguments for the 'lk' command.
#[derive(Parser, Debug)]
pub struct LkArgs {
    /// Environment parameter for the request, as KEY=VALUE. Repeatable.
    #[arg(long = "env", short = 'e', value_name = "KEY=VALUE", value_parser = parse_env_param)]
    pub env: Vec<EnvParam>,

    /// LiveKit CLI executable; overrides `livekit.cli_path` from the config.
    #[arg(long, env = "CMDBRIDGE_LK_PATH")]
    pub cli_path: Option<String>,

    /// Override the configured deadline, in seconds.
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_secs: Option<u64>,

    /// The request, with or without a leading `lk`.
    #[arg(required = true, num_args = 1.., trailing_var_arg = true, allow_hyphen_values = true)]
    pub request: Vec<String>,
}

fn parse_env_param(raw: &str) -> std::result::Result<EnvParam, CmdbridgeError> {
    EnvParam::parse(raw).ok_or_else(|| {
        CmdbridgeError::ArgumentParsing(format!("expected KEY=VALUE, got '{}'", raw))
    })
}

/// Handler for the 'lk' command.
pub async fn handle_lk(args: LkArgs) -> Result<()> {
    let cfg = config::load_config()?;
    let cli_path = args
        .cli_path
        .map(|p| shellexpand::tilde(&p).into_owned())
        .unwrap_or_else(|| cfg.livekit.cli_path.clone());

    let cmd = compose(&cli_path, &args.request.join(" "), &args.env)?;
    info!("Composed LiveKit command: {}", cmd);

    let runner = runner_from_config(&cfg, args.timeout_secs);
    report(runner.run(&cmd).await)
}
