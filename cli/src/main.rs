//! # cmdbridge Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! cmdbridge is the command-execution backend for the LiveKit CLI desktop
//! shell. The shell hands it a free-form command string such as
//! `LIVEKIT_URL=ws://localhost:7880 lk room list`; cmdbridge splits off the
//! leading environment assignments, runs the program with a bounded lifetime
//! and returns combined stdout/stderr plus a success or failure signal.
//!
//! This file handles:
//! - Command-line argument parsing using Clap
//! - Setting up logging based on verbosity flags
//! - Routing execution to the command handlers
//!
//! ## Examples
//!
//! ```bash
//! cmdbridge run FOO=1 BAR=2 echo hi
//! cmdbridge lk --env LIVEKIT_URL=ws://localhost:7880 room list
//! cmdbridge -vv pick folder
//! cmdbridge stats --json
//! ```
//!
//! Command output always goes to stdout; logs and the final error line go to
//! stderr, and any failure exits with status 1.
//!
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod commands; // Handlers for run, lk, pick and stats
mod common; // Process execution, dialogs and system metrics
mod core; // Configuration and error types

/// Top-level command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "cmdbridge",
    about = "Run env-prefixed command strings with a bounded lifetime",
    long_about = "Backend bridge for the LiveKit CLI desktop shell.\n\
                  Parses leading NAME=VALUE assignments, runs the program with a deadline, \
                  and returns combined stdout/stderr.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

/// All available top-level commands.
#[derive(Parser, Debug)]
enum Commands {
    /// Run a command string: NAME=VALUE... program [args...]
    #[command(alias = "r")]
    Run(commands::run::RunArgs),
    /// Compose and run a LiveKit CLI request
    Lk(commands::lk::LkArgs),
    /// Open a native dialog to choose the LiveKit CLI
    Pick(commands::pick::PickArgs),
    /// Print host CPU and memory utilisation
    Stats(commands::stats::StatsArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let command_result = match cli.command {
        Commands::Run(args) => commands::run::handle_run(args).await,
        Commands::Lk(args) => commands::lk::handle_lk(args).await,
        Commands::Pick(args) => commands::pick::handle_pick(args).await,
        Commands::Stats(args) => commands::stats::handle_stats(args).await,
    };

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
