//! # cmdbridge Stats Handler
//!
//! File: cli/src/commands/stats.rs
//!
//! ## Overview
//!
//! Implements `cmdbridge stats`: one CPU/memory sample, printed as text or JSON.
//!
//! ## Usage
//!
//! ```bash
//! cmdbridge stats
//! cmdbridge stats --json --window-ms 500
//! ```
//!
use crate::common::system::{self, SystemStats};
use crate::core::error::Result;
use anyhow::Context;
use clap::Parser;
use std::time::Duration;

/// Arguments for the 'stats' command.
#[derive(Parser, Debug)]
pub struct StatsArgs {
    /// Print the sample as a JSON object.
    #[arg(long)]
    pub json: bool,

    /// CPU sampling window in milliseconds.
    #[arg(long, default_value_t = system::DEFAULT_SAMPLE_WINDOW.as_millis() as u64)]
    pub window_ms: u64,
}

/// Handler for the 'stats' command.
pub async fn handle_stats(args: StatsArgs) -> Result<()> {
    let stats = system::sample(Duration::from_millis(args.window_ms)).await?;
    println!("{}", render(&stats, args.json)?);
    Ok(())
}

fn render(stats: &SystemStats, json: bool) -> Result<String> {
    if json {
        serde_json::to_string(stats).context("Failed to serialize system stats")
    } else {
        Ok(format!(
            "CPU: {:.1}%\nMemory: {:.1}%",
            stats.cpu_percent, stats.memory_percent
        ))
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_args_defaults() {
        let args = StatsArgs::try_parse_from(["stats"]).unwrap();
        assert!(!args.json);
        assert_eq!(args.window_ms, 1000);
    }

    #[test]
    fn test_render_text_and_json() {
        let stats = SystemStats {
            cpu_percent: 7.5,
            memory_percent: 50.0,
        };
        assert_eq!(render(&stats, false).unwrap(), "CPU: 7.5%\nMemory: 50.0%");
        assert!(render(&stats, true).unwrap().contains("\"memory_percent\":50.0"));
    }
}
