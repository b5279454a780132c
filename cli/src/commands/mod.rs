//! # cmdbridge Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! Aggregates the top-level commands of the cmdbridge CLI. Each module defines
//! its own clap arguments struct and an async handler called from `main.rs`.
//!
//! ## Commands
//!
//! - `run`: run a raw command string with the bounded runner
//! - `lk`: compose a LiveKit CLI request with env parameters, then run it
//! - `pick`: open the native file or folder dialog
//! - `stats`: sample host CPU and memory utilisation
//!

/// Runs a raw `NAME=VALUE ... program args` string.
pub mod run;
/// Builds and runs a LiveKit CLI request.
pub mod lk;
/// Native file and folder pickers.
pub mod pick;
/// CPU and memory sampling.
pub mod stats;
