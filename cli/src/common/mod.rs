//! # cmdbridge Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! Shared functionality used by the command handlers, kept apart from the
//! clap-facing code in `commands::` and the infrastructure in `core::`.
//!
//! ## Architecture
//!
//! - **`process`**: the command-string parser and the bounded `CommandRunner`.
//! - **`dialog`**: native file/folder pickers, one implementation per platform.
//! - **`system`**: CPU and memory sampling.
//!
//! The dialog and metrics modules are collaborators only; nothing in
//! `process` depends on them.
//!

/// Native file and folder dialogs.
pub mod dialog;
/// Command parsing and bounded execution.
pub mod process;
/// Host CPU and memory sampling.
pub mod system;
