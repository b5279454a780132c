//! # cmdbridge Process Execution (`common::process`)
//!
//! File: cli/src/common/process/mod.rs
//!
//! ## Overview
//!
//! Everything needed to turn a free-form command string into a bounded child
//! process and its combined output.
//!
//! ## Architecture
//!
//! - **`parse`**: whitespace tokenization and the leading `NAME=VALUE` split.
//! - **`capture`**: one byte stream for the child's stdout and stderr.
//! - **`runner`**: `CommandRunner`, which spawns with a deadline and classifies the result.
//! - **`compose`**: builds LiveKit CLI command strings from a request and env parameters.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::process::{CommandRunner, compose, EnvParam};
//!
//! let cmd = compose("lk", "room list", &[EnvParam::new("LIVEKIT_URL", "ws://localhost:7880")])?;
//! match CommandRunner::new().run(&cmd).await {
//!     Ok(output) => print!("{}", String::from_utf8_lossy(&output)),
//!     Err(failure) => eprintln!("{}\nError: {}", failure.output_lossy(), failure.error),
//! }
//! ```
//!

mod capture;
pub mod compose;
pub mod parse;
pub mod runner;

pub use compose::{compose, EnvParam};
pub use runner::CommandRunner;
