//! # cmdbridge Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! Foundational pieces used by every command:
//! - `config`: configuration loading, merging, and validation
//! - `error`: run outcome classification and application error types
//!
//! ```rust
//! use crate::core::config; // For loading configuration
//! use crate::core::error::{RunError, Result}; // For error handling
//! ```
//!
pub mod config;
pub mod error;
