//! # Command String Parser (`common::process::parse`)
//!
//! File: cli/src/common/process/parse.rs
//!
//! ## Overview
//!
//! Splits a free-form command line into leading `NAME=VALUE` environment
//! assignments and the invocation that follows them. Only whitespace
//! tokenization is performed: quotes, pipes, redirection and globs are not
//! interpreted, so `echo "a b"` yields the arguments `"a` and `b"`.
//!
//! Assignment scanning stops at the first token that either lacks `=` or
//! starts with `-`. Everything from that token on belongs to the invocation,
//! even tokens that look like assignments:
//!
//! ```text
//! FOO=1 BAR=2 echo hi    -> env {FOO=1, BAR=2}, invocation [echo, hi]
//! FOO=1 echo BAR=2       -> env {FOO=1},        invocation [echo, BAR=2]
//! FOO=1 -x=2 echo hi     -> env {FOO=1},        invocation [-x=2, echo, hi]
//! ```
//!
use crate::core::error::RunError;
use std::collections::HashMap;

/// One leading `NAME=VALUE` token, split at its first `=`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvAssignment {
    pub name: String,
    pub value: String,
}

impl EnvAssignment {
    fn from_token(token: &str) -> Self {
        let (name, value) = token.split_once('=').unwrap_or((token, ""));
        Self {
            name: name.to_string(),
            value: value.to_string(),
        }
    }
}

/// Result of parsing a command string. `program` is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    /// Leading assignments in input order.
    pub env: Vec<EnvAssignment>,
    pub program: String,
    pub args: Vec<String>,
}

impl ParsedCommand {
    /// Name to value view of the assignments; the last duplicate wins.
    pub fn env_map(&self) -> HashMap<&str, &str> {
        self.env
            .iter()
            .map(|a| (a.name.as_str(), a.value.as_str()))
            .collect()
    }

    /// The invocation vector: program followed by its arguments.
    pub fn invocation(&self) -> Vec<&str> {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect()
    }
}

/// Splits on runs of whitespace, discarding empty tokens.
pub fn tokenize(raw: &str) -> Vec<&str> {
    raw.split_whitespace().collect()
}

/// A token is an assignment if it contains `=` and does not start with `-`.
pub fn is_env_assignment(token: &str) -> bool {
    token.contains('=') && !token.starts_with('-')
}

/// Parses `raw` into its environment assignments and invocation.
pub fn parse(raw: &str) -> Result<ParsedCommand, RunError> {
    if raw.trim().is_empty() {
        return Err(RunError::EmptyCommand);
    }

    let tokens = tokenize(raw);
    if tokens.is_empty() {
        return Err(RunError::InvalidCommand);
    }

    let split = tokens
        .iter()
        .position(|t| !is_env_assignment(t))
        .ok_or(RunError::NoCommandFound)?;
    let (assignments, invocation) = tokens.split_at(split);

    Ok(ParsedCommand {
        env: assignments
            .iter()
            .map(|t| EnvAssignment::from_token(t))
            .collect(),
        program: invocation[0].to_string(),
        args: invocation[1..].iter().map(|s| s.to_string()).collect(),
    })
}
