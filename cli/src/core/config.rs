//! # cmdbridge Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! Loads, merges and validates cmdbridge configuration. Two optional TOML
//! files are read:
//! 1. Project-specific `.cmdbridge.toml` in the current directory or an
//!    ancestor (the search stops at a directory containing `.git`)
//! 2. User-specific `config.toml` in the platform config directory
//!    (e.g. `~/.config/cmdbridge/config.toml`)
//!
//! Project values override user values, which override built-in defaults.
//!
//! ## Examples
//!
//! ```toml
//! [runner]
//! timeout_secs = 120
//!
//! [livekit]
//! cli_path = "~/bin/lk"
//! ```
//!
//! ```rust
//! let cfg = config::load_config()?;
//! let runner = CommandRunner::new().with_timeout(cfg.runner.timeout());
//! ```
//!
use crate::common::process::runner::DEFAULT_TIMEOUT;
use crate::core::error::{CmdbridgeError, Result};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::time::Duration;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

const PROJECT_CONFIG_FILENAME: &str = ".cmdbridge.toml";

/// Top-level configuration structure, loaded from TOML files.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub runner: RunnerConfig,
    #[serde(default)]
    pub livekit: LivekitConfig,
}

/// Settings for `CommandRunner`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RunnerConfig {
    /// Wall-clock limit for a single run, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl RunnerConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Settings for composing LiveKit CLI requests.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LivekitConfig {
    /// Path or name of the `lk` executable (can use ~). Will be expanded.
    #[serde(default = "default_cli_path")]
    pub cli_path: String,
}

impl Default for LivekitConfig {
    fn default() -> Self {
        Self {
            cli_path: default_cli_path(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}
fn default_cli_path() -> String {
    "lk".to_string()
}

/// Loads user and project configuration, merges, expands and validates it.
pub fn load_config() -> Result<Config> {
    let user_config = load_user_config()?;
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    let project_config = load_project_config(&current_dir)?;
    let mut merged_config = merge_configs(user_config.unwrap_or_default(), project_config);
    expand_config_paths(&mut merged_config);
    validate_config(&merged_config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", merged_config);
    Ok(merged_config)
}

fn load_user_config() -> Result<Option<Config>> {
    if let Some(proj_dirs) = ProjectDirs::from("io", "cmdbridge", "cmdbridge") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.exists() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_config(start: &Path) -> Result<Option<Config>> {
    if let Some(project_config_path) = find_project_config_path(start) {
        info!(
            "Loading project configuration from: {}",
            project_config_path.display()
        );
        load_config_from_path(&project_config_path).map(Some)
    } else {
        debug!("No project configuration file (.cmdbridge.toml) found in {} or ancestors.", start.display());
        Ok(None)
    }
}

fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path = start;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

fn merge_configs(user: Config, project: Option<Config>) -> Config {
    let project_cfg = match project {
        Some(p) => p,
        None => return user,
    };
    let mut merged = Config::default();
    merged.runner.timeout_secs = if project_cfg.runner.timeout_secs != default_timeout_secs() {
        project_cfg.runner.timeout_secs
    } else {
        user.runner.timeout_secs
    };
    merged.livekit.cli_path = if project_cfg.livekit.cli_path != default_cli_path() {
        project_cfg.livekit.cli_path
    } else {
        user.livekit.cli_path
    };
    merged
}

fn expand_config_paths(config: &mut Config) {
    config.livekit.cli_path = shellexpand::tilde(&config.livekit.cli_path).into_owned();
    debug!("Expanded LiveKit CLI path: {}", config.livekit.cli_path);
}

fn validate_config(config: &Config) -> Result<()> {
    if config.runner.timeout_secs == 0 {
        return Err(anyhow!(CmdbridgeError::Config(
            "runner.timeout_secs must be greater than zero.".to_string()
        )));
    }
    if config.livekit.cli_path.trim().is_empty() {
        return Err(anyhow!(CmdbridgeError::Config(
            "livekit.cli_path cannot be empty.".to_string()
        )));
    }
    if config.livekit.cli_path.contains(char::is_whitespace) {
        // The runner splits on whitespace, so such a path could never be launched.
        return Err(anyhow!(CmdbridgeError::Config(format!(
            "livekit.cli_path '{}' cannot contain whitespace.",
            config.livekit.cli_path
        ))));
    }
    Ok(())
}
