//! # cmdbridge System Metrics (`common::system`)
//!
//! File: cli/src/common/system/mod.rs
//!
//! ## Overview
//!
//! Samples host-wide CPU and memory utilisation for display next to command
//! output. CPU usage is a delta between two refreshes, so a sample always
//! takes at least `sysinfo::MINIMUM_CPU_UPDATE_INTERVAL`; the default window
//! is one second.
//!
//! ## Usage
//!
//! ```rust
//! let stats = system::sample(system::DEFAULT_SAMPLE_WINDOW).await?;
//! println!("CPU {:.1}%  Memory {:.1}%", stats.cpu_percent, stats.memory_percent);
//! ```
//!
use serde::Serialize;
use std::time::Duration;
use sysinfo::{
    CpuRefreshKind, MemoryRefreshKind, RefreshKind, System, MINIMUM_CPU_UPDATE_INTERVAL,
};
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_SAMPLE_WINDOW: Duration = Duration::from_secs(1);

/// Instantaneous host utilisation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SystemStats {
    pub cpu_percent: f32,
    pub memory_percent: f64,
}

#[derive(Error, Debug)]
#[error("failed to sample system stats: {0}")]
pub struct SamplingError(String);

/// Measures CPU usage over `window` (clamped to the sysinfo minimum) and
/// reads current memory usage.
pub async fn sample(window: Duration) -> Result<SystemStats, SamplingError> {
    let mut sys = System::new_with_specifics(
        RefreshKind::new()
            .with_cpu(CpuRefreshKind::new().with_cpu_usage())
            .with_memory(MemoryRefreshKind::new().with_ram()),
    );
    tokio::time::sleep(window.max(MINIMUM_CPU_UPDATE_INTERVAL)).await;
    sys.refresh_cpu_usage();
    sys.refresh_memory();

    if sys.cpus().is_empty() {
        return Err(SamplingError("no CPUs reported".to_string()));
    }

    let stats = SystemStats {
        cpu_percent: sys.global_cpu_usage(),
        memory_percent: memory_percent(sys.used_memory(), sys.total_memory())?,
    };
    debug!("Sampled system stats: {:?}", stats);
    Ok(stats)
}

fn memory_percent(used: u64, total: u64) -> Result<f64, SamplingError> {
    if total == 0 {
        return Err(SamplingError("total memory reported as zero".to_string()));
    }
    Ok(used as f64 / total as f64 * 100.0)
}
