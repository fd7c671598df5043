//! Pacing configuration for paced (interval) replay.
//!
//! The clock-skip constants are policy, not accidental literals: gaps above
//! `skip_threshold` are collapsed in `skip_step` increments instead of being
//! slept in full, which bounds total replay wall-time on logs with sparse
//! bursts.

use std::fs;
use std::path::Path;
use std::time::Duration;

use color_eyre::eyre::{Context, Result};
use serde::{Deserialize, Serialize};

/// Pacing policy for interval-mode replay, loadable from YAML:
///
/// ```yaml
/// skip_threshold: 3s
/// skip_step: 2s
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PacingConfig {
    /// Inter-event gaps above this collapse instead of being slept in full
    #[serde(with = "humantime_serde", default = "default_skip_threshold")]
    pub skip_threshold: Duration,
    /// Size of each collapsed step
    #[serde(with = "humantime_serde", default = "default_skip_step")]
    pub skip_step: Duration,
}

fn default_skip_threshold() -> Duration {
    Duration::from_millis(3000)
}

fn default_skip_step() -> Duration {
    Duration::from_millis(2000)
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            skip_threshold: default_skip_threshold(),
            skip_step: default_skip_step(),
        }
    }
}

/// Load a pacing configuration from a YAML file.
pub fn load_pacing_config(path: &Path) -> Result<PacingConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read pacing config from {}", path.display()))?;
    let config: PacingConfig = serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse pacing config {}", path.display()))?;
    Ok(config)
}
