//! Configuration loading for linkq.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Queues at or above this size are sorted with merge sort.
pub const DEFAULT_SORT_THRESHOLD: usize = 200;

/// Upper bound accepted for the sort threshold. Exchange sort is quadratic,
/// so anything larger is almost certainly a typo.
pub const MAX_SORT_THRESHOLD: usize = 1 << 16;

/// Queue tuning knobs.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct QueueConfig {
    /// Size at which `sort` switches from exchange sort to merge sort.
    #[serde(default = "default_sort_threshold")]
    pub sort_threshold: usize,
}

fn default_sort_threshold() -> usize {
    DEFAULT_SORT_THRESHOLD
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            sort_threshold: default_sort_threshold(),
        }
    }
}

/// Get the default config file path (`<config dir>/config.json`).
pub fn default_config_path() -> Result<PathBuf> {
    let dirs = directories::ProjectDirs::from("", "", "linkq")
        .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))?;

    Ok(dirs.config_dir().join("config.json"))
}

/// Load a queue config from a JSON file.
pub fn load_config(path: &Path) -> Result<QueueConfig> {
    if !path.exists() {
        return Err(Error::Config(format!(
            "Config file not found at {}",
            path.display()
        )));
    }

    let content = std::fs::read_to_string(path)?;
    let config: QueueConfig = serde_json::from_str(&content)?;

    validate_config(&config)?;

    tracing::debug!("Loaded queue config from {}", path.display());
    Ok(config)
}

/// Load a queue config or return the default if it is missing or invalid.
pub fn load_config_or_default(path: &Path) -> QueueConfig {
    load_config(path).unwrap_or_else(|e| {
        tracing::warn!("Failed to load queue config: {}, using defaults", e);
        QueueConfig::default()
    })
}

fn validate_config(config: &QueueConfig) -> Result<()> {
    if config.sort_threshold > MAX_SORT_THRESHOLD {
        return Err(Error::Config(format!(
            "sort_threshold {} exceeds maximum {}",
            config.sort_threshold, MAX_SORT_THRESHOLD
        )));
    }
    Ok(())
}
