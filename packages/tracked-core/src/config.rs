//! Tracker configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::equality::EqualityPolicy;
use crate::error::{Result, TrackError};

/// Overlay configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Rule deciding whether a write differs from the stored value
    pub equality: EqualityPolicy,
    /// Drop pending entries once they have been written to the record.
    ///
    /// When `false`, committed entries stay buffered until overwritten or
    /// rolled back; they stop reporting as changed because they now equal
    /// the record.
    pub clear_on_commit: bool,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            equality: EqualityPolicy::Identity,
            clear_on_commit: true,
        }
    }
}

impl TrackerConfig {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses configuration from a JSON string. Missing keys take defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| TrackError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Loads configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| TrackError::Config(format!("Failed to read config file: {}", e)))?;
        Self::from_json_str(&content)
    }

    /// Returns a copy using the given equality policy.
    pub fn with_equality(mut self, equality: EqualityPolicy) -> Self {
        self.equality = equality;
        self
    }

    /// Returns a copy with the given commit behaviour.
    pub fn with_clear_on_commit(mut self, clear_on_commit: bool) -> Self {
        self.clear_on_commit = clear_on_commit;
        self
    }
}
