/*!
 * Simulator Configuration
 * Runtime settings read from PROCSIM_* environment variables
 */

use super::errors::{SimError, SimResult};
use super::limits::{DEFAULT_PRIORITY_LEVELS, MAX_PRIORITY_LEVELS};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Output format for state reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapshotFormat {
    #[default]
    Text,
    Json,
}

/// Simulator configuration
///
/// Environment variables:
/// - PROCSIM_PRIORITY_LEVELS: number of priority levels (default: 4)
/// - PROCSIM_PROGRAM_DIR: directory programs are loaded from (default: .)
/// - PROCSIM_INIT_PROGRAM: program run by the init process (default: built-in)
/// - PROCSIM_SNAPSHOT_FORMAT: text or json (default: text)
/// - PROCSIM_TRACE_JSON: JSON log output (default: false)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SimConfig {
    pub priority_levels: u8,
    pub program_dir: PathBuf,
    pub init_program: Option<String>,
    pub snapshot_format: SnapshotFormat,
    pub trace_json: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            priority_levels: DEFAULT_PRIORITY_LEVELS,
            program_dir: PathBuf::from("."),
            init_program: None,
            snapshot_format: SnapshotFormat::Text,
            trace_json: false,
        }
    }
}

impl SimConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> SimResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> SimResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup("PROCSIM_PRIORITY_LEVELS") {
            config.priority_levels = raw.trim().parse().map_err(|_| {
                SimError::InvalidConfiguration(format!(
                    "PROCSIM_PRIORITY_LEVELS must be an integer, got {:?}",
                    raw
                ))
            })?;
        }

        if let Some(dir) = lookup("PROCSIM_PROGRAM_DIR") {
            config.program_dir = PathBuf::from(dir);
        }

        config.init_program = lookup("PROCSIM_INIT_PROGRAM").filter(|name| !name.trim().is_empty());

        if let Some(format) = lookup("PROCSIM_SNAPSHOT_FORMAT") {
            config.snapshot_format = match format.trim().to_lowercase().as_str() {
                "text" => SnapshotFormat::Text,
                "json" => SnapshotFormat::Json,
                other => {
                    return Err(SimError::InvalidConfiguration(format!(
                        "PROCSIM_SNAPSHOT_FORMAT must be text or json, got {:?}",
                        other
                    )))
                }
            };
        }

        config.trace_json = lookup("PROCSIM_TRACE_JSON")
            .map(|v| v == "1" || v == "true")
            .unwrap_or(false);

        config.validate()?;
        Ok(config)
    }

    /// Check value ranges
    pub fn validate(&self) -> SimResult<()> {
        if self.priority_levels == 0 || self.priority_levels > MAX_PRIORITY_LEVELS {
            return Err(SimError::InvalidConfiguration(format!(
                "priority levels must be between 1 and {}, got {}",
                MAX_PRIORITY_LEVELS, self.priority_levels
            )));
        }
        Ok(())
    }
}
