/*!
 * Process Manager Builder
 * Builder pattern for ProcessManager construction
 */

use super::manager::ProcessManager;
use crate::core::config::SimConfig;
use crate::core::errors::{SimError, SimResult};
use crate::core::limits::{DEFAULT_PRIORITY_LEVELS, MAX_PRIORITY_LEVELS};
use crate::program::{FsProgramSource, MemoryProgramSource, ProgramSource};
use std::sync::Arc;

/// Builder for ProcessManager
pub struct ProcessManagerBuilder {
    priority_levels: u8,
    source: Option<Arc<dyn ProgramSource>>,
}

impl ProcessManagerBuilder {
    /// Create a new ProcessManager builder
    pub fn new() -> Self {
        Self {
            priority_levels: DEFAULT_PRIORITY_LEVELS,
            source: None,
        }
    }

    /// Take levels and the program directory from a configuration
    pub fn with_config(mut self, config: &SimConfig) -> Self {
        self.priority_levels = config.priority_levels;
        self.source = Some(Arc::new(FsProgramSource::new(config.program_dir.clone())));
        self
    }

    pub fn with_priority_levels(mut self, levels: u8) -> Self {
        self.priority_levels = levels;
        self
    }

    /// Source consulted by the R instruction
    pub fn with_program_source<S>(mut self, source: S) -> Self
    where
        S: ProgramSource + 'static,
    {
        self.source = Some(Arc::new(source));
        self
    }

    /// Build the ProcessManager
    pub fn build(self) -> SimResult<ProcessManager> {
        if self.priority_levels == 0 || self.priority_levels > MAX_PRIORITY_LEVELS {
            return Err(SimError::InvalidConfiguration(format!(
                "priority levels must be between 1 and {}, got {}",
                MAX_PRIORITY_LEVELS, self.priority_levels
            )));
        }
        Ok(self.build_default())
    }

    // Callers guarantee a valid level count
    pub(super) fn build_default(self) -> ProcessManager {
        let levels = self.priority_levels.clamp(1, MAX_PRIORITY_LEVELS);
        let source = self
            .source
            .unwrap_or_else(|| Arc::new(MemoryProgramSource::new()));
        ProcessManager::from_parts(levels, source)
    }
}

impl Default for ProcessManagerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
