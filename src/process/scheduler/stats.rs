/*!
 * Scheduler Statistics
 * Counters for scheduling events over the life of a simulation
 */

use super::Scheduler;
use serde::{Deserialize, Serialize};

/// Scheduler statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SchedulerStats {
    /// Processes placed into the running slot
    pub dispatches: u64,
    /// Quantum expirations
    pub preemptions: u64,
    /// Dispatches of a different process than the previous occupant
    pub context_switches: u64,
    pub blocks: u64,
    pub wakes: u64,
    pub terminations: u64,
    pub forks: u64,
    pub replacements: u64,
}

impl Scheduler {
    /// Get scheduler statistics
    pub fn stats(&self) -> SchedulerStats {
        self.stats
    }

    pub(crate) fn stats_mut(&mut self) -> &mut SchedulerStats {
        &mut self.stats
    }
}
