/*!
 * CPU Scheduler
 * Static-priority preemptive round robin with a 2^level quantum per level
 *
 * Priorities never change over a process's life, so this is not a multilevel
 * feedback scheduler: a level only determines dispatch order and quantum.
 */

use crate::core::types::{Pid, Priority};

mod operations;
mod queues;
mod stats;

pub use queues::QueueManager;
pub use stats::SchedulerStats;

/// CPU Scheduler
///
/// Owns the ready/blocked queues and the running slot. Process records stay in
/// the process table and are passed in by the caller.
#[derive(Debug, Clone)]
pub struct Scheduler {
    queues: QueueManager,

    // Current running process
    running: Option<Pid>,

    // Process that executed an instruction since the last accounting pass
    executed: Option<Pid>,

    // Last process placed into the running slot
    last_dispatched: Option<Pid>,

    stats: SchedulerStats,
}

impl Scheduler {
    /// Create a scheduler with `levels` priority levels
    pub fn new(levels: u8) -> Self {
        tracing::debug!(levels, "Scheduler initialized");
        Self {
            queues: QueueManager::new(levels),
            running: None,
            executed: None,
            last_dispatched: None,
            stats: SchedulerStats::default(),
        }
    }

    /// Get current running process
    pub fn running(&self) -> Option<Pid> {
        self.running
    }

    pub fn queues(&self) -> &QueueManager {
        &self.queues
    }

    pub fn levels(&self) -> u8 {
        self.queues.levels()
    }

    /// Quantum of a priority level
    pub fn time_slice(&self, level: Priority) -> u32 {
        crate::core::limits::time_slice(level)
    }

    pub fn is_idle(&self) -> bool {
        self.running.is_none()
    }
}
