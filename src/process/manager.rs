/*!
 * Process Management
 * The simulation aggregate: process table, scheduler, clock and program source
 */

use super::manager_builder::ProcessManagerBuilder;
use super::scheduler::{Scheduler, SchedulerStats};
use super::table::ProcessTable;
use super::types::Process;
use crate::core::errors::{SimError, SimResult};
use crate::core::types::{Pid, Priority, Timestamp};
use crate::program::{parse_program, Program, ProgramSource};
use std::sync::Arc;
use tracing::info;

/// Single owner of all mutable simulation state
///
/// Every operation runs to completion on `&mut self`; independent managers
/// share nothing.
pub struct ProcessManager {
    pub(super) table: ProcessTable,
    pub(super) scheduler: Scheduler,
    pub(super) clock: Timestamp,
    pub(super) source: Arc<dyn ProgramSource>,
}

impl ProcessManager {
    /// Create a manager with default levels and an empty in-memory program source
    pub fn new() -> Self {
        Self::builder().build_default()
    }

    pub fn builder() -> ProcessManagerBuilder {
        ProcessManagerBuilder::new()
    }

    pub(super) fn from_parts(levels: u8, source: Arc<dyn ProgramSource>) -> Self {
        info!(levels, "Process manager initialized");
        Self {
            table: ProcessTable::new(),
            scheduler: Scheduler::new(levels),
            clock: 0,
            source,
        }
    }

    /// Create a root process from program text and dispatch it if the CPU is idle
    pub fn create_process<I, S>(&mut self, priority: Priority, lines: I) -> SimResult<Pid>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let program = parse_program(lines)?;
        self.create_parsed(priority, program)
    }

    /// Create a root process from a program held by the program source
    pub fn create_process_from(&mut self, priority: Priority, name: &str) -> SimResult<Pid> {
        let lines = self
            .source
            .load(name)
            .map_err(|e| SimError::ProgramSourceUnavailable {
                name: name.to_string(),
                reason: e.to_string(),
            })?;
        self.create_process(priority, lines)
    }

    /// Create a root process from an already parsed program
    pub fn create_parsed(&mut self, priority: Priority, program: Program) -> SimResult<Pid> {
        self.check_priority(priority)?;

        let pid = self.table.insert(None, priority, program, self.clock);
        self.scheduler.admit(&mut self.table, pid)?;
        info!(pid, priority, clock = self.clock, "Process created");

        self.scheduler.reschedule(&mut self.table)?;
        Ok(pid)
    }

    fn check_priority(&self, priority: Priority) -> SimResult<()> {
        let levels = self.scheduler.levels();
        if priority >= levels {
            return Err(SimError::InvalidPriority { priority, levels });
        }
        Ok(())
    }

    /// Re-evaluate who occupies the CPU
    pub fn reschedule(&mut self) -> SimResult<Option<Pid>> {
        self.scheduler.reschedule(&mut self.table)
    }

    /// Advance the simulated clock by one tick
    pub fn advance_clock(&mut self) -> Timestamp {
        self.clock += 1;
        self.clock
    }

    /// Get current clock value
    pub fn clock(&self) -> Timestamp {
        self.clock
    }

    /// Get current running process
    pub fn running(&self) -> Option<Pid> {
        self.scheduler.running()
    }

    pub fn process(&self, pid: Pid) -> Option<&Process> {
        self.table.get(pid)
    }

    /// Lookup for pids held by the scheduler; absence is an internal fault
    pub fn require_process(&self, pid: Pid) -> SimResult<&Process> {
        self.table.require(pid)
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Get scheduler statistics
    pub fn stats(&self) -> SchedulerStats {
        self.scheduler.stats()
    }

    /// Number of live processes
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl Default for ProcessManager {
    fn default() -> Self {
        Self::new()
    }
}
