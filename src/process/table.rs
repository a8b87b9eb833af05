/*!
 * Process Table
 * Sole owner of process records; queues and the running slot hold pids only
 */

use super::types::Process;
use crate::core::errors::{SimError, SimResult};
use crate::core::types::{Pid, Priority, Timestamp};
use crate::program::Program;
use ahash::RandomState;
use std::collections::HashMap;

pub struct ProcessTable {
    processes: HashMap<Pid, Process, RandomState>,
    next_pid: Pid,
}

impl ProcessTable {
    pub fn new() -> Self {
        Self {
            processes: HashMap::with_hasher(RandomState::new()),
            next_pid: 0,
        }
    }

    /// Insert a new Ready record under a fresh pid
    pub fn insert(
        &mut self,
        parent_pid: Option<Pid>,
        priority: Priority,
        program: Program,
        start_time: Timestamp,
    ) -> Pid {
        let pid = self.next_pid;
        self.next_pid += 1;
        self.processes
            .insert(pid, Process::new(pid, parent_pid, priority, program, start_time));
        pid
    }

    /// Insert a prepared record under a fresh pid, overwriting its pid field
    pub fn insert_record(&mut self, mut process: Process) -> Pid {
        let pid = self.next_pid;
        self.next_pid += 1;
        process.pid = pid;
        self.processes.insert(pid, process);
        pid
    }

    pub fn get(&self, pid: Pid) -> Option<&Process> {
        self.processes.get(&pid)
    }

    /// Lookup for pids that the scheduler still references
    pub fn require(&self, pid: Pid) -> SimResult<&Process> {
        self.processes.get(&pid).ok_or(SimError::MissingProcess(pid))
    }

    pub fn require_mut(&mut self, pid: Pid) -> SimResult<&mut Process> {
        self.processes
            .get_mut(&pid)
            .ok_or(SimError::MissingProcess(pid))
    }

    pub fn remove(&mut self, pid: Pid) -> Option<Process> {
        self.processes.remove(&pid)
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }
}

impl Default for ProcessTable {
    fn default() -> Self {
        Self::new()
    }
}
