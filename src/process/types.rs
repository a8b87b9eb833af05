/*!
 * Process Types
 * Process record and the views reported about it
 */

use crate::core::types::{Pid, Priority, Timestamp, Word};
use crate::program::Program;
use serde::{Deserialize, Serialize};

/// Process state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessState {
    /// Waiting in its priority's ready queue
    Ready,
    /// Occupying the CPU
    Running,
    /// Waiting in the blocked queue for a wake command
    Blocked,
    /// Finished; the record is removed from the table right away
    Terminated,
}

/// Simulated process control block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Process {
    pub pid: Pid,
    /// Creator's pid; may no longer resolve once the parent terminated
    pub parent_pid: Option<Pid>,
    pub priority: Priority,
    pub state: ProcessState,
    pub accumulator: Word,
    pub start_time: Timestamp,
    /// Instructions executed during the current dispatch
    pub cpu_time_used: u32,
    pub program: Program,
    pub program_counter: usize,
}

impl Process {
    pub fn new(
        pid: Pid,
        parent_pid: Option<Pid>,
        priority: Priority,
        program: Program,
        start_time: Timestamp,
    ) -> Self {
        Self {
            pid,
            parent_pid,
            priority,
            state: ProcessState::Ready,
            accumulator: 0,
            start_time,
            cpu_time_used: 0,
            program,
            program_counter: 0,
        }
    }

    /// Whether the program counter has run past the last instruction
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.program_counter >= self.program.len()
    }

    pub fn info(&self) -> ProcessInfo {
        ProcessInfo::from(self)
    }
}

/// Reported fields of a process
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ProcessInfo {
    pub pid: Pid,
    pub parent_pid: Option<Pid>,
    pub priority: Priority,
    pub accumulator: Word,
    pub start_time: Timestamp,
    pub cpu_time_used: u32,
}

impl From<&Process> for ProcessInfo {
    fn from(process: &Process) -> Self {
        Self {
            pid: process.pid,
            parent_pid: process.parent_pid,
            priority: process.priority,
            accumulator: process.accumulator,
            start_time: process.start_time,
            cpu_time_used: process.cpu_time_used,
        }
    }
}
