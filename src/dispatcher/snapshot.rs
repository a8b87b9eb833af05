/*!
 * State Snapshot
 * Immutable view of the clock, running slot and queues
 */

use crate::core::errors::SimResult;
use crate::core::types::{Pid, Priority, Timestamp};
use crate::process::{ProcessInfo, ProcessManager};
use serde::{Deserialize, Serialize};
use std::fmt;

const BANNER: &str = "****************************************************************";

/// Ready processes of one priority level, in FIFO order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ReadyLevel {
    pub priority: Priority,
    pub processes: Vec<ProcessInfo>,
}

/// System state at one instant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Snapshot {
    pub clock: Timestamp,
    pub running: Option<ProcessInfo>,
    pub blocked: Vec<ProcessInfo>,
    pub ready: Vec<ReadyLevel>,
}

impl Snapshot {
    /// Capture the manager's state without mutating it
    pub fn capture(manager: &ProcessManager) -> SimResult<Self> {
        let info = |pid: Pid| manager.require_process(pid).map(ProcessInfo::from);

        let running = manager.running().map(info).transpose()?;

        let queues = manager.scheduler().queues();
        let blocked = queues.blocked().map(info).collect::<SimResult<Vec<_>>>()?;

        let ready = (0..queues.levels())
            .map(|priority| {
                Ok(ReadyLevel {
                    priority,
                    processes: queues.ready_at(priority).map(info).collect::<SimResult<_>>()?,
                })
            })
            .collect::<SimResult<Vec<_>>>()?;

        Ok(Self {
            clock: manager.clock(),
            running,
            blocked,
            ready,
        })
    }

    pub fn running_pid(&self) -> Option<Pid> {
        self.running.as_ref().map(|p| p.pid)
    }

    pub fn blocked_pids(&self) -> Vec<Pid> {
        self.blocked.iter().map(|p| p.pid).collect()
    }

    /// Ready pids of one level, empty for unknown levels
    pub fn ready_pids(&self, priority: Priority) -> Vec<Pid> {
        self.ready
            .iter()
            .find(|level| level.priority == priority)
            .map(|level| level.processes.iter().map(|p| p.pid).collect())
            .unwrap_or_default()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for ProcessInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.parent_pid {
            Some(ppid) => write!(f, "{} {}", self.pid, ppid)?,
            None => write!(f, "{} -", self.pid)?,
        }
        write!(
            f,
            " {} {} {} {}",
            self.priority, self.accumulator, self.start_time, self.cpu_time_used
        )
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", BANNER)?;
        writeln!(f, "The current system state is as follows:")?;
        writeln!(f, "{}", BANNER)?;
        writeln!(f, "CURRENT TIME: {}", self.clock)?;

        if let Some(running) = &self.running {
            writeln!(f, "RUNNING PROCESS:")?;
            writeln!(f, "{}", running)?;
        }

        if !self.blocked.is_empty() {
            writeln!(f, "BLOCKED PROCESSES:")?;
            for process in &self.blocked {
                writeln!(f, "{}", process)?;
            }
        }

        writeln!(f, "PROCESSES READY TO EXECUTE:")?;
        for level in &self.ready {
            writeln!(f, "Queue of processes with priority {}:", level.priority)?;
            for process in &level.processes {
                writeln!(f, "{}", process)?;
            }
        }

        write!(f, "{}", BANNER)
    }
}
