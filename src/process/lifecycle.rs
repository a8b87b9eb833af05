/*!
 * Process Lifecycle
 * Termination, fork, program replacement and wake-up
 */

use super::executor::{StepOutcome, TerminationReason};
use super::manager::ProcessManager;
use super::types::{Process, ProcessState};
use crate::core::errors::{SimError, SimResult};
use crate::core::types::Pid;
use crate::program::parse_program;
use tracing::{info, warn};

impl ProcessManager {
    /// Destroy the running process and hand the CPU to the next one
    ///
    /// No archive is kept: the record is gone and children keep a dangling
    /// `parent_pid`.
    pub(super) fn terminate_running(&mut self, pid: Pid) -> SimResult<()> {
        self.scheduler.release_running();
        let mut process = self.table.remove(pid).ok_or(SimError::MissingProcess(pid))?;
        process.state = ProcessState::Terminated;
        self.scheduler.stats_mut().terminations += 1;

        info!(
            pid,
            accumulator = process.accumulator,
            clock = self.clock,
            "Process terminated"
        );

        self.scheduler.reschedule(&mut self.table)?;
        Ok(())
    }

    /// Copy the running process into a new child
    ///
    /// The child inherits program, accumulator and priority and resumes right
    /// after the F. The parent skips the next `skip` instructions.
    pub(super) fn fork(&mut self, pid: Pid, skip: usize) -> SimResult<Pid> {
        let parent = self.table.require(pid)?;
        let child = Process {
            parent_pid: Some(pid),
            state: ProcessState::Ready,
            start_time: self.clock,
            cpu_time_used: 0,
            program_counter: parent.program_counter + 1,
            ..parent.clone()
        };
        let priority = child.priority;

        let child_pid = self.table.insert_record(child);
        self.scheduler.admit(&mut self.table, child_pid)?;

        let parent = self.table.require_mut(pid)?;
        parent.program_counter = parent.program_counter.saturating_add(skip).saturating_add(1);
        self.scheduler.record_execution(pid);
        self.scheduler.stats_mut().forks += 1;

        info!(parent = pid, child = child_pid, priority, "Process forked");
        Ok(child_pid)
    }

    /// Swap the running process's program for one from the program source
    pub(super) fn replace_program(&mut self, pid: Pid, name: String) -> SimResult<StepOutcome> {
        let lines = match self.source.load(&name) {
            Ok(lines) => lines,
            Err(e) => {
                let error = SimError::ProgramSourceUnavailable {
                    name,
                    reason: e.to_string(),
                };
                warn!(pid, %error, "Program replacement failed, keeping current program");

                self.table.require_mut(pid)?.program_counter += 1;
                self.scheduler.record_execution(pid);
                return Ok(StepOutcome::ReplaceFailed { pid, error });
            }
        };

        let program = match parse_program(lines) {
            Ok(program) => program,
            Err(error) => {
                warn!(pid, program = %name, %error, "Replacement program rejected, terminating process");
                self.terminate_running(pid)?;
                return Ok(StepOutcome::Terminated {
                    pid,
                    reason: TerminationReason::Faulted(error),
                });
            }
        };

        let process = self.table.require_mut(pid)?;
        process.program = program;
        process.program_counter = 0;
        self.scheduler.record_execution(pid);
        self.scheduler.stats_mut().replacements += 1;

        info!(pid, program = %name, "Program replaced");
        Ok(StepOutcome::Replaced { pid, program: name })
    }

    /// Move the longest-blocked process back to its ready queue and reschedule
    ///
    /// A no-op when nothing is blocked.
    pub fn wake(&mut self) -> SimResult<Option<Pid>> {
        let woken = self.scheduler.wake(&mut self.table)?;
        if woken.is_some() {
            self.scheduler.reschedule(&mut self.table)?;
        }
        Ok(woken)
    }
}
