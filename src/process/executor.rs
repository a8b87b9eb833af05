/*!
 * Instruction Executor
 * Runs one instruction of the running process per tick
 *
 * Program counter rules:
 * - S, A, D advance by one
 * - B advances by one before blocking, so a woken process resumes after it
 * - E destroys the record, nothing to advance
 * - F n moves the parent n + 1 ahead; the child starts right after the F
 * - R resets to zero on success and advances by one on failure
 */

use super::manager::ProcessManager;
use crate::core::errors::{SimError, SimResult};
use crate::core::types::{Pid, Word};
use crate::program::Instruction;
use serde::Serialize;
use tracing::{debug, warn};

/// Why a process left the table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", content = "error", rename_all = "snake_case")]
pub enum TerminationReason {
    /// Executed E
    Exit,
    /// Ran past the end of its program
    ProgramExhausted,
    /// Loaded a program that failed to parse
    Faulted(SimError),
}

/// Effect of one `step`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum StepOutcome {
    /// No process was running
    Idle,
    /// S, A or D executed
    Executed { pid: Pid, instruction: Instruction },
    Blocked { pid: Pid },
    Terminated { pid: Pid, reason: TerminationReason },
    Forked { parent: Pid, child: Pid },
    Replaced { pid: Pid, program: String },
    /// R could not load its program; the old program is kept
    ReplaceFailed { pid: Pid, error: SimError },
}

impl ProcessManager {
    /// Execute exactly one instruction of the running process
    ///
    /// Process-level faults are reported in the outcome. Only a broken
    /// table/scheduler invariant is returned as an error.
    pub fn step(&mut self) -> SimResult<StepOutcome> {
        let Some(pid) = self.scheduler.running() else {
            return Ok(StepOutcome::Idle);
        };

        let process = self.table.require(pid)?;
        if process.is_exhausted() {
            warn!(
                pid,
                error = %SimError::ProgramExhausted(pid),
                "Terminating process"
            );
            self.terminate_running(pid)?;
            return Ok(StepOutcome::Terminated {
                pid,
                reason: TerminationReason::ProgramExhausted,
            });
        }

        let instruction = process.program[process.program_counter].clone();
        debug!(pid, clock = self.clock, %instruction, "Executing instruction");

        match instruction {
            Instruction::Set(v) => self.apply_arithmetic(pid, instruction, |_| v),
            Instruction::Add(v) => {
                self.apply_arithmetic(pid, instruction, |acc| acc.wrapping_add(v))
            }
            Instruction::Sub(v) => {
                self.apply_arithmetic(pid, instruction, |acc| acc.wrapping_sub(v))
            }
            Instruction::Block => {
                self.table.require_mut(pid)?.program_counter += 1;
                self.scheduler.block_running(&mut self.table)?;
                self.scheduler.reschedule(&mut self.table)?;
                Ok(StepOutcome::Blocked { pid })
            }
            Instruction::Exit => {
                self.terminate_running(pid)?;
                Ok(StepOutcome::Terminated {
                    pid,
                    reason: TerminationReason::Exit,
                })
            }
            Instruction::Fork(skip) => {
                let child = self.fork(pid, skip)?;
                Ok(StepOutcome::Forked { parent: pid, child })
            }
            Instruction::Replace(name) => self.replace_program(pid, name),
        }
    }

    fn apply_arithmetic<F>(
        &mut self,
        pid: Pid,
        instruction: Instruction,
        op: F,
    ) -> SimResult<StepOutcome>
    where
        F: FnOnce(Word) -> Word,
    {
        let process = self.table.require_mut(pid)?;
        process.accumulator = op(process.accumulator);
        process.program_counter += 1;
        self.scheduler.record_execution(pid);
        Ok(StepOutcome::Executed { pid, instruction })
    }
}
