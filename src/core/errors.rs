/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use super::types::{Pid, Priority};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Simulator errors with serialization support
///
/// Process-level variants are contained to the offending process and reported
/// through step outcomes. `MissingProcess` means an internal invariant broke
/// and is the only variant that aborts a simulation.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum SimError {
    #[error("Unknown command: {0:?}")]
    #[diagnostic(
        code(dispatcher::unknown_command),
        help("Valid commands are Q (tick), U (wake), P (print) and T (terminate).")
    )]
    UnknownCommand(String),

    #[error("Unknown opcode {opcode:?} in instruction {line:?}")]
    #[diagnostic(
        code(program::unknown_opcode),
        help("Valid opcodes are S, A, D, B, E, F and R.")
    )]
    UnknownOpcode { line: String, opcode: String },

    #[error("Invalid argument in instruction {line:?}: {reason}")]
    #[diagnostic(
        code(program::invalid_argument),
        help("S, A and D take an integer, F takes a non-negative count, R takes a program name.")
    )]
    InvalidArgument { line: String, reason: String },

    #[error("Empty instruction {line:?}")]
    #[diagnostic(code(program::empty_instruction))]
    EmptyInstruction { line: String },

    #[error("Process {0} ran past the end of its program")]
    #[diagnostic(
        code(process::program_exhausted),
        help("End programs with an E instruction to terminate explicitly.")
    )]
    ProgramExhausted(Pid),

    #[error("Program {name:?} unavailable: {reason}")]
    #[diagnostic(
        code(program::source_unavailable),
        help("Check that the program exists under the configured program directory.")
    )]
    ProgramSourceUnavailable { name: String, reason: String },

    #[error("Priority {priority} out of range (levels: {levels})")]
    #[diagnostic(
        code(scheduler::invalid_priority),
        help("Priority must be lower than the configured number of levels.")
    )]
    InvalidPriority { priority: Priority, levels: u8 },

    #[error("Configuration error: {0}")]
    #[diagnostic(
        code(sim::configuration_error),
        help("Review the PROCSIM_* environment variables.")
    )]
    InvalidConfiguration(String),

    #[error("Process {0} referenced by the scheduler is missing from the process table")]
    #[diagnostic(
        code(sim::missing_process),
        help("Internal consistency fault. Please report this issue.")
    )]
    MissingProcess(Pid),

    #[error("Simulation has shut down; command rejected")]
    #[diagnostic(
        code(dispatcher::simulation_ended),
        help("Start a new simulation to keep issuing commands.")
    )]
    SimulationEnded,
}

impl SimError {
    /// Whether the fault breaks a simulator invariant and must stop the run
    pub fn is_fatal(&self) -> bool {
        matches!(self, SimError::MissingProcess(_))
    }
}

/// Result type for simulator operations
pub type SimResult<T> = std::result::Result<T, SimError>;
