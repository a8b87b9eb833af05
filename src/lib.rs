/*!
 * procsim
 * Discrete-event simulator of a static-priority preemptive process scheduler
 * with a small per-process instruction set
 */

pub mod core;
pub mod dispatcher;
pub mod monitoring;
pub mod process;
pub mod program;

// Re-exports
pub use crate::core::{SimConfig, SimError, SimResult, SnapshotFormat};
pub use dispatcher::{Command, CommandDispatcher, Reply, Snapshot};
pub use monitoring::init_tracing;
pub use process::{Process, ProcessManager, ProcessState, StepOutcome, TerminationReason};
pub use program::{FsProgramSource, Instruction, MemoryProgramSource, ProgramSource};
