/*!
 * Process Module
 * Process records, scheduling, and instruction execution
 */

pub mod executor;
pub mod lifecycle;
pub mod manager;
pub mod manager_builder;
pub mod scheduler;
pub mod table;
pub mod types;

// Re-export for convenience
pub use executor::{StepOutcome, TerminationReason};
pub use manager::ProcessManager;
pub use manager_builder::ProcessManagerBuilder;
pub use scheduler::{QueueManager, Scheduler, SchedulerStats};
pub use table::ProcessTable;
pub use types::{Process, ProcessInfo, ProcessState};
