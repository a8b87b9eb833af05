/*!
 * Core Module
 * Shared types, errors, limits and configuration
 */

pub mod config;
pub mod errors;
pub mod limits;
pub mod types;

pub use config::{SimConfig, SnapshotFormat};
pub use errors::{SimError, SimResult};
pub use limits::time_slice;
pub use types::{Pid, Priority, Timestamp, Word};
