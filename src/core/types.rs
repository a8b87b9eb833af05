/*!
 * Core Types
 * Common types used across the simulator
 */

/// Process ID type
pub type Pid = u32;

/// Priority level (0 is the most urgent)
pub type Priority = u8;

/// Simulated clock value, in ticks since the simulation started
pub type Timestamp = u64;

/// Value held in a process accumulator
pub type Word = i64;
