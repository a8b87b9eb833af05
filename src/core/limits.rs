/*!
 * System Limits and Constants
 *
 * Centralized location for simulator-wide limits and defaults.
 */

use super::types::Priority;

// =============================================================================
// SCHEDULER LIMITS
// =============================================================================

/// Default number of priority levels (quanta 1, 2, 4, 8)
pub const DEFAULT_PRIORITY_LEVELS: u8 = 4;

/// Upper bound on priority levels
/// The lowest level then gets a quantum of 2^15 instructions
pub const MAX_PRIORITY_LEVELS: u8 = 16;

/// Priority of the seeded init process
pub const INIT_PRIORITY: Priority = 0;

// =============================================================================
// PROGRAMS
// =============================================================================

/// Program run by the init process when no init program is configured
pub const DEFAULT_INIT_PROGRAM: &[&str] = &[
    "S 1000", "A 19", "A 20", "D 53", "A 55", "F 1", "R file_a", "F 1", "R file_b", "F 1",
    "R file_c", "F 1", "R file_d", "F 1", "R file_e", "E",
];

/// Quantum for a priority level: 2^level instructions per dispatch
///
/// Saturates at `u32::MAX` for levels past the width of the counter.
#[inline]
pub const fn time_slice(level: Priority) -> u32 {
    match 1u32.checked_shl(level as u32) {
        Some(slice) => slice,
        None => u32::MAX,
    }
}
