/*!
 * Program Module
 * Instruction set and program sources
 */

pub mod instruction;
pub mod source;

pub use instruction::{parse_program, Instruction, Program};
pub use source::{FsProgramSource, MemoryProgramSource, ProgramSource, SourceError};
