/*!
 * Instruction Set
 * Parsed, typed form of the per-process instruction stream
 */

use crate::core::errors::{SimError, SimResult};
use crate::core::types::Word;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One simulated instruction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", content = "arg", rename_all = "snake_case")]
pub enum Instruction {
    /// `S v`: accumulator = v
    Set(Word),
    /// `A v`: accumulator += v
    Add(Word),
    /// `D v`: accumulator -= v
    Sub(Word),
    /// `B`: block until woken
    Block,
    /// `E`: terminate
    Exit,
    /// `F n`: fork; the child resumes after this instruction, the parent skips `n`
    Fork(usize),
    /// `R name`: replace the program with the named one
    Replace(String),
}

impl Instruction {
    /// Opcode letter as written in program text
    pub const fn opcode(&self) -> char {
        match self {
            Self::Set(_) => 'S',
            Self::Add(_) => 'A',
            Self::Sub(_) => 'D',
            Self::Block => 'B',
            Self::Exit => 'E',
            Self::Fork(_) => 'F',
            Self::Replace(_) => 'R',
        }
    }
}

fn single_arg<'a>(line: &str, args: &[&'a str]) -> SimResult<&'a str> {
    match args {
        [arg] => Ok(*arg),
        [] => Err(SimError::InvalidArgument {
            line: line.to_string(),
            reason: "missing argument".to_string(),
        }),
        _ => Err(SimError::InvalidArgument {
            line: line.to_string(),
            reason: format!("expected 1 argument, got {}", args.len()),
        }),
    }
}

fn no_args(line: &str, args: &[&str]) -> SimResult<()> {
    if args.is_empty() {
        Ok(())
    } else {
        Err(SimError::InvalidArgument {
            line: line.to_string(),
            reason: "takes no arguments".to_string(),
        })
    }
}

fn parse_number<T: FromStr>(line: &str, arg: &str) -> SimResult<T> {
    arg.parse().map_err(|_| SimError::InvalidArgument {
        line: line.to_string(),
        reason: format!("{:?} is not a valid number", arg),
    })
}

impl FromStr for Instruction {
    type Err = SimError;

    fn from_str(line: &str) -> SimResult<Self> {
        let mut tokens = line.split_whitespace();
        let opcode = tokens
            .next()
            .ok_or_else(|| SimError::EmptyInstruction {
                line: line.to_string(),
            })?;
        let args: Vec<&str> = tokens.collect();

        match opcode {
            "S" => Ok(Self::Set(parse_number(line, single_arg(line, &args)?)?)),
            "A" => Ok(Self::Add(parse_number(line, single_arg(line, &args)?)?)),
            "D" => Ok(Self::Sub(parse_number(line, single_arg(line, &args)?)?)),
            "B" => no_args(line, &args).map(|_| Self::Block),
            "E" => no_args(line, &args).map(|_| Self::Exit),
            "F" => Ok(Self::Fork(parse_number(line, single_arg(line, &args)?)?)),
            "R" => Ok(Self::Replace(single_arg(line, &args)?.to_string())),
            other => Err(SimError::UnknownOpcode {
                line: line.trim().to_string(),
                opcode: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Set(v) | Self::Add(v) | Self::Sub(v) => write!(f, "{} {}", self.opcode(), v),
            Self::Block | Self::Exit => write!(f, "{}", self.opcode()),
            Self::Fork(n) => write!(f, "F {}", n),
            Self::Replace(name) => write!(f, "R {}", name),
        }
    }
}

/// Parsed program
pub type Program = Vec<Instruction>;

/// Parse program text, one instruction per line
///
/// Blank lines are skipped. The first malformed line rejects the whole program.
pub fn parse_program<I, S>(lines: I) -> SimResult<Program>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .filter(|line| !line.as_ref().trim().is_empty())
        .map(|line| line.as_ref().parse())
        .collect()
}
