/*!
 * External Commands
 * The single-character command alphabet
 */

use crate::core::errors::SimError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Command accepted by the dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    /// `Q`: execute one instruction and advance the clock
    Tick,
    /// `U`: unblock the oldest blocked process
    Wake,
    /// `P`: report the system state
    Inspect,
    /// `T`: report the system state and stop
    Shutdown,
}

impl Command {
    pub const fn letter(&self) -> char {
        match self {
            Self::Tick => 'Q',
            Self::Wake => 'U',
            Self::Inspect => 'P',
            Self::Shutdown => 'T',
        }
    }
}

impl FromStr for Command {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Q" => Ok(Self::Tick),
            "U" => Ok(Self::Wake),
            "P" => Ok(Self::Inspect),
            "T" => Ok(Self::Shutdown),
            other => Err(SimError::UnknownCommand(other.to_string())),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}
