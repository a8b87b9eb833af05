/*!
 * Program Sources
 * Resolve a program name to its instruction lines
 */

use ahash::RandomState;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Program source errors
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("program not found: {0}")]
    NotFound(String),

    #[error("invalid program name: {0}")]
    InvalidName(String),

    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Capability used by the R instruction to fetch replacement programs
///
/// Implementations return raw lines; parsing happens in the interpreter.
pub trait ProgramSource: Send + Sync {
    /// Load the instruction lines of the named program
    fn load(&self, name: &str) -> Result<Vec<String>, SourceError>;
}

/// Programs stored as files under a root directory
#[derive(Debug, Clone)]
pub struct FsProgramSource {
    root: PathBuf,
}

impl FsProgramSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, name: &str) -> Result<PathBuf, SourceError> {
        let relative = Path::new(name);
        let escapes = relative.is_absolute()
            || relative
                .components()
                .any(|c| !matches!(c, std::path::Component::Normal(_)));
        if name.is_empty() || escapes {
            return Err(SourceError::InvalidName(name.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

impl ProgramSource for FsProgramSource {
    fn load(&self, name: &str) -> Result<Vec<String>, SourceError> {
        let path = self.resolve(name)?;
        match std::fs::read_to_string(&path) {
            Ok(text) => Ok(text.lines().map(str::to_string).collect()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(SourceError::NotFound(name.to_string()))
            }
            Err(source) => Err(SourceError::Io { path, source }),
        }
    }
}

/// In-memory program table
#[derive(Debug, Clone, Default)]
pub struct MemoryProgramSource {
    programs: HashMap<String, Vec<String>, RandomState>,
}

impl MemoryProgramSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a program
    pub fn with_program<I, S>(mut self, name: impl Into<String>, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(name, lines);
        self
    }

    pub fn insert<I, S>(&mut self, name: impl Into<String>, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.programs
            .insert(name.into(), lines.into_iter().map(Into::into).collect());
    }
}

impl ProgramSource for MemoryProgramSource {
    fn load(&self, name: &str) -> Result<Vec<String>, SourceError> {
        self.programs
            .get(name)
            .cloned()
            .ok_or_else(|| SourceError::NotFound(name.to_string()))
    }
}
