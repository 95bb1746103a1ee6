//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur during trace parsing
///
/// Every variant carries the 1-based line number and the offending line
/// so the user can find it in the original trace.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("line {line}: wait line has no time delay: {content:?}")]
    MalformedWait { line: usize, content: String },

    #[error("line {line}: malformed call ({reason}): {content:?}")]
    MalformedCall {
        line: usize,
        content: String,
        reason: String,
    },
}

impl ParseError {
    /// Line number the error was raised on
    pub fn line(&self) -> usize {
        match self {
            Self::MalformedWait { line, .. } | Self::MalformedCall { line, .. } => *line,
        }
    }
}

/// Errors that can occur while loading a replay configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
