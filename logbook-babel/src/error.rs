//! Error types for format operations

use std::fmt;
use thiserror::Error;

/// What a caller asked a format to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Parse,
    Serialize,
    Options,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operation::Parse => "parsing",
            Operation::Serialize => "serialization",
            Operation::Options => "extra options",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatError {
    #[error("Format '{0}' not found")]
    FormatNotFound(String),
    /// The format exists but cannot do the requested operation.
    #[error("Format '{format}' does not support {operation}")]
    Unsupported { format: String, operation: Operation },
    #[error("Invalid value '{value}' for option '{key}'")]
    InvalidOption { key: String, value: String },
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl FormatError {
    pub(crate) fn unsupported(format: &str, operation: Operation) -> Self {
        FormatError::Unsupported {
            format: format.to_string(),
            operation,
        }
    }
}
