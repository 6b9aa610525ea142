//! CLI-specific error types
//!
//! `CliError` ends the process. `ProtocolError` rejects a single request
//! in the serving loop and the loop continues.

use std::fmt;
use std::io;

use thiserror::Error;

use crate::knowledge::KnowledgeError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// I/O error (stdin/stdout)
    IoError,
    /// Knowledge base could not be loaded
    KnowledgeError,
    /// Input document is not what the command expects
    InvalidInput,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "DIAG_CLI_CONFIG_ERROR",
            Self::IoError => "DIAG_CLI_IO_ERROR",
            Self::KnowledgeError => "DIAG_CLI_KNOWLEDGE_ERROR",
            Self::InvalidInput => "DIAG_CLI_INVALID_INPUT",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    /// Invalid input document
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::InvalidInput, msg)
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<KnowledgeError> for CliError {
    fn from(e: KnowledgeError) -> Self {
        Self::new(CliErrorCode::KnowledgeError, e.to_string())
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

/// Errors that reject one request of the serving loop
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Line is not valid JSON or does not match any operation
    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    /// Operation is known but an argument is out of range
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Response could not be encoded
    #[error("Encoding failed: {0}")]
    Encoding(#[from] serde_json::Error),
}

impl ProtocolError {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::MalformedRequest(_) => "DIAG_PROTOCOL_MALFORMED_REQUEST",
            Self::InvalidArgument(_) => "DIAG_PROTOCOL_INVALID_ARGUMENT",
            Self::Encoding(_) => "DIAG_PROTOCOL_ENCODING",
        }
    }
}
