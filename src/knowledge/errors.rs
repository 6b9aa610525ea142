//! Knowledge base error types
//!
//! Error codes:
//! - DIAG_KB_UNREADABLE (FATAL)
//! - DIAG_KB_MALFORMED (FATAL)
//! - DIAG_KB_WRITE_FAILED (REJECT)
//!
//! Only load failures are fatal. Everything that goes wrong after a
//! knowledge base is loaded is reported as a warning instead.

use std::fmt;

/// Severity levels for knowledge base errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Request rejected, engine keeps running
    Reject,
    /// Engine cannot be constructed
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Reject => write!(f, "REJECT"),
            Severity::Fatal => write!(f, "FATAL"),
        }
    }
}

/// Knowledge base error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KnowledgeErrorCode {
    /// Source file could not be read
    DiagKbUnreadable,
    /// Source is not a well-formed knowledge base document
    DiagKbMalformed,
    /// Knowledge base could not be written back to disk
    DiagKbWriteFailed,
}

impl KnowledgeErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            KnowledgeErrorCode::DiagKbUnreadable => "DIAG_KB_UNREADABLE",
            KnowledgeErrorCode::DiagKbMalformed => "DIAG_KB_MALFORMED",
            KnowledgeErrorCode::DiagKbWriteFailed => "DIAG_KB_WRITE_FAILED",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        match self {
            KnowledgeErrorCode::DiagKbWriteFailed => Severity::Reject,
            _ => Severity::Fatal,
        }
    }
}

impl fmt::Display for KnowledgeErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Knowledge base error with full context
#[derive(Debug)]
pub struct KnowledgeError {
    code: KnowledgeErrorCode,
    message: String,
    /// File path or other origin label of the source
    origin: String,
}

impl KnowledgeError {
    /// Create an unreadable source error
    pub fn unreadable(origin: impl Into<String>, reason: impl fmt::Display) -> Self {
        let origin = origin.into();
        Self {
            code: KnowledgeErrorCode::DiagKbUnreadable,
            message: format!("Cannot read knowledge base '{}': {}", origin, reason),
            origin,
        }
    }

    /// Create a malformed source error
    pub fn malformed(origin: impl Into<String>, reason: impl fmt::Display) -> Self {
        let origin = origin.into();
        Self {
            code: KnowledgeErrorCode::DiagKbMalformed,
            message: format!("Malformed knowledge base '{}': {}", origin, reason),
            origin,
        }
    }

    /// Create a write failure error
    pub fn write_failed(origin: impl Into<String>, reason: impl fmt::Display) -> Self {
        let origin = origin.into();
        Self {
            code: KnowledgeErrorCode::DiagKbWriteFailed,
            message: format!("Cannot write knowledge base '{}': {}", origin, reason),
            origin,
        }
    }

    /// Returns the error code
    pub fn code(&self) -> KnowledgeErrorCode {
        self.code
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the origin the error refers to
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Returns whether this is a fatal error
    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}

impl fmt::Display for KnowledgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.code.severity(), self.code.code(), self.message)
    }
}

impl std::error::Error for KnowledgeError {}

/// Result type for knowledge base operations
pub type KnowledgeResult<T> = Result<T, KnowledgeError>;
