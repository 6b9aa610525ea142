//! Observable events for propdiag
//!
//! Events are explicit and typed. Every log line emitted by the engine
//! or the CLI names one of these.

use std::fmt;

/// Observable events in propdiag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Knowledge base
    /// Knowledge base load begins
    KnowledgeLoadBegin,
    /// Knowledge base loaded and indexed
    KnowledgeLoaded,
    /// Knowledge base could not be read or parsed (FATAL)
    KnowledgeLoadFailed,
    /// Knowledge base has no predicates or no rules
    KnowledgeEmpty,
    /// A rule references a code that is not a declared predicate
    KnowledgeUnknownReference,

    // Session
    /// Session created
    SessionStart,
    /// Session facts cleared
    SessionReset,
    /// Fact recorded
    FactSet,
    /// Fact for an undeclared predicate ignored
    FactIgnored,
    /// Evaluation or explanation requested for an undefined outcome
    OutcomeUnknown,

    // Interview
    /// No discriminating question remains
    InterviewComplete,

    // Request loop
    /// JSON request loop started
    ServeBegin,
    /// JSON request loop finished
    ServeEnd,
    /// A request could not be handled
    RequestRejected,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::KnowledgeLoadBegin => "KB_LOAD_BEGIN",
            Event::KnowledgeLoaded => "KB_LOADED",
            Event::KnowledgeLoadFailed => "KB_LOAD_FAILED",
            Event::KnowledgeEmpty => "KB_EMPTY",
            Event::KnowledgeUnknownReference => "KB_UNKNOWN_REFERENCE",

            Event::SessionStart => "SESSION_START",
            Event::SessionReset => "SESSION_RESET",
            Event::FactSet => "FACT_SET",
            Event::FactIgnored => "FACT_IGNORED",
            Event::OutcomeUnknown => "OUTCOME_UNKNOWN",

            Event::InterviewComplete => "INTERVIEW_COMPLETE",

            Event::ServeBegin => "SERVE_BEGIN",
            Event::ServeEnd => "SERVE_END",
            Event::RequestRejected => "REQUEST_REJECTED",
        }
    }

    /// Returns true if this event indicates a fatal condition
    pub fn is_fatal(&self) -> bool {
        matches!(self, Event::KnowledgeLoadFailed)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
