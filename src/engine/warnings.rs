//! Non-fatal conditions signalled to the caller
//!
//! Warning codes:
//! - DIAG_KB_EMPTY
//! - DIAG_UNKNOWN_PREDICATE
//! - DIAG_UNKNOWN_OUTCOME
//!
//! Warnings never abort the interactive flow. Each one is logged at WARN
//! when raised and queued on the session so the presentation layer can
//! surface it.

use std::fmt;

use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::observability::{warn_event, Event};

/// A recoverable condition observed by the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// Knowledge base has no predicates or no rules
    EmptyKnowledgeBase { predicates: usize, rules: usize },
    /// A fact was set for a code that is not a declared predicate
    UnknownPredicate { code: String },
    /// Evaluation or explanation was requested for an undefined outcome
    UnknownOutcome { outcome: String },
}

impl Warning {
    /// Returns the stable warning code
    pub fn code(&self) -> &'static str {
        match self {
            Warning::EmptyKnowledgeBase { .. } => "DIAG_KB_EMPTY",
            Warning::UnknownPredicate { .. } => "DIAG_UNKNOWN_PREDICATE",
            Warning::UnknownOutcome { .. } => "DIAG_UNKNOWN_OUTCOME",
        }
    }

    /// Returns the event logged for this warning
    pub fn event(&self) -> Event {
        match self {
            Warning::EmptyKnowledgeBase { .. } => Event::KnowledgeEmpty,
            Warning::UnknownPredicate { .. } => Event::FactIgnored,
            Warning::UnknownOutcome { .. } => Event::OutcomeUnknown,
        }
    }

    /// Human-readable message
    pub fn message(&self) -> String {
        match self {
            Warning::EmptyKnowledgeBase { predicates, rules } => format!(
                "Knowledge base is empty ({} predicates, {} rules); no diagnosis or question is possible",
                predicates, rules
            ),
            Warning::UnknownPredicate { code } => {
                format!("Unknown predicate '{}'; fact ignored", code)
            }
            Warning::UnknownOutcome { outcome } => {
                format!("Outcome '{}' is not defined", outcome)
            }
        }
    }

    /// Logs the warning at WARN
    pub fn emit(&self) {
        match self {
            Warning::EmptyKnowledgeBase { predicates, rules } => {
                let predicates = predicates.to_string();
                let rules = rules.to_string();
                warn_event(
                    self.event(),
                    &[("predicates", predicates.as_str()), ("rules", rules.as_str())],
                );
            }
            Warning::UnknownPredicate { code } => {
                warn_event(self.event(), &[("code", code.as_str())]);
            }
            Warning::UnknownOutcome { outcome } => {
                warn_event(self.event(), &[("outcome", outcome.as_str())]);
            }
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[WARN] {}: {}", self.code(), self.message())
    }
}

impl Serialize for Warning {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Warning", 2)?;
        state.serialize_field("code", self.code())?;
        state.serialize_field("message", &self.message())?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_codes() {
        let empty = Warning::EmptyKnowledgeBase {
            predicates: 0,
            rules: 0,
        };
        assert_eq!(empty.code(), "DIAG_KB_EMPTY");
        assert_eq!(
            Warning::UnknownPredicate { code: "x".into() }.code(),
            "DIAG_UNKNOWN_PREDICATE"
        );
        assert_eq!(
            Warning::UnknownOutcome {
                outcome: "Y".into()
            }
            .code(),
            "DIAG_UNKNOWN_OUTCOME"
        );
    }

    #[test]
    fn test_warning_events() {
        assert_eq!(
            Warning::UnknownPredicate { code: "x".into() }.event(),
            Event::FactIgnored
        );
        assert_eq!(
            Warning::UnknownOutcome {
                outcome: "Y".into()
            }
            .event(),
            Event::OutcomeUnknown
        );
    }

    #[test]
    fn test_warning_display() {
        let warning = Warning::UnknownPredicate { code: "f9".into() };
        let display = warning.to_string();
        assert!(display.starts_with("[WARN] DIAG_UNKNOWN_PREDICATE"));
        assert!(display.contains("f9"));
        // This just verifies no panic
        warning.emit();
    }

    #[test]
    fn test_warning_serializes_code_and_message() {
        let warning = Warning::UnknownOutcome {
            outcome: "Measles".into(),
        };
        let value = serde_json::to_value(&warning).unwrap();
        assert_eq!(value["code"], "DIAG_UNKNOWN_OUTCOME");
        assert!(value["message"].as_str().unwrap().contains("Measles"));
    }
}
