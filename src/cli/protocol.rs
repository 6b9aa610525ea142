//! JSON-lines request protocol
//!
//! One request object per line, tagged by `op`:
//!
//! ```text
//! {"op": "set_fact", "code": "f1", "value": true}
//! {"op": "next_question"}
//! {"op": "first_questions", "n": 10}
//! {"op": "critical_questions", "n": 5}
//! {"op": "diagnoses", "threshold": 30.0}
//! {"op": "evaluate", "outcome": "Flu"}      // omit outcome for every outcome
//! {"op": "explain", "outcome": "Flu"}
//! {"op": "reset"}
//! {"op": "progress"}
//! ```
//!
//! Every request runs against the single session owned by the serving loop.

use serde::Deserialize;
use serde_json::{json, Value};

use super::errors::ProtocolError;
use crate::engine::{FactUpdate, Session};

fn default_batch() -> usize {
    5
}

/// A parsed request
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Request {
    SetFact {
        code: String,
        value: bool,
    },
    NextQuestion,
    FirstQuestions {
        #[serde(default = "default_batch")]
        n: usize,
    },
    CriticalQuestions {
        #[serde(default = "default_batch")]
        n: usize,
    },
    Diagnoses {
        #[serde(default)]
        threshold: Option<f64>,
    },
    Evaluate {
        #[serde(default)]
        outcome: Option<String>,
    },
    Explain {
        outcome: String,
    },
    Reset,
    Progress,
}

impl Request {
    /// Parses one request line
    pub fn parse(line: &str) -> Result<Self, ProtocolError> {
        serde_json::from_str(line).map_err(|e| ProtocolError::MalformedRequest(e.to_string()))
    }

    /// Operation name, as sent on the wire
    pub fn op(&self) -> &'static str {
        match self {
            Request::SetFact { .. } => "set_fact",
            Request::NextQuestion => "next_question",
            Request::FirstQuestions { .. } => "first_questions",
            Request::CriticalQuestions { .. } => "critical_questions",
            Request::Diagnoses { .. } => "diagnoses",
            Request::Evaluate { .. } => "evaluate",
            Request::Explain { .. } => "explain",
            Request::Reset => "reset",
            Request::Progress => "progress",
        }
    }

    /// Runs the request against `session`.
    ///
    /// `default_threshold` applies when a `diagnoses` request names none.
    pub fn apply(self, session: &mut Session, default_threshold: f64) -> Result<Value, ProtocolError> {
        let data = match self {
            Request::SetFact { code, value } => match session.set_fact(&code, value) {
                FactUpdate::Recorded { previous } => {
                    json!({"recorded": true, "code": code, "value": value, "previous": previous})
                }
                FactUpdate::Ignored(_) => json!({"recorded": false, "code": code}),
            },
            Request::NextQuestion => {
                let question = session
                    .next_best_question()
                    .and_then(|code| session.engine().knowledge().predicate(&code));
                serde_json::to_value(question)?
            }
            Request::FirstQuestions { n } => json!(session.first_questions(n)),
            Request::CriticalQuestions { n } => json!(session.critical_questions(n)),
            Request::Diagnoses { threshold } => {
                let threshold = threshold.unwrap_or(default_threshold);
                if !(0.0..=100.0).contains(&threshold) {
                    return Err(ProtocolError::InvalidArgument(format!(
                        "threshold must be within [0, 100], got {}",
                        threshold
                    )));
                }
                serde_json::to_value(session.diagnoses(threshold))?
            }
            Request::Evaluate { outcome: Some(outcome) } => {
                serde_json::to_value(session.evaluate(&outcome))?
            }
            Request::Evaluate { outcome: None } => serde_json::to_value(session.evaluate_all())?,
            Request::Explain { outcome } => {
                let explanation = session.explain(&outcome);
                json!({
                    "explanation": serde_json::to_value(&explanation)?,
                    "text": explanation.to_string()
                })
            }
            Request::Reset => {
                session.reset();
                json!({"reset": true})
            }
            Request::Progress => {
                let progress = session.progress();
                json!({
                    "answered": progress.answered,
                    "total": progress.total,
                    "fraction": progress.fraction()
                })
            }
        };

        Ok(data)
    }
}
