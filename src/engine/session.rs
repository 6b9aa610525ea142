//! Interview sessions
//!
//! A session owns the facts of one interview and reads the shared engine.
//! Every derived view (evaluations, diagnoses, questions, explanations) is
//! recomputed on demand from the current facts; nothing is cached across
//! a fact update.
//!
//! Sessions are not synchronized. Concurrent interviews each get their own
//! session from the same `Arc<Engine>`.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::engine::Engine;
use super::warnings::Warning;
use crate::explain::Explanation;
use crate::inference::{Diagnosis, EvaluationResult, FactStore};
use crate::observability::{log_event_with_fields, Event};

/// Result of [`Session::set_fact`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FactUpdate {
    /// The answer was stored. `previous` is the replaced answer, if any.
    Recorded { previous: Option<bool> },
    /// The code is not a declared predicate; nothing was stored.
    Ignored(Warning),
}

impl FactUpdate {
    /// Returns true if the answer was stored
    pub fn is_recorded(&self) -> bool {
        matches!(self, FactUpdate::Recorded { .. })
    }
}

/// How far an interview has progressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    /// Predicates answered so far
    pub answered: usize,
    /// Declared predicates
    pub total: usize,
}

impl Progress {
    /// Answered share in [0, 1]; 0 when there are no predicates
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.answered as f64 / self.total as f64
        }
    }
}

/// One interview: shared engine, owned facts
#[derive(Debug)]
pub struct Session {
    id: Uuid,
    started_at: DateTime<Utc>,
    engine: Arc<Engine>,
    facts: FactStore,
    warnings: Vec<Warning>,
}

impl Session {
    /// Starts a session with an empty fact store
    pub fn new(engine: Arc<Engine>) -> Self {
        let id = Uuid::new_v4();
        log_event_with_fields(Event::SessionStart, &[("session", id.to_string().as_str())]);

        Self {
            id,
            started_at: Utc::now(),
            engine,
            facts: FactStore::new(),
            warnings: Vec::new(),
        }
    }

    /// Session identifier
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// When the session started
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// The shared engine
    pub fn engine(&self) -> &Arc<Engine> {
        &self.engine
    }

    /// Answers recorded so far
    pub fn facts(&self) -> &FactStore {
        &self.facts
    }

    /// Records an answer.
    ///
    /// A code that is not a declared predicate is ignored and signalled
    /// with [`Warning::UnknownPredicate`].
    pub fn set_fact(&mut self, code: &str, value: bool) -> FactUpdate {
        if !self.engine.knowledge().has_predicate(code) {
            let warning = Warning::UnknownPredicate {
                code: code.to_string(),
            };
            self.signal(warning.clone());
            return FactUpdate::Ignored(warning);
        }

        let previous = self.facts.get(code);
        self.facts.set(code, value);

        let value = value.to_string();
        log_event_with_fields(
            Event::FactSet,
            &[("code", code), ("value", value.as_str())],
        );

        FactUpdate::Recorded { previous }
    }

    /// Unanswered predicate with the highest importance
    pub fn next_best_question(&self) -> Option<String> {
        self.engine.selector().next_best_question(&self.facts)
    }

    /// Up to `n` unanswered predicates by importance
    pub fn first_questions(&self, n: usize) -> Vec<String> {
        self.engine.selector().first_questions(&self.facts, n)
    }

    /// Up to `n` predicates that discriminate among the leading outcomes
    pub fn critical_questions(&self, n: usize) -> Vec<String> {
        self.engine.selector().critical_questions(&self.facts, n)
    }

    /// Outcomes at or above `threshold`, percentage descending
    pub fn diagnoses(&self, threshold: f64) -> Vec<Diagnosis> {
        self.engine.evaluator().diagnoses(&self.facts, threshold)
    }

    /// Every outcome, percentage descending
    pub fn evaluate_all(&self) -> Vec<EvaluationResult> {
        self.engine.evaluator().evaluate_all(&self.facts)
    }

    /// Scores one outcome.
    ///
    /// An undefined outcome yields a zero result and a
    /// [`Warning::UnknownOutcome`].
    pub fn evaluate(&mut self, outcome: &str) -> EvaluationResult {
        self.check_outcome(outcome);
        self.engine.evaluator().evaluate(outcome, &self.facts)
    }

    /// Explains one outcome against the current facts.
    ///
    /// An undefined outcome yields a zero explanation and a
    /// [`Warning::UnknownOutcome`].
    pub fn explain(&mut self, outcome: &str) -> Explanation {
        self.check_outcome(outcome);
        self.engine.explainer().explain(outcome, &self.facts)
    }

    /// Clears every answer. The engine is untouched.
    pub fn reset(&mut self) {
        let cleared = self.facts.len().to_string();
        self.facts.clear();
        log_event_with_fields(
            Event::SessionReset,
            &[("cleared", cleared.as_str()), ("session", self.id.to_string().as_str())],
        );
    }

    /// Answered vs declared predicates
    pub fn progress(&self) -> Progress {
        Progress {
            answered: self.facts.len(),
            total: self.engine.knowledge().predicate_count(),
        }
    }

    /// Warnings raised since the last call, oldest first
    pub fn take_warnings(&mut self) -> Vec<Warning> {
        std::mem::take(&mut self.warnings)
    }

    fn check_outcome(&mut self, outcome: &str) {
        if !self.engine.knowledge().has_outcome(outcome) {
            self.signal(Warning::UnknownOutcome {
                outcome: outcome.to_string(),
            });
        }
    }

    fn signal(&mut self, warning: Warning) {
        warning.emit();
        self.warnings.push(warning);
    }
}
