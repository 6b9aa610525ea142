//! Adaptive interview driver
//!
//! The queue is seeded with the most important predicates and recomputed
//! after every answer from [`Session::critical_questions`]. It is never
//! reused once facts change. The interview is finished as soon as a
//! freshly computed queue is empty, which may happen before every
//! predicate has been asked.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::session::{FactUpdate, Progress, Session};
use crate::explain::Explanation;
use crate::inference::Diagnosis;
use crate::knowledge::Predicate;
use crate::observability::{log_event_with_fields, Event};

/// Queue sizes for an interview
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterviewConfig {
    /// Questions queued before the first answer
    pub initial_batch: usize,
    /// Questions queued after each answer
    pub batch_size: usize,
}

impl Default for InterviewConfig {
    fn default() -> Self {
        Self {
            initial_batch: 10,
            batch_size: 5,
        }
    }
}

/// Final report of an interview
#[derive(Debug, Clone, Serialize)]
pub struct InterviewSummary {
    pub session_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub answered: usize,
    pub total_predicates: usize,
    pub diagnoses: Vec<Diagnosis>,
    /// Explanation of the highest-scoring diagnosis
    pub best: Option<Explanation>,
}

/// Asks one question at a time until nothing discriminates any more
#[derive(Debug)]
pub struct Interview {
    session: Session,
    config: InterviewConfig,
    queue: VecDeque<String>,
}

impl Interview {
    /// Starts an interview over `session`, seeding the queue from its current facts.
    pub fn new(session: Session, config: InterviewConfig) -> Self {
        let mut interview = Self {
            session,
            config,
            queue: VecDeque::new(),
        };
        interview.seed();
        interview
    }

    /// Code of the question being asked
    pub fn current(&self) -> Option<&str> {
        self.queue.front().map(String::as_str)
    }

    /// The question being asked, with its description
    pub fn current_question(&self) -> Option<Predicate> {
        self.current()
            .and_then(|code| self.session.engine().knowledge().predicate(code))
    }

    /// Answers the current question and recomputes the queue.
    ///
    /// Returns `None` once the interview is finished.
    pub fn answer(&mut self, value: bool) -> Option<FactUpdate> {
        let code = self.queue.pop_front()?;
        let update = self.session.set_fact(&code, value);

        self.queue = self
            .session
            .critical_questions(self.config.batch_size)
            .into();

        if self.queue.is_empty() {
            let progress = self.session.progress();
            let answered = progress.answered.to_string();
            let total = progress.total.to_string();
            log_event_with_fields(
                Event::InterviewComplete,
                &[("answered", answered.as_str()), ("total", total.as_str())],
            );
        }

        Some(update)
    }

    /// True when no question is left to ask
    pub fn is_finished(&self) -> bool {
        self.queue.is_empty()
    }

    /// Queued question codes, current first
    pub fn pending(&self) -> Vec<&str> {
        self.queue.iter().map(String::as_str).collect()
    }

    pub fn progress(&self) -> Progress {
        self.session.progress()
    }

    /// Clears every answer and reseeds the queue
    pub fn restart(&mut self) {
        self.session.reset();
        self.seed();
    }

    /// Diagnoses at `threshold` plus an explanation of the best one
    pub fn summary(&self, threshold: f64) -> InterviewSummary {
        let diagnoses = self.session.diagnoses(threshold);
        let best = diagnoses.first().map(|d| {
            self.session
                .engine()
                .explainer()
                .explain(&d.outcome, self.session.facts())
        });
        let progress = self.session.progress();

        InterviewSummary {
            session_id: self.session.id(),
            started_at: self.session.started_at(),
            answered: progress.answered,
            total_predicates: progress.total,
            diagnoses,
            best,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn seed(&mut self) {
        self.queue = self
            .session
            .first_questions(self.config.initial_batch)
            .into();
    }
}
