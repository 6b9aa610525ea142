//! Inference subsystem
//!
//! Scores outcome rules against the facts of one session and picks the
//! next predicate to ask about.
//!
//! # Design Principles
//!
//! - Pure: every result is recomputed from (knowledge base, facts)
//! - Deterministic: same facts, same ranking, same questions
//! - Greedy: no optimality claim for the question order
//! - Unanswered predicates read as false on both sides of a rule

mod evaluator;
mod facts;
mod selector;

pub use evaluator::{
    exclusion_holds, requirement_holds, Breakdown, Contribution, Diagnosis, EvaluationResult,
    RuleEvaluator, UNANSWERED_FACT_VALUE,
};
pub use facts::FactStore;
pub use selector::{QuestionSelector, CRITICAL_THRESHOLD, LEADING_OUTCOMES};
