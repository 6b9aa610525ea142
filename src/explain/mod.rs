//! Explanation subsystem
//!
//! Explains one outcome in terms of the predicates that supported or
//! contradicted it, using exactly the per-condition semantics of rule
//! evaluation.

mod explanation;
mod formula;

pub use explanation::{ExplainedPredicate, Explanation, ExplanationBuilder};
pub use formula::{Formula, Notation};
