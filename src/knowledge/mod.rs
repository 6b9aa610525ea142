//! Knowledge base subsystem
//!
//! Predicates and outcome rules are loaded once and never change. The
//! importance index is derived from them once, right after loading.
//!
//! # Design Principles
//!
//! - Unreadable or malformed sources are fatal
//! - Empty knowledge bases load and are flagged, never rejected
//! - References to undeclared predicates are tolerated
//! - Deterministic iteration order (ordered by code / outcome name)

mod errors;
mod importance;
mod loader;
mod types;

pub use errors::{KnowledgeError, KnowledgeErrorCode, KnowledgeResult, Severity};
pub use importance::{ImportanceIndex, MAX_IMPORTANCE};
pub use loader::KnowledgeLoader;
pub use types::{KnowledgeBase, Predicate, Rule, RuleRole};
