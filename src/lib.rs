//! propdiag - An adaptive, deterministic propositional-logic diagnostic engine
//!
//! A knowledge base of named boolean predicates and per-outcome rules is
//! loaded once. Interview sessions then record answers, rank outcomes by
//! how much of their rule currently holds, pick the next most useful
//! predicate to ask about, and explain any outcome in terms of the
//! predicates that supported or contradicted it.

pub mod cli;
pub mod engine;
pub mod explain;
pub mod inference;
pub mod knowledge;
pub mod observability;
