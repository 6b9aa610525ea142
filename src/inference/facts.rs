//! Session-scoped fact store
//!
//! Holds only the predicates the caller has explicitly answered. A missing
//! key means "unknown", which is not the same as `false`; how unknown
//! values are read during evaluation is decided by the policy in
//! `evaluator`, not here.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::evaluator::UNANSWERED_FACT_VALUE;

/// Mapping from predicate code to the answered truth value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FactStore {
    facts: BTreeMap<String, bool>,
}

impl FactStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an answer, replacing any previous answer for `code`
    pub fn set(&mut self, code: impl Into<String>, value: bool) {
        self.facts.insert(code.into(), value);
    }

    /// The answered value, or `None` if `code` is unanswered
    pub fn get(&self, code: &str) -> Option<bool> {
        self.facts.get(code).copied()
    }

    /// The answered value, or `UNANSWERED_FACT_VALUE` if `code` is unanswered
    pub fn value_or_default(&self, code: &str) -> bool {
        self.get(code).unwrap_or(UNANSWERED_FACT_VALUE)
    }

    /// Returns true if `code` has been answered
    pub fn contains(&self, code: &str) -> bool {
        self.facts.contains_key(code)
    }

    /// Number of answered predicates
    pub fn len(&self) -> usize {
        self.facts.len()
    }

    /// Returns true if nothing has been answered
    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    /// Forgets every answer
    pub fn clear(&mut self) {
        self.facts.clear();
    }

    /// Answers in code order
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.facts.iter().map(|(code, value)| (code.as_str(), *value))
    }
}

impl<K: Into<String>> FromIterator<(K, bool)> for FactStore {
    fn from_iter<I: IntoIterator<Item = (K, bool)>>(iter: I) -> Self {
        Self {
            facts: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
