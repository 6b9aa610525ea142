//! Frequency-based predicate importance
//!
//! importance(p) = 100 * frequency(p) / max_q frequency(q), where the
//! frequency counts every occurrence of `p` in the required and excluded
//! lists of all rules. Codes that never occur get no entry and read as 0.
//!
//! This is a greedy relevance heuristic, not an information-gain measure.
//! It is computed once per knowledge base and never mutated.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use super::types::KnowledgeBase;

/// Upper bound of the importance scale
pub const MAX_IMPORTANCE: f64 = 100.0;

/// Static mapping from predicate code to a 0-100 relevance score
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportanceIndex {
    scores: BTreeMap<String, f64>,
}

impl ImportanceIndex {
    /// Computes the index for a knowledge base.
    pub fn compute(kb: &KnowledgeBase) -> Self {
        let mut frequency: BTreeMap<String, u64> = BTreeMap::new();
        for rule in kb.rules().values() {
            for code in rule.references() {
                *frequency.entry(code.to_string()).or_insert(0) += 1;
            }
        }

        // 1 keeps the division defined when no rule mentions anything
        let max = frequency.values().copied().max().unwrap_or(1).max(1) as f64;

        let scores = frequency
            .into_iter()
            .map(|(code, count)| (code, count as f64 / max * MAX_IMPORTANCE))
            .collect();

        Self { scores }
    }

    /// Importance of `code`; 0 for codes no rule mentions
    pub fn get(&self, code: &str) -> f64 {
        self.scores.get(code).copied().unwrap_or(0.0)
    }

    /// Returns true if `code` has an entry (appears in at least one rule)
    pub fn contains(&self, code: &str) -> bool {
        self.scores.contains_key(code)
    }

    /// Number of scored codes
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// Returns true if no code is scored
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Entries in code order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.scores.iter().map(|(code, score)| (code.as_str(), *score))
    }

    /// Entries by importance descending, then code ascending
    pub fn ranked(&self) -> Vec<(&str, f64)> {
        let mut entries: Vec<(&str, f64)> = self.iter().collect();
        entries.sort_by(|a, b| Self::rank_order(a.1, b.1));
        entries
    }

    /// Ordering that places higher importance first.
    ///
    /// Callers rely on `sort_by` being stable to keep code order among ties.
    pub fn rank_order(a: f64, b: f64) -> Ordering {
        b.partial_cmp(&a).unwrap_or(Ordering::Equal)
    }
}
