//! Next-question selection
//!
//! Two greedy heuristics, both computed locally from the current facts:
//!
//! 1. Importance ranking: ask the unanswered predicate that appears in
//!    the most rules.
//! 2. Discriminant selection: once some outcome reaches
//!    [`CRITICAL_THRESHOLD`], ask only predicates whose role (required,
//!    excluded, irrelevant) differs among the [`LEADING_OUTCOMES`] best
//!    scoring outcomes.
//!
//! Neither guarantees an optimal question order.
//!
//! Candidates are always declared predicates that appear in at least one
//! rule. A predicate no rule mentions is never proposed, and a code no
//! predicate declares is never proposed because it could not be answered.
//! Ties are broken by ascending code.

use std::collections::HashSet;

use super::evaluator::RuleEvaluator;
use super::facts::FactStore;
use crate::knowledge::{ImportanceIndex, KnowledgeBase, RuleRole};

/// Minimum percentage an outcome needs before discriminant selection applies
pub const CRITICAL_THRESHOLD: f64 = 10.0;

/// Number of leading outcomes compared by discriminant selection
pub const LEADING_OUTCOMES: usize = 3;

/// Chooses which predicate(s) to ask about next
pub struct QuestionSelector<'a> {
    kb: &'a KnowledgeBase,
    importance: &'a ImportanceIndex,
}

impl<'a> QuestionSelector<'a> {
    /// Create a selector over a knowledge base and its importance index
    pub fn new(kb: &'a KnowledgeBase, importance: &'a ImportanceIndex) -> Self {
        Self { kb, importance }
    }

    /// The unanswered predicate with the highest importance, if any
    pub fn next_best_question(&self, facts: &FactStore) -> Option<String> {
        self.ranked_unanswered(facts).into_iter().next()
    }

    /// Up to `n` unanswered predicates, importance descending
    pub fn first_questions(&self, facts: &FactStore, n: usize) -> Vec<String> {
        let mut ranked = self.ranked_unanswered(facts);
        ranked.truncate(n);
        ranked
    }

    /// Up to `n` predicates that best refine the current diagnosis.
    ///
    /// Falls back to [`first_questions`](Self::first_questions) while no
    /// outcome reaches [`CRITICAL_THRESHOLD`]. An empty result means no
    /// unanswered predicate separates the leading outcomes any more.
    pub fn critical_questions(&self, facts: &FactStore, n: usize) -> Vec<String> {
        let leading = RuleEvaluator::new(self.kb).diagnoses(facts, CRITICAL_THRESHOLD);

        if leading.is_empty() {
            return self.first_questions(facts, n);
        }

        let outcomes: Vec<&str> = leading
            .iter()
            .take(LEADING_OUTCOMES)
            .map(|d| d.outcome.as_str())
            .collect();

        let mut discriminants = self.discriminants(&outcomes, facts);
        discriminants.truncate(n);
        discriminants
    }

    /// Unanswered predicates whose role differs among `outcomes`, importance descending
    pub fn discriminants(&self, outcomes: &[&str], facts: &FactStore) -> Vec<String> {
        let mut found: Vec<String> = self
            .kb
            .predicates()
            .keys()
            .filter(|code| !facts.contains(code))
            .filter(|code| self.is_discriminant(code, outcomes))
            .cloned()
            .collect();

        found.sort_by(|a, b| {
            ImportanceIndex::rank_order(self.importance.get(a), self.importance.get(b))
        });
        found
    }

    /// True if `code` plays more than one distinct role across `outcomes`
    pub fn is_discriminant(&self, code: &str, outcomes: &[&str]) -> bool {
        let roles: HashSet<RuleRole> = self.roles(code, outcomes).into_iter().collect();
        roles.len() > 1
    }

    /// Role of `code` in each outcome's rule; undefined outcomes count as irrelevant
    pub fn roles(&self, code: &str, outcomes: &[&str]) -> Vec<RuleRole> {
        outcomes
            .iter()
            .map(|outcome| {
                self.kb
                    .rule(outcome)
                    .map_or(RuleRole::Irrelevant, |rule| rule.role_of(code))
            })
            .collect()
    }

    fn ranked_unanswered(&self, facts: &FactStore) -> Vec<String> {
        let mut candidates: Vec<String> = self
            .kb
            .predicates()
            .keys()
            .filter(|code| !facts.contains(code) && self.importance.contains(code))
            .cloned()
            .collect();

        candidates.sort_by(|a, b| {
            ImportanceIndex::rank_order(self.importance.get(a), self.importance.get(b))
        });
        candidates
    }
}
