//! Outcome explanations
//!
//! Turns the per-condition breakdown of one rule evaluation into four
//! buckets of predicates plus the rule's formula. Produces deterministic,
//! human-readable output.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use super::formula::Formula;
use crate::inference::{Contribution, EvaluationResult, FactStore, RuleEvaluator};
use crate::knowledge::KnowledgeBase;

/// A predicate as it appears in an explanation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExplainedPredicate {
    pub code: String,
    pub description: String,
}

impl ExplainedPredicate {
    pub fn new(code: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            description: description.into(),
        }
    }
}

/// Support and contradiction report for one outcome
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Explanation {
    /// Outcome name
    pub outcome: String,
    /// Satisfaction percentage, 0-100
    pub percentage: f64,
    /// Every condition holds
    pub fully_satisfied: bool,
    /// Required predicates that are true
    pub required_present: Vec<ExplainedPredicate>,
    /// Required predicates that are false or unanswered
    pub required_absent: Vec<ExplainedPredicate>,
    /// Excluded predicates that are false or unanswered
    pub exclusions_held: Vec<ExplainedPredicate>,
    /// Excluded predicates that are true
    pub exclusions_violated: Vec<ExplainedPredicate>,
    /// Rule rendered as a propositional formula
    pub formula: String,
}

impl Explanation {
    /// Number of predicates that support the outcome
    pub fn support_count(&self) -> usize {
        self.required_present.len() + self.exclusions_held.len()
    }

    /// Number of predicates that contradict the outcome
    pub fn contradiction_count(&self) -> usize {
        self.required_absent.len() + self.exclusions_violated.len()
    }
}

/// Builds explanations from rule evaluations
pub struct ExplanationBuilder<'a> {
    kb: &'a KnowledgeBase,
}

impl<'a> ExplanationBuilder<'a> {
    /// Create a builder over `kb`
    pub fn new(kb: &'a KnowledgeBase) -> Self {
        Self { kb }
    }

    /// Evaluates `outcome` against `facts` and explains the result.
    ///
    /// An undefined outcome gets a zero-satisfaction explanation with
    /// empty buckets.
    pub fn explain(&self, outcome: &str, facts: &FactStore) -> Explanation {
        let result = RuleEvaluator::new(self.kb).evaluate(outcome, facts);
        self.explain_result(&result)
    }

    /// Explains an evaluation that has already been computed.
    pub fn explain_result(&self, result: &EvaluationResult) -> Explanation {
        let required = &result.breakdown.required;
        let excluded = &result.breakdown.excluded;

        let formula = match self.kb.rule(&result.outcome) {
            Some(rule) => Formula::from_rule(result.outcome.as_str(), rule),
            None => Formula::unconditional(result.outcome.as_str()),
        };

        Explanation {
            outcome: result.outcome.clone(),
            percentage: result.percentage,
            fully_satisfied: result.fully_satisfied,
            required_present: self.bucket(required, |c| c.satisfied),
            required_absent: self.bucket(required, |c| !c.satisfied),
            exclusions_held: self.bucket(excluded, |c| c.satisfied),
            exclusions_violated: self.bucket(excluded, |c| !c.satisfied),
            formula: formula.to_string(),
        }
    }

    fn bucket<F>(&self, contributions: &[Contribution], keep: F) -> Vec<ExplainedPredicate>
    where
        F: Fn(&Contribution) -> bool,
    {
        let mut seen = HashSet::new();

        contributions
            .iter()
            .filter(|c| keep(*c) && seen.insert(c.code.as_str()))
            .map(|c| {
                // Undeclared codes describe themselves
                let description = self
                    .kb
                    .description(&c.code)
                    .unwrap_or(c.code.as_str());
                ExplainedPredicate::new(c.code.as_str(), description)
            })
            .collect()
    }
}

impl fmt::Display for Explanation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== EXPLANATION: {} ===", self.outcome)?;

        let status = if self.fully_satisfied {
            "FULLY SATISFIED"
        } else {
            "PARTIAL"
        };
        writeln!(f, "Satisfaction: {:.1}% ({})", self.percentage, status)?;

        let sections = [
            ("Required and present", &self.required_present),
            ("Required but absent", &self.required_absent),
            ("Excluded and absent", &self.exclusions_held),
            ("Excluded but present", &self.exclusions_violated),
        ];

        for (title, predicates) in sections {
            if predicates.is_empty() {
                continue;
            }
            writeln!(f, "{}:", title)?;
            for predicate in predicates {
                writeln!(f, "  - {}: {}", predicate.code, predicate.description)?;
            }
        }

        writeln!(f, "Formula: {}", self.formula)?;

        Ok(())
    }
}
