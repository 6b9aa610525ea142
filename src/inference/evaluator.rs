//! Rule satisfaction scoring
//!
//! For one outcome, every required predicate and every excluded predicate
//! is one condition. The satisfaction percentage is the share of
//! conditions that currently hold, scaled to 0-100.
//!
//! # Unanswered predicates
//!
//! An unanswered predicate is read as `false` on both sides of a rule.
//! For a required predicate that means "requirement unmet"; for an
//! excluded predicate it means "exclusion holds". Early in an interview,
//! exclusion-heavy rules therefore score optimistically and
//! requirement-heavy rules pessimistically. This asymmetry is intended
//! and is pinned by tests; see [`UNANSWERED_FACT_VALUE`].

use std::cmp::Ordering;

use serde::Serialize;

use super::facts::FactStore;
use crate::knowledge::{KnowledgeBase, Rule};

/// Value read for a predicate the caller has not answered
pub const UNANSWERED_FACT_VALUE: bool = false;

/// Whether a required predicate with value `value` counts as satisfied
pub fn requirement_holds(value: bool) -> bool {
    value
}

/// Whether an excluded predicate with raw value `raw` counts as satisfied
pub fn exclusion_holds(raw: bool) -> bool {
    !raw
}

/// One condition's contribution to a rule evaluation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Contribution {
    /// Predicate code
    pub code: String,
    /// Fact value read (unanswered reads as [`UNANSWERED_FACT_VALUE`])
    pub value: bool,
    /// Whether the condition holds
    pub satisfied: bool,
}

/// Per-condition detail of a rule evaluation, in rule order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Breakdown {
    /// Required predicates
    pub required: Vec<Contribution>,
    /// Excluded predicates
    pub excluded: Vec<Contribution>,
}

impl Breakdown {
    /// Number of conditions that hold
    pub fn satisfied_count(&self) -> usize {
        self.required
            .iter()
            .chain(self.excluded.iter())
            .filter(|c| c.satisfied)
            .count()
    }

    /// Number of conditions
    pub fn total(&self) -> usize {
        self.required.len() + self.excluded.len()
    }

    /// Returns true if there are no conditions
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Result of scoring one outcome against the current facts
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationResult {
    /// Outcome name
    pub outcome: String,
    /// Every condition holds
    pub fully_satisfied: bool,
    /// Share of conditions that hold, 0-100
    pub percentage: f64,
    /// Per-condition detail
    pub breakdown: Breakdown,
}

impl EvaluationResult {
    /// Zero-satisfaction result with an empty breakdown.
    ///
    /// Used for undefined outcomes and for rules without conditions.
    pub fn unsatisfied(outcome: impl Into<String>) -> Self {
        Self {
            outcome: outcome.into(),
            fully_satisfied: false,
            percentage: 0.0,
            breakdown: Breakdown::default(),
        }
    }
}

/// An outcome with its current satisfaction percentage
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnosis {
    /// Outcome name
    pub outcome: String,
    /// Satisfaction percentage, 0-100
    pub percentage: f64,
}

/// Scores outcome rules against a fact store.
///
/// Stateless apart from the borrowed knowledge base; every call recomputes
/// from the facts it is given.
pub struct RuleEvaluator<'a> {
    kb: &'a KnowledgeBase,
}

impl<'a> RuleEvaluator<'a> {
    /// Create an evaluator over `kb`
    pub fn new(kb: &'a KnowledgeBase) -> Self {
        Self { kb }
    }

    /// Scores one outcome.
    ///
    /// An undefined outcome yields [`EvaluationResult::unsatisfied`].
    pub fn evaluate(&self, outcome: &str, facts: &FactStore) -> EvaluationResult {
        match self.kb.rule(outcome) {
            Some(rule) => Self::evaluate_rule(outcome, rule, facts),
            None => EvaluationResult::unsatisfied(outcome),
        }
    }

    /// Scores a rule directly.
    pub fn evaluate_rule(outcome: &str, rule: &Rule, facts: &FactStore) -> EvaluationResult {
        if rule.is_unconditional() {
            // Never vacuously true
            return EvaluationResult::unsatisfied(outcome);
        }

        let required: Vec<Contribution> = rule
            .required
            .iter()
            .map(|code| {
                let value = facts.value_or_default(code);
                Contribution {
                    code: code.clone(),
                    value,
                    satisfied: requirement_holds(value),
                }
            })
            .collect();

        let excluded: Vec<Contribution> = rule
            .excluded
            .iter()
            .map(|code| {
                let raw = facts.value_or_default(code);
                Contribution {
                    code: code.clone(),
                    value: raw,
                    satisfied: exclusion_holds(raw),
                }
            })
            .collect();

        let breakdown = Breakdown { required, excluded };
        let satisfied = breakdown.satisfied_count();
        let total = breakdown.total();

        EvaluationResult {
            outcome: outcome.to_string(),
            fully_satisfied: satisfied == total,
            percentage: 100.0 * satisfied as f64 / total as f64,
            breakdown,
        }
    }

    /// Scores every outcome, percentage descending.
    ///
    /// Ties keep outcome-name order, so repeated calls on the same facts
    /// return the same sequence.
    pub fn evaluate_all(&self, facts: &FactStore) -> Vec<EvaluationResult> {
        let mut results: Vec<EvaluationResult> = self
            .kb
            .rules()
            .iter()
            .map(|(outcome, rule)| Self::evaluate_rule(outcome, rule, facts))
            .collect();

        results.sort_by(|a, b| by_percentage_desc(a.percentage, b.percentage));
        results
    }

    /// Outcomes whose percentage is at least `threshold`, percentage descending
    pub fn diagnoses(&self, facts: &FactStore, threshold: f64) -> Vec<Diagnosis> {
        self.evaluate_all(facts)
            .into_iter()
            .filter(|r| r.percentage >= threshold)
            .map(|r| Diagnosis {
                outcome: r.outcome,
                percentage: r.percentage,
            })
            .collect()
    }
}

fn by_percentage_desc(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn respiratory() -> KnowledgeBase {
        KnowledgeBase::default()
            .with_predicate("f1", "fever")
            .with_predicate("f2", "cough")
            .with_rule("Flu", Rule::new(["f1", "f2"], Vec::<String>::new()))
            .with_rule("Cold", Rule::new(["f2"], ["f1"]))
    }

    #[test]
    fn test_default_policy() {
        assert!(!UNANSWERED_FACT_VALUE);
        assert!(!requirement_holds(UNANSWERED_FACT_VALUE));
        assert!(exclusion_holds(UNANSWERED_FACT_VALUE));
        assert!(requirement_holds(true));
        assert!(!exclusion_holds(true));
    }

    #[test]
    fn test_no_facts() {
        let kb = respiratory();
        let evaluator = RuleEvaluator::new(&kb);
        let facts = FactStore::new();

        let flu = evaluator.evaluate("Flu", &facts);
        assert_eq!(flu.percentage, 0.0);
        assert!(!flu.fully_satisfied);

        let cold = evaluator.evaluate("Cold", &facts);
        assert_eq!(cold.percentage, 50.0);
        assert!(!cold.fully_satisfied);
        assert!(!cold.breakdown.required[0].satisfied);
        assert!(cold.breakdown.excluded[0].satisfied);
        assert!(!cold.breakdown.excluded[0].value);
    }

    #[test]
    fn test_all_facts_true() {
        let kb = respiratory();
        let evaluator = RuleEvaluator::new(&kb);
        let facts: FactStore = [("f1", true), ("f2", true)].into_iter().collect();

        let flu = evaluator.evaluate("Flu", &facts);
        assert_eq!(flu.percentage, 100.0);
        assert!(flu.fully_satisfied);

        let cold = evaluator.evaluate("Cold", &facts);
        assert_eq!(cold.percentage, 50.0);
        assert!(!cold.fully_satisfied);
        assert!(cold.breakdown.excluded[0].value);
        assert!(!cold.breakdown.excluded[0].satisfied);
    }

    #[test]
    fn test_exclusion_only_rule_fully_satisfied_without_answers() {
        let rule = Rule::new(Vec::<String>::new(), ["a", "b"]);
        let result = RuleEvaluator::evaluate_rule("Healthy", &rule, &FactStore::new());
        assert_eq!(result.percentage, 100.0);
        assert!(result.fully_satisfied);
    }

    #[test]
    fn test_unconditional_rule_is_never_satisfied() {
        let result = RuleEvaluator::evaluate_rule("Anything", &Rule::default(), &FactStore::new());
        assert_eq!(result.percentage, 0.0);
        assert!(!result.fully_satisfied);
        assert!(result.breakdown.is_empty());
    }

    #[test]
    fn test_unknown_outcome() {
        let kb = respiratory();
        let result = RuleEvaluator::new(&kb).evaluate("Measles", &FactStore::new());
        assert_eq!(result, EvaluationResult::unsatisfied("Measles"));
    }

    #[test]
    fn test_evaluate_all_sorted_with_name_ties() {
        let kb = respiratory()
            .with_rule("Allergy", Rule::new(["f2"], ["f1"]))
            .with_rule("Bronchitis", Rule::new(["f2"], Vec::<String>::new()));
        let results = RuleEvaluator::new(&kb).evaluate_all(&FactStore::new());

        let order: Vec<&str> = results.iter().map(|r| r.outcome.as_str()).collect();
        // Allergy and Cold tie at 50; Bronchitis and Flu tie at 0
        assert_eq!(order, vec!["Allergy", "Cold", "Bronchitis", "Flu"]);
    }

    #[test]
    fn test_diagnoses_threshold() {
        let kb = respiratory();
        let evaluator = RuleEvaluator::new(&kb);
        let facts: FactStore = [("f1", true), ("f2", true)].into_iter().collect();

        let diagnoses = evaluator.diagnoses(&facts, 60.0);
        assert_eq!(
            diagnoses,
            vec![Diagnosis {
                outcome: "Flu".into(),
                percentage: 100.0
            }]
        );

        assert_eq!(evaluator.diagnoses(&facts, 50.0).len(), 2);
    }
}
