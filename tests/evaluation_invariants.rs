//! Evaluation Invariant Tests
//!
//! Tests for rule evaluation and diagnosis invariants:
//! - Percentage is the exact share of conditions that hold
//! - fully_satisfied iff percentage == 100
//! - Unanswered required predicates are unmet, unanswered exclusions hold
//! - Rules with no conditions never score
//! - Diagnoses are sorted, filtered and idempotent

use propdiag::inference::{
    exclusion_holds, requirement_holds, FactStore, RuleEvaluator, UNANSWERED_FACT_VALUE,
};
use propdiag::knowledge::{KnowledgeBase, Rule};
use serde_json::json;

// =============================================================================
// Helper Functions
// =============================================================================

fn respiratory() -> KnowledgeBase {
    serde_json::from_value(json!({
        "predicates": {"f1": "fever", "f2": "cough"},
        "rules": {
            "Flu": {"required": ["f1", "f2"], "excluded": []},
            "Cold": {"required": ["f2"], "excluded": ["f1"]}
        }
    }))
    .unwrap()
}

fn wide() -> KnowledgeBase {
    serde_json::from_value(json!({
        "predicates": {"a": "a", "b": "b", "c": "c", "d": "d"},
        "rules": {
            "Wide": {"required": ["a", "b"], "excluded": ["c", "d"]}
        }
    }))
    .unwrap()
}

/// Every assignment of unanswered / true / false to `codes`
fn all_fact_stores(codes: &[&str]) -> Vec<FactStore> {
    let mut stores = vec![FactStore::new()];
    for code in codes {
        let mut next = Vec::with_capacity(stores.len() * 3);
        for store in stores {
            next.push(store.clone());
            for value in [true, false] {
                let mut with = store.clone();
                with.set(*code, value);
                next.push(with);
            }
        }
        stores = next;
    }
    stores
}

// =============================================================================
// Default Policy Tests
// =============================================================================

/// Unanswered reads as false on both sides; only the exclusion side holds.
#[test]
fn test_unanswered_default_policy() {
    assert!(!UNANSWERED_FACT_VALUE);
    assert!(!requirement_holds(UNANSWERED_FACT_VALUE));
    assert!(exclusion_holds(UNANSWERED_FACT_VALUE));
}

/// An unanswered excluded predicate supports the outcome before any answer.
#[test]
fn test_unanswered_exclusion_gives_provisional_support() {
    let kb = respiratory();
    let result = RuleEvaluator::new(&kb).evaluate("Cold", &FactStore::new());

    assert_eq!(result.percentage, 50.0);
    assert!(!result.fully_satisfied);
    assert!(result.breakdown.excluded[0].satisfied);
    assert!(!result.breakdown.required[0].satisfied);
}

// =============================================================================
// Percentage Tests
// =============================================================================

/// Percentage equals 100 * satisfied / total for every assignment.
#[test]
fn test_percentage_is_exact_share() {
    let kb = wide();
    let evaluator = RuleEvaluator::new(&kb);

    for facts in all_fact_stores(&["a", "b", "c", "d"]) {
        let result = evaluator.evaluate("Wide", &facts);

        let satisfied = ["a", "b"]
            .iter()
            .filter(|c| facts.get(c) == Some(true))
            .count()
            + ["c", "d"]
                .iter()
                .filter(|c| facts.get(c) != Some(true))
                .count();
        let expected = 100.0 * satisfied as f64 / 4.0;

        assert!((0.0..=100.0).contains(&result.percentage));
        assert_eq!(result.percentage, expected, "facts: {:?}", facts);
        assert_eq!(result.breakdown.satisfied_count(), satisfied);
        assert_eq!(result.breakdown.total(), 4);
    }
}

/// fully_satisfied holds exactly when the percentage is 100.
#[test]
fn test_fully_satisfied_iff_hundred() {
    let kb = wide();
    let evaluator = RuleEvaluator::new(&kb);

    let mut full = 0;
    for facts in all_fact_stores(&["a", "b", "c", "d"]) {
        let result = evaluator.evaluate("Wide", &facts);
        assert_eq!(result.fully_satisfied, result.percentage == 100.0);
        if result.fully_satisfied {
            full += 1;
        }
    }

    // a and b true; c and d each false or unanswered
    assert_eq!(full, 4);
}

/// A rule with no conditions scores zero and is never satisfied.
#[test]
fn test_unconditional_rule_never_scores() {
    let kb = respiratory().with_rule("Anything", Rule::default());
    let facts: FactStore = [("f1", true), ("f2", true)].into_iter().collect();

    let result = RuleEvaluator::new(&kb).evaluate("Anything", &facts);
    assert_eq!(result.percentage, 0.0);
    assert!(!result.fully_satisfied);

    let diagnoses = RuleEvaluator::new(&kb).diagnoses(&facts, 0.0);
    assert!(diagnoses.iter().any(|d| d.outcome == "Anything" && d.percentage == 0.0));
    assert!(RuleEvaluator::new(&kb)
        .diagnoses(&facts, 0.1)
        .iter()
        .all(|d| d.outcome != "Anything"));
}

/// Unknown outcomes evaluate to an empty zero result.
#[test]
fn test_unknown_outcome_is_zero() {
    let kb = respiratory();
    let result = RuleEvaluator::new(&kb).evaluate("Measles", &FactStore::new());

    assert_eq!(result.outcome, "Measles");
    assert_eq!(result.percentage, 0.0);
    assert!(!result.fully_satisfied);
    assert!(result.breakdown.is_empty());
}

// =============================================================================
// Diagnosis Tests
// =============================================================================

/// The fever and cough scenario end to end.
#[test]
fn test_respiratory_scenario() {
    let kb = respiratory();
    let evaluator = RuleEvaluator::new(&kb);

    let empty = FactStore::new();
    assert_eq!(evaluator.evaluate("Flu", &empty).percentage, 0.0);
    assert_eq!(evaluator.evaluate("Cold", &empty).percentage, 50.0);

    let facts: FactStore = [("f1", true), ("f2", true)].into_iter().collect();
    let flu = evaluator.evaluate("Flu", &facts);
    assert_eq!(flu.percentage, 100.0);
    assert!(flu.fully_satisfied);

    let cold = evaluator.evaluate("Cold", &facts);
    assert_eq!(cold.percentage, 50.0);
    assert!(!cold.fully_satisfied);

    let diagnoses = evaluator.diagnoses(&facts, 60.0);
    assert_eq!(diagnoses.len(), 1);
    assert_eq!(diagnoses[0].outcome, "Flu");
    assert_eq!(diagnoses[0].percentage, 100.0);
}

/// Diagnoses are non-increasing and never below the threshold.
#[test]
fn test_diagnoses_sorted_and_filtered() {
    let kb = wide()
        .with_rule("Narrow", Rule::new(["a"], Vec::<String>::new()))
        .with_rule("Negative", Rule::new(Vec::<String>::new(), ["a", "b"]));
    let evaluator = RuleEvaluator::new(&kb);

    for facts in all_fact_stores(&["a", "b", "c", "d"]) {
        for threshold in [0.0, 25.0, 50.0, 75.0, 100.0] {
            let diagnoses = evaluator.diagnoses(&facts, threshold);

            assert!(diagnoses.iter().all(|d| d.percentage >= threshold));
            assert!(diagnoses
                .windows(2)
                .all(|w| w[0].percentage >= w[1].percentage));
        }
    }
}

/// Repeated calls on the same facts give identical output.
#[test]
fn test_diagnoses_are_idempotent() {
    let kb = respiratory()
        .with_rule("Allergy", Rule::new(["f2"], Vec::<String>::new()));
    let evaluator = RuleEvaluator::new(&kb);
    let facts: FactStore = [("f2", true)].into_iter().collect();

    let first = evaluator.diagnoses(&facts, 0.0);
    for _ in 0..100 {
        assert_eq!(evaluator.diagnoses(&facts, 0.0), first);
    }

    // Allergy and Cold tie at 100; name order decides
    let order: Vec<&str> = first.iter().map(|d| d.outcome.as_str()).collect();
    assert_eq!(order, vec!["Allergy", "Cold", "Flu"]);
}
