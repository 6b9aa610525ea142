//! Knowledge base type definitions
//!
//! A knowledge base is a set of predicates (stable code plus a human
//! readable description) and one rule per outcome. Both are keyed by
//! ordered maps so that every iteration, and therefore every tie-break
//! downstream, is deterministic.
//!
//! Document layout:
//!
//! ```text
//! {
//!   "predicates": { "<code>": "<description>", ... },
//!   "rules": {
//!     "<outcome>": { "required": ["<code>", ...], "excluded": ["<code>", ...] }
//!   }
//! }
//! ```
//!
//! The Spanish key names used by older knowledge base files
//! (`predicados`, `reglas`, `requeridos`, `excluidos`) are accepted as aliases.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A named boolean fact about the case being diagnosed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Predicate {
    /// Stable identity of the predicate
    pub code: String,
    /// Human readable description, usually phrased as a question
    pub description: String,
}

impl Predicate {
    /// Create a predicate
    pub fn new(code: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            description: description.into(),
        }
    }
}

/// Role a predicate plays in one outcome's rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleRole {
    /// Predicate must hold
    Required,
    /// Predicate must be absent
    Excluded,
    /// Predicate does not appear in the rule
    Irrelevant,
}

/// Logical condition for one outcome: a conjunction of required
/// predicates and negated excluded predicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// Codes that must be true
    #[serde(default, alias = "requeridos")]
    pub required: Vec<String>,
    /// Codes that must be false
    #[serde(default, alias = "excluidos")]
    pub excluded: Vec<String>,
}

impl Rule {
    /// Create a rule from required and excluded codes
    pub fn new<R, E>(required: R, excluded: E) -> Self
    where
        R: IntoIterator,
        R::Item: Into<String>,
        E: IntoIterator,
        E::Item: Into<String>,
    {
        Self {
            required: required.into_iter().map(Into::into).collect(),
            excluded: excluded.into_iter().map(Into::into).collect(),
        }
    }

    /// Total number of conditions (required plus excluded)
    pub fn condition_count(&self) -> usize {
        self.required.len() + self.excluded.len()
    }

    /// Returns true if the rule has no conditions at all
    pub fn is_unconditional(&self) -> bool {
        self.condition_count() == 0
    }

    /// Role of `code` in this rule. A code listed in both sets counts as required.
    pub fn role_of(&self, code: &str) -> RuleRole {
        if self.required.iter().any(|c| c == code) {
            RuleRole::Required
        } else if self.excluded.iter().any(|c| c == code) {
            RuleRole::Excluded
        } else {
            RuleRole::Irrelevant
        }
    }

    /// Every code the rule mentions, required first, in rule order
    pub fn references(&self) -> impl Iterator<Item = &str> {
        self.required
            .iter()
            .chain(self.excluded.iter())
            .map(String::as_str)
    }
}

/// Immutable, load-time view of predicate definitions and outcome rules
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeBase {
    /// Predicate code to description
    #[serde(default, alias = "predicados")]
    predicates: BTreeMap<String, String>,
    /// Outcome name to rule
    #[serde(default, alias = "reglas")]
    rules: BTreeMap<String, Rule>,
}

impl KnowledgeBase {
    /// Create a knowledge base from already-parsed maps
    pub fn new(predicates: BTreeMap<String, String>, rules: BTreeMap<String, Rule>) -> Self {
        Self { predicates, rules }
    }

    /// Add a predicate (builder style, for programmatic construction)
    pub fn with_predicate(mut self, code: impl Into<String>, description: impl Into<String>) -> Self {
        self.predicates.insert(code.into(), description.into());
        self
    }

    /// Add an outcome rule (builder style, for programmatic construction)
    pub fn with_rule(mut self, outcome: impl Into<String>, rule: Rule) -> Self {
        self.rules.insert(outcome.into(), rule);
        self
    }

    /// Predicate code to description
    pub fn predicates(&self) -> &BTreeMap<String, String> {
        &self.predicates
    }

    /// Outcome name to rule
    pub fn rules(&self) -> &BTreeMap<String, Rule> {
        &self.rules
    }

    /// Looks up a predicate by code
    pub fn predicate(&self, code: &str) -> Option<Predicate> {
        self.predicates
            .get(code)
            .map(|description| Predicate::new(code, description.as_str()))
    }

    /// All predicates, ordered by code
    pub fn predicate_list(&self) -> Vec<Predicate> {
        self.predicates
            .iter()
            .map(|(code, description)| Predicate::new(code.as_str(), description.as_str()))
            .collect()
    }

    /// Description of a predicate, if declared
    pub fn description(&self, code: &str) -> Option<&str> {
        self.predicates.get(code).map(String::as_str)
    }

    /// Returns true if `code` is a declared predicate
    pub fn has_predicate(&self, code: &str) -> bool {
        self.predicates.contains_key(code)
    }

    /// Rule for an outcome, if defined
    pub fn rule(&self, outcome: &str) -> Option<&Rule> {
        self.rules.get(outcome)
    }

    /// Returns true if `outcome` has a rule
    pub fn has_outcome(&self, outcome: &str) -> bool {
        self.rules.contains_key(outcome)
    }

    /// Outcome names, ascending
    pub fn outcomes(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    /// Number of declared predicates
    pub fn predicate_count(&self) -> usize {
        self.predicates.len()
    }

    /// Number of outcome rules
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// True when there are no predicates or no rules.
    ///
    /// Such a knowledge base is accepted, but the engine can never produce
    /// a diagnosis or a question from it.
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty() || self.rules.is_empty()
    }

    /// `(outcome, code)` pairs where a rule mentions an undeclared predicate
    pub fn unknown_references(&self) -> Vec<(&str, &str)> {
        self.rules
            .iter()
            .flat_map(|(outcome, rule)| {
                rule.references()
                    .filter(|code| !self.predicates.contains_key(*code))
                    .map(move |code| (outcome.as_str(), code))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn respiratory() -> KnowledgeBase {
        KnowledgeBase::default()
            .with_predicate("f1", "fever")
            .with_predicate("f2", "cough")
            .with_rule("Flu", Rule::new(["f1", "f2"], Vec::<String>::new()))
            .with_rule("Cold", Rule::new(["f2"], ["f1"]))
    }

    #[test]
    fn test_rule_roles() {
        let rule = Rule::new(["f2"], ["f1"]);
        assert_eq!(rule.role_of("f2"), RuleRole::Required);
        assert_eq!(rule.role_of("f1"), RuleRole::Excluded);
        assert_eq!(rule.role_of("f3"), RuleRole::Irrelevant);
    }

    #[test]
    fn test_code_in_both_sets_is_required() {
        let rule = Rule::new(["x"], ["x"]);
        assert_eq!(rule.role_of("x"), RuleRole::Required);
    }

    #[test]
    fn test_references_order() {
        let rule = Rule::new(["a", "b"], ["c"]);
        let refs: Vec<&str> = rule.references().collect();
        assert_eq!(refs, vec!["a", "b", "c"]);
        assert_eq!(rule.condition_count(), 3);
        assert!(!rule.is_unconditional());
        assert!(Rule::default().is_unconditional());
    }

    #[test]
    fn test_outcomes_are_ordered() {
        let kb = respiratory();
        let outcomes: Vec<&str> = kb.outcomes().collect();
        assert_eq!(outcomes, vec!["Cold", "Flu"]);
    }

    #[test]
    fn test_predicate_lookup() {
        let kb = respiratory();
        assert_eq!(kb.predicate("f1"), Some(Predicate::new("f1", "fever")));
        assert_eq!(kb.description("f2"), Some("cough"));
        assert!(kb.predicate("f9").is_none());
        assert_eq!(kb.predicate_list().len(), 2);
    }

    #[test]
    fn test_empty_detection() {
        assert!(KnowledgeBase::default().is_empty());
        assert!(KnowledgeBase::default().with_predicate("a", "A").is_empty());
        assert!(!respiratory().is_empty());
    }

    #[test]
    fn test_unknown_references() {
        let kb = respiratory().with_rule("Asthma", Rule::new(["w1"], ["f1"]));
        assert_eq!(kb.unknown_references(), vec![("Asthma", "w1")]);
    }

    #[test]
    fn test_deserialize_english_keys() {
        let kb: KnowledgeBase = serde_json::from_value(json!({
            "predicates": {"f1": "fever"},
            "rules": {"Flu": {"required": ["f1"]}}
        }))
        .unwrap();

        assert_eq!(kb.rule("Flu").unwrap().required, vec!["f1"]);
        assert!(kb.rule("Flu").unwrap().excluded.is_empty());
    }

    #[test]
    fn test_deserialize_spanish_keys() {
        let kb: KnowledgeBase = serde_json::from_value(json!({
            "predicados": {"f1": "fiebre", "f2": "tos"},
            "reglas": {"Gripe": {"requeridos": ["f1"], "excluidos": ["f2"]}}
        }))
        .unwrap();

        let rule = kb.rule("Gripe").unwrap();
        assert_eq!(rule.required, vec!["f1"]);
        assert_eq!(rule.excluded, vec!["f2"]);
        assert_eq!(kb.description("f1"), Some("fiebre"));
    }
}
