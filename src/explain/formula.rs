//! Propositional rendering of an outcome rule
//!
//! `(a ∧ b) ∧ (¬c ∧ ¬d) → Outcome`. An empty group is omitted; a rule
//! with no conditions renders as `Outcome (no conditions)`.

use std::fmt;

use crate::knowledge::Rule;

/// Symbol set used to render a formula
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Notation {
    /// ∧, ¬, →
    #[default]
    Unicode,
    /// &, !, ->
    Ascii,
}

impl Notation {
    fn and(&self) -> &'static str {
        match self {
            Notation::Unicode => " ∧ ",
            Notation::Ascii => " & ",
        }
    }

    fn not(&self) -> &'static str {
        match self {
            Notation::Unicode => "¬",
            Notation::Ascii => "!",
        }
    }

    fn implies(&self) -> &'static str {
        match self {
            Notation::Unicode => " → ",
            Notation::Ascii => " -> ",
        }
    }
}

/// Logical formula `required ∧ ¬excluded → outcome`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formula {
    outcome: String,
    required: Vec<String>,
    excluded: Vec<String>,
}

impl Formula {
    /// Formula for `outcome` under `rule`
    pub fn from_rule(outcome: impl Into<String>, rule: &Rule) -> Self {
        Self {
            outcome: outcome.into(),
            required: rule.required.clone(),
            excluded: rule.excluded.clone(),
        }
    }

    /// Formula for an outcome without a rule
    pub fn unconditional(outcome: impl Into<String>) -> Self {
        Self {
            outcome: outcome.into(),
            required: Vec::new(),
            excluded: Vec::new(),
        }
    }

    /// Renders the formula with the given symbols
    pub fn render(&self, notation: Notation) -> String {
        let and = notation.and();

        let required = self.required.join(and);
        let excluded = self
            .excluded
            .iter()
            .map(|code| format!("{}{}", notation.not(), code))
            .collect::<Vec<_>>()
            .join(and);

        let antecedent = match (required.is_empty(), excluded.is_empty()) {
            (false, false) => format!("({}){}({})", required, and, excluded),
            (false, true) => format!("({})", required),
            (true, false) => format!("({})", excluded),
            (true, true) => return format!("{} (no conditions)", self.outcome),
        };

        format!("{}{}{}", antecedent, notation.implies(), self.outcome)
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render(Notation::Unicode))
    }
}
