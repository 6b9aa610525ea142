//! Shared, immutable engine state
//!
//! The knowledge base and its importance index are built once and never
//! mutated. Sessions hold an `Arc<Engine>` and own their facts, so any
//! number of sessions can run side by side without cross-talk.

use std::path::Path;
use std::sync::Arc;

use super::session::Session;
use super::warnings::Warning;
use crate::explain::ExplanationBuilder;
use crate::inference::{QuestionSelector, RuleEvaluator};
use crate::knowledge::{ImportanceIndex, KnowledgeBase, KnowledgeLoader, KnowledgeResult};

/// Knowledge base plus everything derived from it at load time
#[derive(Debug)]
pub struct Engine {
    knowledge: KnowledgeBase,
    importance: ImportanceIndex,
    load_warnings: Vec<Warning>,
}

impl Engine {
    /// Builds an engine over an already-parsed knowledge base.
    ///
    /// An empty knowledge base is accepted and flagged with
    /// [`Warning::EmptyKnowledgeBase`].
    pub fn new(knowledge: KnowledgeBase) -> Self {
        let importance = ImportanceIndex::compute(&knowledge);

        let mut load_warnings = Vec::new();
        if knowledge.is_empty() {
            let warning = Warning::EmptyKnowledgeBase {
                predicates: knowledge.predicate_count(),
                rules: knowledge.rule_count(),
            };
            warning.emit();
            load_warnings.push(warning);
        }

        Self {
            knowledge,
            importance,
            load_warnings,
        }
    }

    /// Loads a knowledge base document and builds an engine over it.
    ///
    /// Unreadable or malformed documents are fatal.
    pub fn load(path: &Path) -> KnowledgeResult<Self> {
        let knowledge = KnowledgeLoader::new(path).load()?;
        Ok(Self::new(knowledge))
    }

    /// Starts a new interview session with an empty fact store
    pub fn session(self: &Arc<Self>) -> Session {
        Session::new(Arc::clone(self))
    }

    /// The knowledge base
    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    /// The importance index
    pub fn importance(&self) -> &ImportanceIndex {
        &self.importance
    }

    /// Warnings raised while building the engine
    pub fn load_warnings(&self) -> &[Warning] {
        &self.load_warnings
    }

    /// Rule evaluator over this knowledge base
    pub fn evaluator(&self) -> RuleEvaluator<'_> {
        RuleEvaluator::new(&self.knowledge)
    }

    /// Question selector over this knowledge base
    pub fn selector(&self) -> QuestionSelector<'_> {
        QuestionSelector::new(&self.knowledge, &self.importance)
    }

    /// Explanation builder over this knowledge base
    pub fn explainer(&self) -> ExplanationBuilder<'_> {
        ExplanationBuilder::new(&self.knowledge)
    }
}
