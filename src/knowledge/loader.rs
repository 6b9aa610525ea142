//! Knowledge base loader
//!
//! - One JSON document per knowledge base
//! - Unreadable or malformed sources are FATAL
//! - Empty but well-formed sources load; the engine flags them
//! - Rules may reference undeclared predicates; these are logged, never rejected

use std::fs;
use std::path::{Path, PathBuf};

use super::errors::{KnowledgeError, KnowledgeResult};
use super::types::KnowledgeBase;
use crate::observability::{log_event_with_fields, warn_event, Event};

/// Reads knowledge base documents from disk
pub struct KnowledgeLoader {
    /// Path of the knowledge base document
    path: PathBuf,
}

impl KnowledgeLoader {
    /// Creates a loader for the document at `path`.
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Returns the document path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and parses the document.
    pub fn load(&self) -> KnowledgeResult<KnowledgeBase> {
        let origin = self.path.display().to_string();
        log_event_with_fields(Event::KnowledgeLoadBegin, &[("path", origin.as_str())]);

        let result = fs::read_to_string(&self.path)
            .map_err(|e| KnowledgeError::unreadable(origin.as_str(), e))
            .and_then(|content| Self::parse(&content, &origin));

        if let Err(ref e) = result {
            log_event_with_fields(
                Event::KnowledgeLoadFailed,
                &[("code", e.code().code()), ("path", origin.as_str())],
            );
        }

        result
    }

    /// Parses an in-memory document. `origin` labels the source in errors and logs.
    pub fn parse(source: &str, origin: &str) -> KnowledgeResult<KnowledgeBase> {
        let kb: KnowledgeBase = serde_json::from_str(source)
            .map_err(|e| KnowledgeError::malformed(origin, format!("Invalid JSON: {}", e)))?;

        Self::report(&kb, origin);
        Ok(kb)
    }

    /// Writes `kb` to the loader's path as pretty-printed JSON.
    pub fn save(&self, kb: &KnowledgeBase) -> KnowledgeResult<()> {
        let origin = self.path.display().to_string();

        let content = serde_json::to_string_pretty(kb)
            .map_err(|e| KnowledgeError::write_failed(origin.as_str(), e))?;

        fs::write(&self.path, content).map_err(|e| KnowledgeError::write_failed(origin.as_str(), e))
    }

    fn report(kb: &KnowledgeBase, origin: &str) {
        let predicates = kb.predicate_count().to_string();
        let rules = kb.rule_count().to_string();

        // Emptiness is flagged by the engine
        for (outcome, code) in kb.unknown_references() {
            warn_event(
                Event::KnowledgeUnknownReference,
                &[("code", code), ("origin", origin), ("outcome", outcome)],
            );
        }

        log_event_with_fields(
            Event::KnowledgeLoaded,
            &[("origin", origin), ("predicates", predicates.as_str()), ("rules", rules.as_str())],
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::errors::KnowledgeErrorCode;
    use crate::knowledge::types::Rule;
    use tempfile::TempDir;

    fn write_kb(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("kb.json");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_well_formed() {
        let dir = TempDir::new().unwrap();
        let path = write_kb(
            &dir,
            r#"{"predicates": {"f1": "fever", "f2": "cough"},
                "rules": {"Flu": {"required": ["f1", "f2"], "excluded": []}}}"#,
        );

        let kb = KnowledgeLoader::new(&path).load().unwrap();
        assert_eq!(kb.predicate_count(), 2);
        assert_eq!(kb.rule_count(), 1);
    }

    #[test]
    fn test_missing_file_is_unreadable() {
        let dir = TempDir::new().unwrap();
        let loader = KnowledgeLoader::new(&dir.path().join("absent.json"));

        let err = loader.load().unwrap_err();
        assert_eq!(err.code(), KnowledgeErrorCode::DiagKbUnreadable);
        assert!(err.is_fatal());
    }

    #[test]
    fn test_invalid_json_is_malformed() {
        let dir = TempDir::new().unwrap();
        let path = write_kb(&dir, "{\"predicates\": {");

        let err = KnowledgeLoader::new(&path).load().unwrap_err();
        assert_eq!(err.code(), KnowledgeErrorCode::DiagKbMalformed);
    }

    #[test]
    fn test_wrong_shape_is_malformed() {
        let err = KnowledgeLoader::parse(r#"{"rules": {"Flu": {"required": "f1"}}}"#, "inline")
            .unwrap_err();
        assert_eq!(err.code(), KnowledgeErrorCode::DiagKbMalformed);
        assert_eq!(err.origin(), "inline");
    }

    #[test]
    fn test_empty_document_is_accepted() {
        let kb = KnowledgeLoader::parse("{}", "inline").unwrap();
        assert!(kb.is_empty());
        assert_eq!(kb.predicate_count(), 0);
    }

    #[test]
    fn test_unknown_references_are_accepted() {
        let kb = KnowledgeLoader::parse(
            r#"{"predicates": {"f1": "fever"},
                "rules": {"Flu": {"required": ["f1", "ghost"]}}}"#,
            "inline",
        )
        .unwrap();

        assert_eq!(kb.unknown_references(), vec![("Flu", "ghost")]);
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let loader = KnowledgeLoader::new(&dir.path().join("saved.json"));

        let kb = KnowledgeBase::default()
            .with_predicate("f1", "fever")
            .with_rule("Flu", Rule::new(["f1"], Vec::<String>::new()));
        loader.save(&kb).unwrap();

        assert_eq!(loader.load().unwrap(), kb);
    }
}
