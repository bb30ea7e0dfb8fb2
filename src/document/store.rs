//! Validated, immutable collection of steering documents.

use std::collections::HashMap;

use tracing::debug;

use super::types::{DocumentDescriptor, InclusionMode, SteeringDocument};
use crate::error::{Result, SteeringError};
use crate::pattern::GlobPattern;

/// Read-only store of steering documents, ordered by load ordinal.
///
/// Built once per run and passed by reference to the resolver. A reload
/// produces a new store; existing stores are never mutated, so they can be
/// shared across threads while resolutions are in flight.
#[derive(Debug, Clone, Default)]
pub struct DocumentStore {
    documents: Vec<SteeringDocument>,
    index: HashMap<String, usize>,
}

impl DocumentStore {
    /// Validate a batch of descriptors. Any invalid record rejects the whole batch.
    pub fn load<I>(descriptors: I) -> Result<Self>
    where
        I: IntoIterator<Item = DocumentDescriptor>,
    {
        let mut documents = Vec::new();
        let mut index = HashMap::new();

        for (ordinal, descriptor) in descriptors.into_iter().enumerate() {
            if descriptor.id.trim().is_empty() {
                return Err(SteeringError::EmptyIdentity);
            }
            if index.contains_key(&descriptor.id) {
                return Err(SteeringError::DuplicateDocument(descriptor.id));
            }

            let patterns = compile_patterns(&descriptor)?;
            index.insert(descriptor.id.clone(), ordinal);
            documents.push(SteeringDocument::new(descriptor, patterns, ordinal));
        }

        debug!(count = documents.len(), "Loaded steering documents");
        Ok(Self { documents, index })
    }

    /// Build a replacement store from a fresh batch. `self` is left untouched.
    pub fn reload<I>(&self, descriptors: I) -> Result<Self>
    where
        I: IntoIterator<Item = DocumentDescriptor>,
    {
        let store = Self::load(descriptors)?;
        debug!(
            previous = self.len(),
            current = store.len(),
            "Reloaded steering documents"
        );
        Ok(store)
    }

    /// All documents in load order.
    pub fn all(&self) -> &[SteeringDocument] {
        &self.documents
    }

    pub fn get(&self, id: &str) -> Option<&SteeringDocument> {
        self.index.get(id).map(|&i| &self.documents[i])
    }

    pub fn by_inclusion(&self, mode: InclusionMode) -> impl Iterator<Item = &SteeringDocument> {
        self.documents
            .iter()
            .filter(move |d| d.inclusion() == mode)
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }
}

fn compile_patterns(descriptor: &DocumentDescriptor) -> Result<Vec<GlobPattern>> {
    let raw = descriptor
        .file_match_pattern
        .clone()
        .map(|spec| spec.into_vec())
        .unwrap_or_default();

    match descriptor.inclusion {
        InclusionMode::FileMatch => {
            if raw.iter().all(|p| p.trim().is_empty()) {
                return Err(SteeringError::MissingPatterns(descriptor.id.clone()));
            }
            raw.iter()
                .map(|p| {
                    GlobPattern::parse(p)
                        .map_err(|e| SteeringError::malformed_pattern(&descriptor.id, e))
                })
                .collect()
        }
        InclusionMode::Always | InclusionMode::Manual => {
            if raw.is_empty() {
                Ok(Vec::new())
            } else {
                Err(SteeringError::UnexpectedPatterns {
                    document: descriptor.id.clone(),
                    mode: descriptor.inclusion.to_string(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<DocumentDescriptor> {
        vec![
            DocumentDescriptor::always("product", "What we build."),
            DocumentDescriptor::file_match("python", ["*.py"], "Type hints everywhere."),
            DocumentDescriptor::manual("release", "Release checklist.")
                .with_description("Cutting a release"),
        ]
    }

    #[test]
    fn test_load_assigns_ordinals() {
        let store = DocumentStore::load(sample()).unwrap();
        assert_eq!(store.len(), 3);

        let ordinals: Vec<_> = store.all().iter().map(|d| (d.id(), d.ordinal())).collect();
        assert_eq!(
            ordinals,
            vec![("product", 0), ("python", 1), ("release", 2)]
        );
        assert_eq!(store.get("python").unwrap().patterns().len(), 1);
        assert!(store.get("missing").is_none());
        assert_eq!(
            store.get("release").unwrap().description(),
            Some("Cutting a release")
        );
    }

    #[test]
    fn test_empty_batch() {
        let store = DocumentStore::load(Vec::<DocumentDescriptor>::new()).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_duplicate_identity_rejects_batch() {
        let mut batch = sample();
        batch.push(DocumentDescriptor::always("python", "again"));
        let err = DocumentStore::load(batch).unwrap_err();
        assert!(matches!(err, SteeringError::DuplicateDocument(ref id) if id == "python"));
    }

    #[test]
    fn test_file_match_without_patterns() {
        let err = DocumentStore::load(vec![DocumentDescriptor::new(
            "python",
            InclusionMode::FileMatch,
            "",
        )])
        .unwrap_err();
        assert!(matches!(err, SteeringError::MissingPatterns(_)));

        let err = DocumentStore::load(vec![DocumentDescriptor::file_match(
            "python",
            ["", "  "],
            "",
        )])
        .unwrap_err();
        assert!(matches!(err, SteeringError::MissingPatterns(_)));
    }

    #[test]
    fn test_always_with_patterns_is_rejected() {
        let err = DocumentStore::load(vec![
            DocumentDescriptor::always("product", "").with_patterns(["*.md"]),
        ])
        .unwrap_err();
        assert!(
            matches!(err, SteeringError::UnexpectedPatterns { ref mode, .. } if mode == "always")
        );

        let err = DocumentStore::load(vec![
            DocumentDescriptor::manual("release", "").with_patterns(["*.md"]),
        ])
        .unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_malformed_pattern_names_document() {
        let err = DocumentStore::load(vec![DocumentDescriptor::file_match(
            "python",
            ["*.py", "src/**py"],
            "",
        )])
        .unwrap_err();
        match err {
            SteeringError::MalformedPattern {
                document, pattern, ..
            } => {
                assert_eq!(document, "python");
                assert_eq!(pattern, "src/**py");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_identity_rejected() {
        let err = DocumentStore::load(vec![DocumentDescriptor::always(" ", "")]).unwrap_err();
        assert!(matches!(err, SteeringError::EmptyIdentity));
    }

    #[test]
    fn test_reload_leaves_original_untouched() {
        let store = DocumentStore::load(sample()).unwrap();
        let next = store
            .reload(vec![DocumentDescriptor::always("only", "")])
            .unwrap();

        assert_eq!(store.len(), 3);
        assert_eq!(next.len(), 1);
        assert!(next.get("product").is_none());

        let invalid = vec![DocumentDescriptor::new("x", InclusionMode::FileMatch, "")];
        assert!(store.reload(invalid).is_err());
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_by_inclusion() {
        let store = DocumentStore::load(sample()).unwrap();
        let manual: Vec<_> = store.by_inclusion(InclusionMode::Manual).map(|d| d.id()).collect();
        assert_eq!(manual, vec!["release"]);
    }

    #[test]
    fn test_store_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DocumentStore>();
    }
}
