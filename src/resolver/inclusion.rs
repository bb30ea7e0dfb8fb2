//! Decides which steering documents apply to a target set.

use std::collections::{BTreeSet, HashSet};

use serde::Serialize;
use tracing::{debug, warn};

use super::target::TargetSet;
use crate::document::{DocumentStore, InclusionMode, SteeringDocument};
use crate::error::Result;

/// Why a document was included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InclusionReason {
    Always,
    Requested,
    Matched { pattern: String, path: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct ResolvedDocument<'a> {
    pub document: &'a SteeringDocument,
    pub reason: InclusionReason,
}

impl ResolvedDocument<'_> {
    pub fn id(&self) -> &str {
        self.document.id()
    }

    fn sort_key(&self) -> (u8, usize) {
        (self.document.inclusion().rank(), self.document.ordinal())
    }
}

/// Ordered, deduplicated documents judged applicable. Borrows from the store.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResolutionResult<'a> {
    documents: Vec<ResolvedDocument<'a>>,
}

impl<'a> ResolutionResult<'a> {
    /// Add a document only if no document with the same identity exists.
    /// Returns true if it was added.
    fn add_unique(&mut self, seen: &mut HashSet<&'a str>, entry: ResolvedDocument<'a>) -> bool {
        if seen.insert(entry.document.id()) {
            self.documents.push(entry);
            true
        } else {
            false
        }
    }

    /// Always, then Manual, then FileMatch; load ordinal within a group.
    fn sort(&mut self) {
        self.documents.sort_by_key(ResolvedDocument::sort_key);
    }

    pub fn documents(&self) -> &[ResolvedDocument<'a>] {
        &self.documents
    }

    pub fn ids(&self) -> Vec<&'a str> {
        self.documents.iter().map(|r| r.document.id()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }
}

/// Resolves which steering documents apply to a given set of files.
pub struct InclusionResolver<'a> {
    store: &'a DocumentStore,
}

impl<'a> InclusionResolver<'a> {
    pub fn new(store: &'a DocumentStore) -> Self {
        Self { store }
    }

    /// Resolve all applicable documents.
    ///
    /// # Arguments
    /// * `targets` - Files being worked on
    /// * `requested` - Identities of manual documents to include
    pub fn resolve(&self, targets: &TargetSet, requested: &BTreeSet<String>) -> ResolutionResult<'a> {
        let mut resolved = ResolutionResult::default();
        let mut seen = HashSet::new();

        // 1. Always documents, regardless of targets
        for document in self.store.by_inclusion(InclusionMode::Always) {
            resolved.add_unique(
                &mut seen,
                ResolvedDocument {
                    document,
                    reason: InclusionReason::Always,
                },
            );
        }

        // 2. Manual documents, only on request
        self.warn_unusable_requests(requested);
        for document in self
            .store
            .by_inclusion(InclusionMode::Manual)
            .filter(|d| requested.contains(d.id()))
        {
            resolved.add_unique(
                &mut seen,
                ResolvedDocument {
                    document,
                    reason: InclusionReason::Requested,
                },
            );
        }

        // 3. FileMatch documents, any pattern against any target
        for document in self.store.by_inclusion(InclusionMode::FileMatch) {
            if let Some((pattern, path)) = document.first_match(targets.iter()) {
                let reason = InclusionReason::Matched {
                    pattern: pattern.to_string(),
                    path: path.to_string(),
                };
                resolved.add_unique(&mut seen, ResolvedDocument { document, reason });
            }
        }

        resolved.sort();
        debug!(
            targets = targets.len(),
            requested = requested.len(),
            resolved = resolved.len(),
            "Resolved steering documents"
        );
        resolved
    }

    /// Resolve for a single file with no manual requests.
    pub fn resolve_for_file(&self, path: &str) -> Result<ResolutionResult<'a>> {
        let targets = TargetSet::new([path])?;
        Ok(self.resolve(&targets, &BTreeSet::new()))
    }

    fn warn_unusable_requests(&self, requested: &BTreeSet<String>) {
        for id in requested {
            match self.store.get(id) {
                None => warn!(id = %id, "Requested steering document not found"),
                Some(doc) if doc.inclusion() != InclusionMode::Manual => warn!(
                    id = %id,
                    inclusion = %doc.inclusion(),
                    "Ignoring request for a non-manual steering document"
                ),
                Some(_) => {}
            }
        }
    }
}
