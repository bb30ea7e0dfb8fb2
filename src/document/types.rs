//! Steering document types.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::pattern::GlobPattern;

/// When a steering document applies.
///
/// Modes are mutually exclusive per document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InclusionMode {
    /// Included in every resolution
    #[default]
    Always,
    /// Included only when explicitly requested by id
    Manual,
    /// Included when any pattern matches any target path
    FileMatch,
}

impl InclusionMode {
    /// Group rank used for result ordering (lower sorts first).
    pub fn rank(&self) -> u8 {
        match self {
            Self::Always => 0,
            Self::Manual => 1,
            Self::FileMatch => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Always => "always",
            Self::Manual => "manual",
            Self::FileMatch => "fileMatch",
        }
    }
}

impl fmt::Display for InclusionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `fileMatchPattern` accepts a single glob or an ordered list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PatternSpec {
    One(String),
    Many(Vec<String>),
}

impl PatternSpec {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            Self::One(p) => vec![p],
            Self::Many(ps) => ps,
        }
    }
}

/// Raw, unvalidated descriptor record as produced by a loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentDescriptor {
    pub id: String,
    pub inclusion: InclusionMode,
    pub file_match_pattern: Option<PatternSpec>,
    pub description: Option<String>,
    pub body: String,
    pub source_path: Option<PathBuf>,
}

impl DocumentDescriptor {
    pub fn new(id: impl Into<String>, inclusion: InclusionMode, body: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            inclusion,
            file_match_pattern: None,
            description: None,
            body: body.into(),
            source_path: None,
        }
    }

    pub fn always(id: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(id, InclusionMode::Always, body)
    }

    pub fn manual(id: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(id, InclusionMode::Manual, body)
    }

    pub fn file_match<I, S>(id: impl Into<String>, patterns: I, body: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(id, InclusionMode::FileMatch, body).with_patterns(patterns)
    }

    pub fn with_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.file_match_pattern = Some(PatternSpec::Many(
            patterns.into_iter().map(Into::into).collect(),
        ));
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_source_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.source_path = Some(path.into());
        self
    }
}

/// A validated steering document owned by a [`DocumentStore`](super::DocumentStore).
#[derive(Debug, Clone, Serialize)]
pub struct SteeringDocument {
    id: String,
    inclusion: InclusionMode,
    patterns: Vec<GlobPattern>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip)]
    body: String,
    byte_size: usize,
    ordinal: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    source_path: Option<PathBuf>,
}

impl SteeringDocument {
    /// Only the store constructs documents, after validation.
    pub(super) fn new(
        descriptor: DocumentDescriptor,
        patterns: Vec<GlobPattern>,
        ordinal: usize,
    ) -> Self {
        Self {
            byte_size: descriptor.body.len(),
            id: descriptor.id,
            inclusion: descriptor.inclusion,
            patterns,
            description: descriptor.description,
            body: descriptor.body,
            ordinal,
            source_path: descriptor.source_path,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn inclusion(&self) -> InclusionMode {
        self.inclusion
    }

    pub fn patterns(&self) -> &[GlobPattern] {
        &self.patterns
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn byte_size(&self) -> usize {
        self.byte_size
    }

    /// Position in the batch the store was loaded from.
    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    pub fn source_path(&self) -> Option<&std::path::Path> {
        self.source_path.as_deref()
    }

    /// First `(pattern, path)` pair that matches, in pattern order then path order.
    pub fn first_match<'p, I>(&self, paths: I) -> Option<(&GlobPattern, &'p str)>
    where
        I: IntoIterator<Item = &'p str> + Clone,
    {
        self.patterns.iter().find_map(|pattern| {
            paths
                .clone()
                .into_iter()
                .find(|path| pattern.matches(path))
                .map(|path| (pattern, path))
        })
    }
}
