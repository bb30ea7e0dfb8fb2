//! Glob matching for `fileMatchPattern` values.
//!
//! Supported syntax:
//!
//! | Token | Matches                                              |
//! |-------|------------------------------------------------------|
//! | `*`   | any run of characters within one path segment       |
//! | `?`   | exactly one character within one path segment       |
//! | `**`  | zero or more whole path segments (must stand alone)  |
//!
//! Matching is case-sensitive and anchored to the whole path. A pattern that
//! contains no `/` is a basename pattern and is tested against the last path
//! segment only, so `*.md` matches `docs/readme.md` while `tests/**/*.py`
//! never matches `testsuite/test_auth.py`.
//!
//! Both levels (characters within a segment, segments within a path) use the
//! same linear backtracking wildcard matcher, so runtime matching never fails
//! and never recurses.

use std::fmt;

use serde::{Serialize, Serializer};
use thiserror::Error;

const SEPARATOR: char = '/';
const UNSUPPORTED: [char; 5] = ['[', ']', '{', '}', '\\'];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason} in pattern {pattern:?}")]
pub struct PatternError {
    pub pattern: String,
    pub reason: String,
}

impl PatternError {
    pub fn new(pattern: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Literal(char),
    AnyRun,
    AnyOne,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    AnyDepth,
    Parts(Vec<Token>),
}

/// A validated, compiled glob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobPattern {
    source: String,
    anchored: bool,
    segments: Vec<Segment>,
}

impl GlobPattern {
    pub fn parse(pattern: &str) -> Result<Self, PatternError> {
        if pattern.is_empty() {
            return Err(PatternError::new(pattern, "empty pattern"));
        }
        if pattern.starts_with('!') {
            return Err(PatternError::new(pattern, "negation is not supported"));
        }
        if let Some(c) = pattern.chars().find(|c| UNSUPPORTED.contains(c)) {
            return Err(PatternError::new(
                pattern,
                format!("unsupported character {:?}", c),
            ));
        }

        let mut segments = Vec::new();
        for raw in pattern.split(SEPARATOR) {
            if raw.is_empty() {
                return Err(PatternError::new(pattern, "empty path segment"));
            }
            if raw == "**" {
                // `**/**` is the same as `**`
                if segments.last() != Some(&Segment::AnyDepth) {
                    segments.push(Segment::AnyDepth);
                }
                continue;
            }
            if raw.contains("**") {
                return Err(PatternError::new(
                    pattern,
                    "`**` must be a whole path segment",
                ));
            }
            segments.push(Segment::Parts(tokenize(raw)));
        }

        let anchored = pattern.contains(SEPARATOR) || segments == [Segment::AnyDepth];

        Ok(Self {
            source: pattern.to_string(),
            anchored,
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn matches(&self, path: &str) -> bool {
        if path.is_empty() {
            return false;
        }

        if !self.anchored {
            let name = path.rsplit(SEPARATOR).next().unwrap_or(path);
            return match self.segments.as_slice() {
                [Segment::Parts(tokens)] => segment_matches(tokens, name),
                _ => false,
            };
        }

        let parts: Vec<&str> = path.split(SEPARATOR).collect();
        wildcard_match(
            &self.segments,
            &parts,
            |s| matches!(s, Segment::AnyDepth),
            |s, part| match s {
                Segment::Parts(tokens) => segment_matches(tokens, part),
                Segment::AnyDepth => false,
            },
        )
    }
}

impl fmt::Display for GlobPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl Serialize for GlobPattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.source)
    }
}

/// Test a single path against a pattern. Malformed and empty patterns never match.
pub fn matches(pattern: &str, path: &str) -> bool {
    GlobPattern::parse(pattern).is_ok_and(|p| p.matches(path))
}

fn tokenize(segment: &str) -> Vec<Token> {
    segment
        .chars()
        .map(|c| match c {
            '*' => Token::AnyRun,
            '?' => Token::AnyOne,
            other => Token::Literal(other),
        })
        .collect()
}

fn segment_matches(tokens: &[Token], segment: &str) -> bool {
    if segment.is_empty() {
        return false;
    }
    let chars: Vec<char> = segment.chars().collect();
    wildcard_match(
        tokens,
        &chars,
        |t| *t == Token::AnyRun,
        |t, c| match t {
            Token::Literal(l) => l == c,
            Token::AnyOne => true,
            Token::AnyRun => false,
        },
    )
}

/// Linear wildcard matching with single-point backtracking.
///
/// `is_star` items absorb zero or more elements of `text`; every other item
/// must consume exactly one element accepted by `item_matches`.
fn wildcard_match<P, T>(
    pattern: &[P],
    text: &[T],
    is_star: impl Fn(&P) -> bool,
    item_matches: impl Fn(&P, &T) -> bool,
) -> bool {
    let (mut p, mut t) = (0, 0);
    let mut resume: Option<(usize, usize)> = None;

    while t < text.len() {
        if p < pattern.len() && is_star(&pattern[p]) {
            resume = Some((p, t));
            p += 1;
        } else if p < pattern.len() && item_matches(&pattern[p], &text[t]) {
            p += 1;
            t += 1;
        } else if let Some((star_p, star_t)) = resume {
            p = star_p + 1;
            t = star_t + 1;
            resume = Some((star_p, star_t + 1));
        } else {
            return false;
        }
    }

    pattern[p..].iter().all(is_star)
}
