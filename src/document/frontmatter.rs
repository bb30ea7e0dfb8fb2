//! Front matter parsing for steering Markdown files.
//!
//! ```text
//! ---
//! inclusion: fileMatch
//! fileMatchPattern: ["tests/**/*.py", "conftest.py"]
//! description: Test generation conventions
//! ---
//!
//! # Testing
//! ...
//! ```
//!
//! A file without a front matter block, or whose block omits `inclusion`, is
//! always included.

use serde::Deserialize;

use super::types::{DocumentDescriptor, InclusionMode, PatternSpec};
use crate::error::{Result, SteeringError};

const DELIMITER: &str = "---";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Frontmatter {
    #[serde(default)]
    inclusion: Option<InclusionMode>,
    #[serde(default)]
    file_match_pattern: Option<PatternSpec>,
    #[serde(default)]
    description: Option<String>,
}

enum Split<'a> {
    Absent,
    Unterminated,
    Block { yaml: &'a str, body: &'a str },
}

/// Parse a steering file into a descriptor record. Validation of the
/// metadata against the inclusion mode happens in the store.
pub fn parse_document(id: &str, content: &str) -> Result<DocumentDescriptor> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let (frontmatter, body) = match split(content) {
        Split::Absent => (Frontmatter::default(), content),
        Split::Unterminated => {
            return Err(SteeringError::InvalidFrontmatter {
                document: id.to_string(),
                message: "front matter block is not closed with ---".into(),
            });
        }
        Split::Block { yaml, body } => (parse_yaml(id, yaml)?, body),
    };

    Ok(DocumentDescriptor {
        id: id.to_string(),
        inclusion: frontmatter.inclusion.unwrap_or_default(),
        file_match_pattern: frontmatter.file_match_pattern,
        description: frontmatter.description,
        body: body.trim().to_string(),
        source_path: None,
    })
}

fn parse_yaml(id: &str, yaml: &str) -> Result<Frontmatter> {
    if yaml.trim().is_empty() {
        return Ok(Frontmatter::default());
    }
    serde_yaml_bw::from_str(yaml).map_err(|e| SteeringError::InvalidFrontmatter {
        document: id.to_string(),
        message: e.to_string(),
    })
}

fn split(content: &str) -> Split<'_> {
    let mut lines = content.split_inclusive('\n');
    let Some(first) = lines.next() else {
        return Split::Absent;
    };
    if first.trim_end() != DELIMITER {
        return Split::Absent;
    }

    let start = first.len();
    let mut offset = start;
    for line in lines {
        if line.trim_end() == DELIMITER {
            return Split::Block {
                yaml: &content[start..offset],
                body: &content[offset + line.len()..],
            };
        }
        offset += line.len();
    }

    Split::Unterminated
}
