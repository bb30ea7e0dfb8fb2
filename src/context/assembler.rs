use serde::Serialize;

use crate::resolver::ResolutionResult;

pub const DEFAULT_MAX_BYTES: usize = 50_000;

const SEPARATOR: &str = "\n";

/// Marker line written before each document body.
pub fn boundary_marker(id: &str) -> String {
    format!("<!-- steering: {} -->\n", id)
}

/// Joined context plus a report of what did not fit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AssembledContext {
    pub text: String,
    pub included: Vec<String>,
    pub truncated: Vec<String>,
}

impl AssembledContext {
    pub fn bytes(&self) -> usize {
        self.text.len()
    }

    pub fn is_truncated(&self) -> bool {
        !self.truncated.is_empty()
    }
}

/// Joins resolved document bodies in resolution order under a byte budget.
///
/// Documents are never split. Assembly stops at the first document that does
/// not fit whole; it and every later document are reported as truncated, so
/// the output is always a prefix of the resolution order.
#[derive(Debug, Clone, Copy)]
pub struct ContextAssembler {
    max_bytes: usize,
    max_documents: Option<usize>,
}

impl ContextAssembler {
    pub fn new(max_bytes: usize) -> Self {
        Self {
            max_bytes,
            max_documents: None,
        }
    }

    pub fn with_max_documents(mut self, max_documents: Option<usize>) -> Self {
        self.max_documents = max_documents;
        self
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    pub fn assemble(&self, result: &ResolutionResult<'_>) -> AssembledContext {
        let mut context = AssembledContext::default();
        let mut full = false;

        for resolved in result.documents() {
            let id = resolved.id();
            if full {
                context.truncated.push(id.to_string());
                continue;
            }

            let marker = boundary_marker(id);
            let separator = if context.text.is_empty() { "" } else { SEPARATOR };
            let fragment_len = separator.len() + marker.len() + resolved.document.byte_size() + 1;

            let over_count = self
                .max_documents
                .is_some_and(|max| context.included.len() >= max);
            if over_count || context.text.len() + fragment_len > self.max_bytes {
                full = true;
                context.truncated.push(id.to_string());
                continue;
            }

            context.text.push_str(separator);
            context.text.push_str(&marker);
            context.text.push_str(resolved.document.body());
            context.text.push('\n');
            context.included.push(id.to_string());
        }

        context
    }
}

impl Default for ContextAssembler {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_BYTES)
    }
}
