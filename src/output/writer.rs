use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;

use crate::cli::{Display, OutputFormat};
use crate::config::SteeringConfig;
use crate::context::AssembledContext;
use crate::document::{DocumentStore, SteeringDocument};
use crate::error::Result;
use crate::resolver::{InclusionReason, ResolutionResult};

/// Output writer that handles different output formats.
///
/// Supports two output modes:
/// - Text: the assembled context verbatim, or styled tables for listings
/// - Json: a single JSON object on stdout
pub struct OutputWriter {
    format: OutputFormat,
    display: Display,
}

impl OutputWriter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            display: Display::new(),
        }
    }

    /// Emit an assembled context. Text mode prints only the context body so
    /// it can be piped straight into a prompt.
    pub fn emit_context(&self, result: &ResolutionResult<'_>, context: &AssembledContext) {
        match self.format {
            OutputFormat::Text => {
                let mut stdout = io::stdout().lock();
                let _ = stdout.write_all(context.text.as_bytes());
                let _ = stdout.flush();
            }
            OutputFormat::Json => {
                self.write_json(&ResolveOutput::new(result, Some(context)));
            }
        }
    }

    /// Emit the resolved documents without their bodies.
    pub fn emit_resolution(&self, result: &ResolutionResult<'_>) {
        match self.format {
            OutputFormat::Text => self.display.print_resolution(result),
            OutputFormat::Json => self.write_json(&ResolveOutput::new(result, None)),
        }
    }

    /// Emit every document in the store.
    pub fn emit_documents(&self, store: &DocumentStore) {
        match self.format {
            OutputFormat::Text => {
                self.display.print_header("Steering documents");
                self.display.print_documents_table(store.all());
            }
            OutputFormat::Json => self.write_json(&store.all()),
        }
    }

    /// Emit the outcome of a successful validation.
    pub fn emit_check(&self, store: &DocumentStore, dir: &Path) {
        match self.format {
            OutputFormat::Text => self.display.print_success(&format!(
                "{} steering documents valid in {}",
                store.len(),
                dir.display()
            )),
            OutputFormat::Json => self.write_json(&CheckOutput {
                valid: true,
                documents: store.len(),
                dir: dir.display().to_string(),
            }),
        }
    }

    /// Emit the effective configuration.
    pub fn emit_config(&self, config: &SteeringConfig) -> Result<()> {
        match self.format {
            OutputFormat::Text => print!("{}", config.to_toml()?),
            OutputFormat::Json => self.write_json(config),
        }
        Ok(())
    }

    /// Emit a simple message.
    pub fn emit_message(&self, message: &str) {
        match self.format {
            OutputFormat::Text => self.display.print_info(message),
            OutputFormat::Json => self.write_json(&MessageOutput {
                message: message.to_string(),
            }),
        }
    }

    fn write_json<T: Serialize + ?Sized>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string(value) {
            let mut stdout = io::stdout().lock();
            let _ = writeln!(stdout, "{}", json);
            let _ = stdout.flush();
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ResolveOutput<'a> {
    pub documents: Vec<ResolvedOutput<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<&'a AssembledContext>,
}

impl<'a> ResolveOutput<'a> {
    pub fn new(result: &ResolutionResult<'a>, context: Option<&'a AssembledContext>) -> Self {
        Self {
            documents: result
                .documents()
                .iter()
                .map(|r| ResolvedOutput::new(r.document, &r.reason))
                .collect(),
            context,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ResolvedOutput<'a> {
    id: &'a str,
    inclusion: String,
    byte_size: usize,
    reason: InclusionReason,
}

impl<'a> ResolvedOutput<'a> {
    fn new(document: &'a SteeringDocument, reason: &InclusionReason) -> Self {
        Self {
            id: document.id(),
            inclusion: document.inclusion().to_string(),
            byte_size: document.byte_size(),
            reason: reason.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
struct CheckOutput {
    valid: bool,
    documents: usize,
    dir: String,
}

#[derive(Debug, Clone, Serialize)]
struct MessageOutput {
    message: String,
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::context::ContextAssembler;
    use crate::document::DocumentDescriptor;
    use crate::resolver::{InclusionResolver, TargetSet};

    #[test]
    fn test_resolve_output_shape() {
        let store = DocumentStore::load(vec![
            DocumentDescriptor::always("product", "What we build."),
            DocumentDescriptor::file_match("docs", ["*.md"], "Write clearly."),
        ])
        .unwrap();
        let targets = TargetSet::new(["docs/readme.md"]).unwrap();
        let result = InclusionResolver::new(&store).resolve(&targets, &BTreeSet::new());
        let context = ContextAssembler::default().assemble(&result);

        let json = serde_json::to_value(ResolveOutput::new(&result, Some(&context))).unwrap();
        assert_eq!(json["documents"][0]["id"], "product");
        assert_eq!(json["documents"][0]["reason"]["kind"], "always");
        assert_eq!(json["documents"][1]["inclusion"], "fileMatch");
        assert_eq!(json["documents"][1]["reason"]["path"], "docs/readme.md");
        assert_eq!(json["context"]["included"][1], "docs");
        assert!(json["context"]["truncated"].as_array().unwrap().is_empty());

        let json = serde_json::to_value(ResolveOutput::new(&result, None)).unwrap();
        assert!(json.get("context").is_none());
    }

    #[test]
    fn test_document_listing_serializes_without_body() {
        let store = DocumentStore::load(vec![DocumentDescriptor::file_match(
            "python",
            ["*.py"],
            "secret body",
        )])
        .unwrap();

        let json = serde_json::to_string(store.all()).unwrap();
        assert!(json.contains("\"patterns\":[\"*.py\"]"));
        assert!(json.contains("\"inclusion\":\"fileMatch\""));
        assert!(!json.contains("secret body"));
    }
}
