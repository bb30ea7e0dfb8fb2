use console::{Style, style};

use crate::document::{InclusionMode, SteeringDocument};
use crate::resolver::{InclusionReason, ResolutionResult};

pub struct Display;

impl Display {
    pub fn new() -> Self {
        Self
    }

    pub fn print_header(&self, text: &str) {
        println!();
        println!("{}", style(text).bold().cyan());
        println!("{}", style("═".repeat(60)).dim());
        println!();
    }

    pub fn print_documents_table(&self, documents: &[SteeringDocument]) {
        if documents.is_empty() {
            println!("{}", style("No steering documents found.").dim());
            return;
        }

        let count = |mode: InclusionMode| {
            documents
                .iter()
                .filter(|d| d.inclusion() == mode)
                .count()
        };
        println!(
            "Always: {}  Manual: {}  FileMatch: {}",
            style(count(InclusionMode::Always)).green(),
            style(count(InclusionMode::Manual)).magenta(),
            style(count(InclusionMode::FileMatch)).cyan()
        );
        println!();

        println!(
            "{:<28} {:<10} {:>8}  {}",
            style("ID").bold(),
            style("Inclusion").bold(),
            style("Bytes").bold(),
            style("Patterns").bold()
        );
        println!("{}", style("─".repeat(70)).dim());

        for doc in documents {
            let patterns = doc
                .patterns()
                .iter()
                .map(|p| p.as_str())
                .collect::<Vec<_>>()
                .join(", ");

            println!(
                "{:<28} {:<10} {:>8}  {}",
                doc.id(),
                self.inclusion_style(doc.inclusion())
                    .apply_to(doc.inclusion().to_string()),
                doc.byte_size(),
                style(patterns).dim()
            );
        }
    }

    pub fn print_resolution(&self, result: &ResolutionResult<'_>) {
        if result.is_empty() {
            println!("{}", style("No steering documents apply.").dim());
            return;
        }

        for resolved in result.documents() {
            let reason = match &resolved.reason {
                InclusionReason::Always => "always".to_string(),
                InclusionReason::Requested => "requested".to_string(),
                InclusionReason::Matched { pattern, path } => {
                    format!("{} matched {}", pattern, path)
                }
            };
            println!(
                "  {} {} {}",
                style("→").cyan(),
                self.inclusion_style(resolved.document.inclusion())
                    .apply_to(resolved.id()),
                style(format!("({})", reason)).dim()
            );
        }
    }

    pub fn print_success(&self, message: &str) {
        println!("{} {}", style("✓").green().bold(), message);
    }

    pub fn print_error(&self, message: &str) {
        eprintln!("{} {}", style("✗").red().bold(), message);
    }

    pub fn print_info(&self, message: &str) {
        println!("{} {}", style("→").cyan(), message);
    }

    fn inclusion_style(&self, mode: InclusionMode) -> Style {
        match mode {
            InclusionMode::Always => Style::new().green(),
            InclusionMode::Manual => Style::new().magenta(),
            InclusionMode::FileMatch => Style::new().cyan(),
        }
    }
}

impl Default for Display {
    fn default() -> Self {
        Self::new()
    }
}
