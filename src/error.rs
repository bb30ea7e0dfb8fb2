use thiserror::Error;

use crate::pattern::PatternError;

#[derive(Error, Debug)]
pub enum SteeringError {
    #[error("Duplicate steering document: {0}")]
    DuplicateDocument(String),

    #[error("Steering document {0} uses fileMatch but declares no fileMatchPattern")]
    MissingPatterns(String),

    #[error("Steering document {document} uses {mode} inclusion but declares fileMatchPattern")]
    UnexpectedPatterns { document: String, mode: String },

    #[error("Malformed pattern {pattern:?} in {document}: {reason}")]
    MalformedPattern {
        document: String,
        pattern: String,
        reason: String,
    },

    #[error("Invalid front matter in {document}: {message}")]
    InvalidFrontmatter { document: String, message: String },

    #[error("Steering document has an empty identity")]
    EmptyIdentity,

    #[error("Invalid target path: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml_bw::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl SteeringError {
    pub fn malformed_pattern(document: impl Into<String>, err: PatternError) -> Self {
        Self::MalformedPattern {
            document: document.into(),
            pattern: err.pattern,
            reason: err.reason,
        }
    }

    /// Errors raised while loading descriptors. The whole batch is rejected.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::DuplicateDocument(_)
                | Self::MissingPatterns(_)
                | Self::UnexpectedPatterns { .. }
                | Self::MalformedPattern { .. }
                | Self::InvalidFrontmatter { .. }
                | Self::EmptyIdentity
        )
    }

    /// Caller-side mistakes that can be fixed and retried.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}

pub type Result<T> = std::result::Result<T, SteeringError>;
