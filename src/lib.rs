pub mod cli;
pub mod config;
pub mod context;
pub mod document;
pub mod error;
pub mod output;
pub mod pattern;
pub mod resolver;

pub use context::{AssembledContext, ContextAssembler};
pub use document::{
    DocumentDescriptor, DocumentStore, InclusionMode, SteeringDocument, SteeringLoader,
};
pub use error::{Result, SteeringError};
pub use pattern::{GlobPattern, matches};
pub use resolver::{InclusionReason, InclusionResolver, ResolutionResult, TargetSet};
