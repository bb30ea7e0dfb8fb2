//! Inclusion resolution: which steering documents apply to a set of files.

mod inclusion;
mod target;

pub use inclusion::{InclusionReason, InclusionResolver, ResolutionResult, ResolvedDocument};
pub use target::TargetSet;
