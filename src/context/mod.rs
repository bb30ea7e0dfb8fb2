//! Context assembly: joins resolved steering documents into one bounded blob.

mod assembler;

pub use assembler::{AssembledContext, ContextAssembler, DEFAULT_MAX_BYTES, boundary_marker};
