//! Command output in text or JSON form.
//!
//! - `OutputWriter`: routes results to styled text or single-object JSON
//! - `ResolveOutput`: structured form of a resolution plus assembled context

mod writer;

pub use writer::{OutputWriter, ResolveOutput};
