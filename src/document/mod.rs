//! Steering documents: metadata types, front matter parsing, loading, and the
//! validated descriptor store.
//!
//! | Inclusion   | Applies when                                  |
//! |-------------|-----------------------------------------------|
//! | `always`    | every resolution                              |
//! | `manual`    | its identity is explicitly requested          |
//! | `fileMatch` | any `fileMatchPattern` matches any target     |

mod frontmatter;
mod loader;
mod store;
mod types;

pub use frontmatter::parse_document;
pub use loader::SteeringLoader;
pub use store::DocumentStore;
pub use types::{DocumentDescriptor, InclusionMode, PatternSpec, SteeringDocument};
