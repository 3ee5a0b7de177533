//! Navigation tree indexing and search library.
//!
//! This crate provides the data layer for a navigation surface:
//! - A static navigation tree model (sections, items, children)
//! - Flattening of the tree into a searchable list of routable entries
//! - Substring filtering with a curated empty-query preload list
//! - Best-effort sanitization of author-provided trees

pub mod error;
pub mod filter;
pub mod flatten;
pub mod sanitize;
pub mod types;

// Re-export main types
pub use error::{NavIndexError, Result};
pub use filter::filter;
pub use flatten::{flatten, flatten_nodes};
pub use sanitize::{sanitize, validate};
pub use types::{NavNode, NavSection, SearchIndexEntry};
