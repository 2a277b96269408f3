//! Full-text index over categories and products (one index per kind).

pub mod in_memory;
pub mod r#trait;

pub use in_memory::InMemoryIndexedSearch;
pub use r#trait::{IndexSearchHits, IndexSearchRequest, IndexedSearch};
