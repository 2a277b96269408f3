//! Direct (non-indexed) list-entry search.

pub mod in_memory;
pub mod r#trait;

pub use in_memory::InMemoryListEntrySearch;
pub use r#trait::ListEntrySearch;
