//! Infrastructure layer: adapter ports, in-memory adapters and the
//! list-entry workflows built on them.

pub mod authorization;
pub mod bulk;
pub mod config;
pub mod entry_store;
pub mod indexed_search;
pub mod list_entries;
pub mod list_search;
pub mod mover;
pub mod search;
pub mod seed;
pub mod settings;


#[cfg(test)]
mod testing;

pub use authorization::{AuthorizationGate, AuthorizationSubject, PrincipalGate};
pub use bulk::{BulkLinkSummary, BulkMutations, DeleteSummary, LinkSummary};
pub use config::ListingConfig;
pub use entry_store::{EntryStore, InMemoryEntryStore};
pub use indexed_search::{IndexSearchHits, IndexSearchRequest, IndexedSearch, InMemoryIndexedSearch};
pub use list_entries::{ListEntryAdapters, ListEntryService};
pub use list_search::{InMemoryListEntrySearch, ListEntrySearch};
pub use mover::{EntryMover, MoveCoordinator, MoveSummary, MovableEntry, PreparedMove};
pub use search::HybridSearch;
pub use seed::{CatalogSeed, SeedError};
pub use settings::{EnvSettings, InMemorySettings, SettingsProvider, USE_INDEXED_SEARCH};
