//! Catalog list-entry model.
//!
//! Categories and products are stored and indexed independently; this crate
//! defines the shapes the list-entry workflows exchange with stores, indexes
//! and callers. Pure data and value logic only (no IO).

pub mod catalog;
pub mod category;
pub mod criteria;
pub mod entity;
pub mod kind;
pub mod link;
pub mod list_entry;
pub mod product;
pub mod requests;

pub use catalog::Catalog;
pub use category::Category;
pub use criteria::{
    BucketSplit, DEFAULT_TAKE, PaginationWindow, ResponseGroup, SearchCriteria, SearchResult,
};
pub use entity::{CatalogEntity, LoadedEntries};
pub use kind::EntryKind;
pub use link::{Link, LinkRequest, LinkedEntity};
pub use list_entry::{CategoryListEntry, ListEntry, ProductListEntry, SyntheticListEntry};
pub use product::Product;
pub use requests::{BulkLinkRequest, MoveEntry, MoveRequest};
