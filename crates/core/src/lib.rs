//! `catalog-core`: identifiers, error taxonomy and domain marker traits.
//!
//! No IO lives here; adapters and orchestration are in `catalog-infra`.

pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use entity::Entity;
pub use error::{AdapterError, CatalogError, CatalogResult};
pub use id::{CatalogId, EntryId};
pub use value_object::ValueObject;
