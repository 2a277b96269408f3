use async_trait::async_trait;

use catalog_core::{AdapterError, CatalogId, EntryId};
use catalog_model::{Catalog, CatalogEntity, EntryKind, ResponseGroup};

/// Read/write access to the category and product stores.
///
/// Both stores are addressed through one trait, keyed by `EntryKind`, so the
/// workflows can treat them uniformly. An id belongs to exactly one kind.
///
/// ## Contract
///
/// - `get_by_ids` returns only entities that exist; unknown ids are skipped,
///   never reported as errors. Order follows `ids`.
/// - `save` upserts a batch of entities that must all be of `kind`.
/// - `delete` removes the given ids of `kind`; unknown ids are ignored.
/// - Failures (timeouts, connectivity) surface as `AdapterError` and are
///   propagated by the core without retry.
#[async_trait]
pub trait EntryStore: Send + Sync {
    async fn get_by_ids(
        &self,
        ids: &[EntryId],
        response_group: ResponseGroup,
        kind: EntryKind,
    ) -> Result<Vec<CatalogEntity>, AdapterError>;

    async fn save(&self, entities: Vec<CatalogEntity>, kind: EntryKind) -> Result<(), AdapterError>;

    async fn delete(&self, ids: &[EntryId], kind: EntryKind) -> Result<(), AdapterError>;

    /// Catalog lookup (used to validate move destinations).
    async fn get_catalogs(&self, ids: &[CatalogId]) -> Result<Vec<Catalog>, AdapterError>;
}
