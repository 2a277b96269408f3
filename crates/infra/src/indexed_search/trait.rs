use async_trait::async_trait;

use catalog_core::{AdapterError, CatalogId, EntryId};
use catalog_model::{CatalogEntity, EntryKind, PaginationWindow, ResponseGroup, SearchCriteria};

/// Query sent to the index of one entry kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexSearchRequest {
    pub kind: EntryKind,
    pub keyword: String,
    pub object_ids: Option<Vec<EntryId>>,
    pub catalog_id: Option<CatalogId>,
    pub category_id: Option<EntryId>,
    pub store_id: Option<String>,
    pub sort: Option<String>,
    pub window: PaginationWindow,
    pub response_group: ResponseGroup,
}

impl IndexSearchRequest {
    /// Carry the caller's filters over to a per-kind index query.
    pub fn from_criteria(
        kind: EntryKind,
        criteria: &SearchCriteria,
        keyword: &str,
        window: PaginationWindow,
        response_group: ResponseGroup,
    ) -> Self {
        Self {
            kind,
            keyword: keyword.to_string(),
            object_ids: criteria.explicit_ids().map(<[EntryId]>::to_vec),
            catalog_id: criteria.catalog_id.clone(),
            category_id: criteria.category_id.clone(),
            store_id: criteria.store_id.clone(),
            sort: criteria.sort.clone(),
            window,
            response_group,
        }
    }
}

/// One page of index hits plus the total hit count for the query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexSearchHits {
    pub items: Vec<CatalogEntity>,
    pub total_count: u64,
}

/// Keyword search against a per-kind index.
///
/// `total_count` must be the total number of hits regardless of the window,
/// including when `window.take` is zero.
#[async_trait]
pub trait IndexedSearch: Send + Sync {
    async fn search(&self, request: &IndexSearchRequest) -> Result<IndexSearchHits, AdapterError>;
}
