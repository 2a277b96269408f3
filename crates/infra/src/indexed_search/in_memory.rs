use std::sync::Arc;

use async_trait::async_trait;

use catalog_core::AdapterError;
use catalog_model::{LinkedEntity, ResponseGroup};

use super::r#trait::{IndexSearchHits, IndexSearchRequest, IndexedSearch};
use crate::entry_store::InMemoryEntryStore;
use crate::entry_store::in_memory::EntityFilter;

/// Index view over an `InMemoryEntryStore`.
///
/// There is no indexing lag: every query sees the store as it is now.
/// Matching is a case-insensitive substring test on name and code.
#[derive(Debug, Clone)]
pub struct InMemoryIndexedSearch {
    store: Arc<InMemoryEntryStore>,
}

impl InMemoryIndexedSearch {
    pub fn new(store: Arc<InMemoryEntryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl IndexedSearch for InMemoryIndexedSearch {
    async fn search(&self, request: &IndexSearchRequest) -> Result<IndexSearchHits, AdapterError> {
        let filter = EntityFilter {
            keyword: Some(request.keyword.as_str()),
            object_ids: request.object_ids.as_deref(),
            catalog_id: request.catalog_id.as_ref(),
            category_id: request.category_id.as_ref(),
        };

        let hits: Vec<_> = self
            .store
            .entities(request.kind)
            .map_err(|e| AdapterError::Index(e.to_string()))?
            .into_iter()
            .filter(|e| filter.matches(e))
            .collect();

        let total_count = hits.len() as u64;
        let items = hits
            .into_iter()
            .skip(request.window.skip as usize)
            .take(request.window.take as usize)
            .map(|mut entity| {
                if !request.response_group.contains(ResponseGroup::OUTLINES) {
                    entity.set_outline(None);
                }
                if !request.response_group.contains(ResponseGroup::LINKS) {
                    entity.links_mut().clear();
                }
                entity
            })
            .collect();

        Ok(IndexSearchHits { items, total_count })
    }
}
