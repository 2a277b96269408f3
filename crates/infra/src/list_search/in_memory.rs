use std::sync::Arc;

use async_trait::async_trait;

use catalog_core::AdapterError;
use catalog_model::{EntryKind, ListEntry, SearchCriteria, SearchResult};

use super::r#trait::ListEntrySearch;
use crate::entry_store::InMemoryEntryStore;
use crate::entry_store::in_memory::EntityFilter;

/// Direct listing over an `InMemoryEntryStore`: every matching category,
/// then every matching product, then the caller's window.
#[derive(Debug, Clone)]
pub struct InMemoryListEntrySearch {
    store: Arc<InMemoryEntryStore>,
}

impl InMemoryListEntrySearch {
    pub fn new(store: Arc<InMemoryEntryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ListEntrySearch for InMemoryListEntrySearch {
    async fn search(&self, criteria: &SearchCriteria) -> Result<SearchResult, AdapterError> {
        let filter = EntityFilter {
            keyword: criteria.keyword(),
            object_ids: criteria.explicit_ids(),
            catalog_id: criteria.catalog_id.as_ref(),
            category_id: criteria.category_id.as_ref(),
        };

        let mut rows = Vec::new();
        for kind in [EntryKind::Category, EntryKind::Product] {
            rows.extend(
                self.store
                    .entities(kind)
                    .map_err(|e| AdapterError::Search(e.to_string()))?
                    .into_iter()
                    .filter(|e| filter.matches(e)),
            );
        }

        let total_count = rows.len() as u64;
        let results = rows
            .into_iter()
            .skip(criteria.skip as usize)
            .take(criteria.take as usize)
            .map(ListEntry::from)
            .collect();

        Ok(SearchResult::new(results, total_count))
    }
}
