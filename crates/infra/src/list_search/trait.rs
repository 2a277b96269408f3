use async_trait::async_trait;

use catalog_core::AdapterError;
use catalog_model::{SearchCriteria, SearchResult};

/// Search that lists entries straight from the stores, categories first.
///
/// Results may include synthetic rows that address neither a category nor a
/// product; callers that act on results must filter by `ListEntry::entry_kind`.
#[async_trait]
pub trait ListEntrySearch: Send + Sync {
    async fn search(&self, criteria: &SearchCriteria) -> Result<SearchResult, AdapterError>;
}
