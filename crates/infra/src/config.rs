use std::num::NonZeroUsize;

use crate::settings::USE_INDEXED_SEARCH;

pub const DEFAULT_DELETE_BATCH_SIZE: NonZeroUsize = match NonZeroUsize::new(20) {
    Some(size) => size,
    None => panic!("batch size must be non-zero"),
};

/// Tunables for the list-entry workflows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingConfig {
    /// Ids resolved and deleted per round trip by delete-by-criteria.
    pub delete_batch_size: NonZeroUsize,
    /// Setting consulted to choose between indexed and direct search.
    pub indexed_search_setting: String,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            delete_batch_size: DEFAULT_DELETE_BATCH_SIZE,
            indexed_search_setting: USE_INDEXED_SEARCH.to_string(),
        }
    }
}

impl ListingConfig {
    pub fn with_delete_batch_size(mut self, size: NonZeroUsize) -> Self {
        self.delete_batch_size = size;
        self
    }

    pub fn with_indexed_search_setting(mut self, name: impl Into<String>) -> Self {
        self.indexed_search_setting = name.into();
        self
    }
}
