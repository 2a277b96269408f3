//! Entry point for the six list-entry operations.

use std::sync::Arc;

use catalog_auth::CatalogPermission;
use catalog_core::CatalogResult;
use catalog_model::{BulkLinkRequest, LinkRequest, MoveRequest, SearchCriteria, SearchResult};

use crate::authorization::{AuthorizationGate, AuthorizationSubject, ensure_authorized};
use crate::bulk::{BulkLinkSummary, BulkMutations, DeleteSummary, LinkSummary};
use crate::config::ListingConfig;
use crate::entry_store::EntryStore;
use crate::indexed_search::IndexedSearch;
use crate::list_search::ListEntrySearch;
use crate::mover::{MoveCoordinator, MoveSummary};
use crate::search::HybridSearch;
use crate::settings::SettingsProvider;

/// Backends shared by every request. Cheap to clone.
#[derive(Clone)]
pub struct ListEntryAdapters {
    pub store: Arc<dyn EntryStore>,
    pub index: Arc<dyn IndexedSearch>,
    pub direct: Arc<dyn ListEntrySearch>,
    pub settings: Arc<dyn SettingsProvider>,
}

/// List-entry operations bound to one authorization gate (one caller).
#[derive(Clone)]
pub struct ListEntryService {
    search: HybridSearch,
    bulk: BulkMutations,
    mover: MoveCoordinator,
    gate: Arc<dyn AuthorizationGate>,
}

impl ListEntryService {
    pub fn new(adapters: ListEntryAdapters, gate: Arc<dyn AuthorizationGate>, config: ListingConfig) -> Self {
        let search = HybridSearch::new(
            adapters.index.clone(),
            adapters.direct.clone(),
            adapters.settings.clone(),
        )
        .with_setting_name(config.indexed_search_setting.clone());

        let bulk = BulkMutations::new(
            adapters.store.clone(),
            adapters.direct.clone(),
            search.clone(),
            gate.clone(),
            config,
        );
        let mover = MoveCoordinator::new(adapters.store, gate.clone());

        Self {
            search,
            bulk,
            mover,
            gate,
        }
    }

    /// One page of categories followed by products. Requires `Read`.
    pub async fn search(&self, criteria: &SearchCriteria) -> CatalogResult<SearchResult> {
        ensure_authorized(
            self.gate.as_ref(),
            AuthorizationSubject::Criteria(criteria),
            CatalogPermission::Read,
        )
        .await?;
        self.search.search(criteria).await
    }

    pub async fn create_links(&self, links: &[LinkRequest]) -> CatalogResult<LinkSummary> {
        self.bulk.create_links(links).await
    }

    pub async fn bulk_create_links(&self, request: &BulkLinkRequest) -> CatalogResult<BulkLinkSummary> {
        self.bulk.bulk_create_links(request).await
    }

    pub async fn delete_links(&self, links: &[LinkRequest]) -> CatalogResult<LinkSummary> {
        self.bulk.delete_links(links).await
    }

    pub async fn move_entries(&self, request: &MoveRequest) -> CatalogResult<MoveSummary> {
        self.mover.move_entries(request).await
    }

    pub async fn delete_by_criteria(&self, criteria: &SearchCriteria) -> CatalogResult<DeleteSummary> {
        self.bulk.delete_by_criteria(criteria).await
    }
}
