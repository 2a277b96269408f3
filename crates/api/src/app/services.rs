use std::sync::Arc;

use tracing::info;

use catalog_infra::{
    CatalogSeed, EnvSettings, InMemoryEntryStore, InMemoryIndexedSearch, InMemoryListEntrySearch,
    ListEntryAdapters, ListEntryService, ListingConfig, PrincipalGate, SeedError, SettingsProvider,
};

use crate::context::PrincipalContext;

/// Process-wide adapters; a `ListEntryService` is bound per request.
#[derive(Clone)]
pub struct AppServices {
    adapters: ListEntryAdapters,
    listing: ListingConfig,
}

impl AppServices {
    pub fn new(adapters: ListEntryAdapters, listing: ListingConfig) -> Self {
        Self { adapters, listing }
    }

    /// In-memory adapters over one store, optionally pre-populated from `seed`.
    pub fn in_memory(
        listing: ListingConfig,
        settings: Arc<dyn SettingsProvider>,
        seed: Option<CatalogSeed>,
    ) -> Result<Self, SeedError> {
        let store = Arc::new(InMemoryEntryStore::new());
        if let Some(seed) = seed {
            let loaded = seed.load_into(&store)?;
            info!(loaded, "catalog seed loaded");
        }

        let adapters = ListEntryAdapters {
            index: Arc::new(InMemoryIndexedSearch::new(store.clone())),
            direct: Arc::new(InMemoryListEntrySearch::new(store.clone())),
            store,
            settings,
        };
        Ok(Self::new(adapters, listing))
    }

    /// In-memory adapters with settings read from the environment.
    pub fn from_env_settings(listing: ListingConfig, seed: Option<CatalogSeed>) -> Result<Self, SeedError> {
        Self::in_memory(listing, Arc::new(EnvSettings::new()), seed)
    }

    pub fn for_principal(&self, principal: &PrincipalContext) -> ListEntryService {
        ListEntryService::new(
            self.adapters.clone(),
            Arc::new(PrincipalGate::new(principal.to_principal())),
            self.listing.clone(),
        )
    }
}
