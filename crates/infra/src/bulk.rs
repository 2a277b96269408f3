//! Link creation/removal and bulk deletion over loaded entity sets.
//!
//! Every mutation loads the addressed entities first and authorizes against
//! what was loaded. Nothing is persisted for a set that was refused.

use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use catalog_auth::CatalogPermission;
use catalog_core::{CatalogError, CatalogResult, Entity, EntryId};
use catalog_model::{
    BulkLinkRequest, EntryKind, Link, LinkRequest, LinkedEntity, ResponseGroup, SearchCriteria,
};

use crate::authorization::{AuthorizationGate, AuthorizationSubject, ensure_authorized};
use crate::config::ListingConfig;
use crate::entry_store::{
    CATEGORY_LINKS_GROUP, EntryStore, PRODUCT_LINKS_GROUP, load_entries, save_entries,
};
use crate::list_search::ListEntrySearch;
use crate::search::HybridSearch;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LinkSummary {
    /// Entities the request ids resolved to.
    pub loaded: usize,
    /// Entities whose link list changed (and were saved).
    pub changed: usize,
    pub links_affected: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BulkLinkSummary {
    /// Direct-search pages requested, including the terminating one.
    pub pages: usize,
    pub entries_linked: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DeleteSummary {
    pub batches: usize,
    pub products_deleted: usize,
    pub categories_deleted: usize,
}

#[derive(Clone)]
pub struct BulkMutations {
    store: Arc<dyn EntryStore>,
    direct: Arc<dyn ListEntrySearch>,
    search: HybridSearch,
    gate: Arc<dyn AuthorizationGate>,
    config: ListingConfig,
}

impl BulkMutations {
    pub fn new(
        store: Arc<dyn EntryStore>,
        direct: Arc<dyn ListEntrySearch>,
        search: HybridSearch,
        gate: Arc<dyn AuthorizationGate>,
        config: ListingConfig,
    ) -> Self {
        Self {
            store,
            direct,
            search,
            gate,
            config,
        }
    }

    /// Add each requested link to the entity it addresses.
    ///
    /// Ids that resolve to nothing are skipped. Links already present are
    /// not added again, so repeating a request changes nothing.
    pub async fn create_links(&self, links: &[LinkRequest]) -> CatalogResult<LinkSummary> {
        let summary = self
            .apply_links(links, CatalogPermission::Update, |entity, link| {
                entity.add_link(link)
            })
            .await?;
        info!(
            requested = links.len(),
            loaded = summary.loaded,
            added = summary.links_affected,
            "links created"
        );
        Ok(summary)
    }

    /// Remove each requested link (first equal occurrence) from its entity.
    pub async fn delete_links(&self, links: &[LinkRequest]) -> CatalogResult<LinkSummary> {
        let summary = self
            .apply_links(links, CatalogPermission::Delete, |entity, link| {
                entity.remove_link(&link)
            })
            .await?;
        info!(
            requested = links.len(),
            loaded = summary.loaded,
            removed = summary.links_affected,
            "links deleted"
        );
        Ok(summary)
    }

    async fn apply_links<F>(
        &self,
        links: &[LinkRequest],
        permission: CatalogPermission,
        mut apply: F,
    ) -> CatalogResult<LinkSummary>
    where
        F: FnMut(&mut dyn LinkedEntity, Link) -> bool + Send,
    {
        let ids: Vec<EntryId> = links.iter().map(|l| l.entry_id.clone()).collect();
        let mut entries = load_entries(
            self.store.as_ref(),
            &ids,
            PRODUCT_LINKS_GROUP,
            CATEGORY_LINKS_GROUP,
        )
        .await?;

        ensure_authorized(
            self.gate.as_ref(),
            AuthorizationSubject::Entries(&entries),
            permission,
        )
        .await?;

        let loaded = entries.len();
        let mut changed: HashSet<EntryId> = HashSet::new();
        let mut links_affected = 0;
        for request in links {
            let Some(entity) = entries.find_mut(&request.entry_id) else {
                debug!(entry_id = %request.entry_id, "link target not found, skipping");
                continue;
            };
            let link = request.to_link(entity.kind());
            if apply(entity, link) {
                links_affected += 1;
                changed.insert(request.entry_id.clone());
            }
        }

        entries.retain_ids(&changed);
        save_entries(self.store.as_ref(), entries).await?;

        Ok(LinkSummary {
            loaded,
            changed: changed.len(),
            links_affected,
        })
    }

    /// Link every entry matched by the request's criteria into its target.
    ///
    /// Pages through the direct list search, starting from the criteria's own
    /// window. Each page is loaded, authorized and saved on its own; a denial
    /// stops the run but earlier pages stay linked. Links are appended without
    /// checking for an existing equal link.
    pub async fn bulk_create_links(&self, request: &BulkLinkRequest) -> CatalogResult<BulkLinkSummary> {
        let catalog_id = request.target_catalog()?.clone();
        let criteria = &request.search_criteria;
        let mut window = criteria.window();
        if window.is_empty() {
            return Err(CatalogError::validation(
                "bulk link creation needs a positive page size",
            ));
        }

        let mut summary = BulkLinkSummary::default();
        loop {
            let page = self.direct.search(&criteria.with_window(window)).await?;
            summary.pages += 1;

            let ids: Vec<EntryId> = page.results.iter().map(|e| e.id().clone()).collect();
            let mut entries = load_entries(
                self.store.as_ref(),
                &ids,
                PRODUCT_LINKS_GROUP,
                CATEGORY_LINKS_GROUP,
            )
            .await?;

            ensure_authorized(
                self.gate.as_ref(),
                AuthorizationSubject::Entries(&entries),
                CatalogPermission::Update,
            )
            .await?;

            if entries.is_empty() {
                break;
            }

            for entity in entries.iter_mut() {
                let link = entity.link_to(catalog_id.clone(), request.category_id.clone());
                entity.push_link(link);
            }
            summary.entries_linked += entries.len();
            debug!(
                page = summary.pages,
                skip = window.skip,
                linked = entries.len(),
                "bulk link page saved"
            );
            save_entries(self.store.as_ref(), entries).await?;

            window = window.advance();
            if u64::from(window.skip) >= page.total_count {
                break;
            }
        }

        info!(
            catalog_id = %catalog_id,
            pages = summary.pages,
            linked = summary.entries_linked,
            "bulk links created"
        );
        Ok(summary)
    }

    /// Delete the entries named by `criteria.object_ids`, or else every
    /// category/product row of one search with `criteria`.
    ///
    /// Ids are processed in fixed-size batches: products first, then the ids
    /// that did not resolve as products are tried as categories. Adapter
    /// failures abort the remaining batches.
    pub async fn delete_by_criteria(&self, criteria: &SearchCriteria) -> CatalogResult<DeleteSummary> {
        ensure_authorized(
            self.gate.as_ref(),
            AuthorizationSubject::Criteria(criteria),
            CatalogPermission::Delete,
        )
        .await?;

        let ids: Vec<EntryId> = match criteria.explicit_ids() {
            Some(ids) => ids.to_vec(),
            None => self
                .search
                .search(criteria)
                .await?
                .results
                .into_iter()
                .filter(|e| e.entry_kind().is_some())
                .map(|e| e.id().clone())
                .collect(),
        };

        let mut summary = DeleteSummary::default();
        for batch in ids.chunks(self.config.delete_batch_size.get()) {
            summary.batches += 1;

            let products = self
                .store
                .get_by_ids(batch, ResponseGroup::NONE, EntryKind::Product)
                .await?;
            let product_ids: Vec<EntryId> = products.iter().map(|p| p.id().clone()).collect();
            if !product_ids.is_empty() {
                self.store.delete(&product_ids, EntryKind::Product).await?;
            }

            let remaining: Vec<EntryId> = batch
                .iter()
                .filter(|id| !product_ids.contains(id))
                .cloned()
                .collect();
            let mut category_ids = Vec::new();
            if !remaining.is_empty() {
                category_ids = self
                    .store
                    .get_by_ids(&remaining, ResponseGroup::NONE, EntryKind::Category)
                    .await?
                    .iter()
                    .map(|c| c.id().clone())
                    .collect();
                if !category_ids.is_empty() {
                    self.store.delete(&category_ids, EntryKind::Category).await?;
                }
            }

            debug!(
                batch = summary.batches,
                products = product_ids.len(),
                categories = category_ids.len(),
                "delete batch done"
            );
            summary.products_deleted += product_ids.len();
            summary.categories_deleted += category_ids.len();
        }

        info!(
            requested = ids.len(),
            batches = summary.batches,
            products = summary.products_deleted,
            categories = summary.categories_deleted,
            "entries deleted"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{
        CountingListSearch, Harness, ScriptedGate, StoreCall, StubListSearch, master, seeded_store,
    };
    use catalog_core::{AdapterError, CatalogId};
    use std::num::NonZeroUsize;

    fn link(entry: &str, catalog: &str, category: Option<&str>) -> LinkRequest {
        LinkRequest::new(entry.into(), catalog.into(), category.map(EntryId::from))
    }

    #[tokio::test]
    async fn create_links_is_idempotent() {
        let harness = Harness::new(seeded_store(3, 2));
        let request = vec![link("p-000", "outlet", Some("c-001"))];

        let first = harness.bulk().create_links(&request).await.unwrap();
        let second = harness.bulk().create_links(&request).await.unwrap();

        assert_eq!(first.links_affected, 1);
        assert_eq!(second.links_affected, 0);
        assert_eq!(harness.product("p-000").links().len(), 1);
        // Nothing changed the second time, so nothing was written.
        assert_eq!(harness.store.saves().len(), 1);
    }

    #[tokio::test]
    async fn create_links_resolves_products_before_categories() {
        let harness = Harness::new(seeded_store(2, 2));
        let request = vec![
            link("p-001", "outlet", None),
            link("c-000", "outlet", None),
            link("ghost", "outlet", None),
        ];

        let summary = harness.bulk().create_links(&request).await.unwrap();

        assert_eq!(summary.loaded, 2);
        assert_eq!(summary.changed, 2);
        let gets = harness.store.gets();
        assert_eq!(gets[0].0, EntryKind::Product);
        assert_eq!(gets[0].1.len(), 3);
        assert_eq!(gets[1].0, EntryKind::Category);
        let category_lookup: Vec<&str> = gets[1].1.iter().map(|id| id.as_str()).collect();
        assert_eq!(category_lookup, vec!["c-000", "ghost"]);

        let category = harness.category("c-000");
        let category_link = &category.links()[0];
        assert_eq!(category_link.entry_kind, EntryKind::Category);
    }

    #[tokio::test]
    async fn denied_create_links_persists_nothing() {
        let harness = Harness::with_gate(seeded_store(2, 0), ScriptedGate::deny_all());

        let err = harness
            .bulk()
            .create_links(&[link("p-000", "outlet", None)])
            .await
            .unwrap_err();

        assert!(err.is_authorization_denied());
        assert!(harness.store.saves().is_empty());
        assert!(harness.product("p-000").links().is_empty());
    }

    #[tokio::test]
    async fn delete_links_removes_existing_and_ignores_absent() {
        let harness = Harness::new(seeded_store(2, 0));
        let present = link("p-000", "outlet", None);
        harness.bulk().create_links(&[present.clone()]).await.unwrap();

        let summary = harness
            .bulk()
            .delete_links(&[present, link("p-001", "outlet", None)])
            .await
            .unwrap();

        assert_eq!(summary.loaded, 2);
        assert_eq!(summary.links_affected, 1);
        assert!(harness.product("p-000").links().is_empty());
        assert!(harness.product("p-001").links().is_empty());
    }

    #[tokio::test]
    async fn delete_links_requires_delete_permission() {
        let gate = ScriptedGate::allow_all();
        let harness = Harness::with_gate(seeded_store(1, 0), gate.clone());

        harness
            .bulk()
            .delete_links(&[link("p-000", "outlet", None)])
            .await
            .unwrap();

        assert_eq!(gate.permissions(), vec![CatalogPermission::Delete]);
    }

    fn bulk_request(take: u32) -> BulkLinkRequest {
        BulkLinkRequest::new(
            "outlet".into(),
            Some("c-900".into()),
            SearchCriteria::default()
                .with_catalog(master())
                .paged(0, take),
        )
    }

    #[tokio::test]
    async fn bulk_link_pages_through_every_match() {
        let harness = Harness::new(seeded_store(45, 0));
        let direct = Arc::new(CountingListSearch::new(harness.direct()));
        let bulk = harness.bulk_with_direct(direct.clone());

        let summary = bulk.bulk_create_links(&bulk_request(20)).await.unwrap();

        assert_eq!(direct.calls(), 3);
        assert_eq!(summary.pages, 3);
        assert_eq!(summary.entries_linked, 45);
        for i in 0..45 {
            let product = harness.product(&format!("p-{i:03}"));
            assert_eq!(product.links().len(), 1, "p-{i:03}");
            assert_eq!(product.links()[0].catalog_id, CatalogId::from("outlet"));
        }
    }

    #[tokio::test]
    async fn bulk_link_exact_multiple_stops_without_extra_page() {
        let harness = Harness::new(seeded_store(40, 0));
        let direct = Arc::new(CountingListSearch::new(harness.direct()));

        harness
            .bulk_with_direct(direct.clone())
            .bulk_create_links(&bulk_request(20))
            .await
            .unwrap();

        assert_eq!(direct.calls(), 2);
    }

    #[tokio::test]
    async fn bulk_link_appends_duplicates_on_repeat() {
        let harness = Harness::new(seeded_store(3, 0));

        harness.bulk().bulk_create_links(&bulk_request(20)).await.unwrap();
        harness.bulk().bulk_create_links(&bulk_request(20)).await.unwrap();

        assert_eq!(harness.product("p-002").links().len(), 2);
    }

    #[tokio::test]
    async fn bulk_link_empty_match_still_authorizes() {
        let gate = ScriptedGate::allow_all();
        let harness = Harness::with_gate(seeded_store(0, 0), gate.clone());

        let summary = harness.bulk().bulk_create_links(&bulk_request(20)).await.unwrap();

        assert_eq!(summary.pages, 1);
        assert_eq!(summary.entries_linked, 0);
        assert_eq!(gate.permissions(), vec![CatalogPermission::Update]);
        assert!(harness.store.saves().is_empty());
    }

    #[tokio::test]
    async fn bulk_link_denial_keeps_earlier_pages() {
        let gate = ScriptedGate::script([true, false]);
        let harness = Harness::with_gate(seeded_store(45, 0), gate);

        let err = harness
            .bulk()
            .bulk_create_links(&bulk_request(20))
            .await
            .unwrap_err();

        assert!(err.is_authorization_denied());
        assert_eq!(harness.product("p-000").links().len(), 1);
        assert_eq!(harness.product("p-019").links().len(), 1);
        assert!(harness.product("p-020").links().is_empty());
        assert_eq!(harness.store.saves().len(), 1);
    }

    #[tokio::test]
    async fn bulk_link_requires_target_catalog() {
        let harness = Harness::new(seeded_store(3, 0));
        let direct = Arc::new(CountingListSearch::new(harness.direct()));
        let mut request = bulk_request(20);
        request.catalog_id = None;

        let err = harness
            .bulk_with_direct(direct.clone())
            .bulk_create_links(&request)
            .await
            .unwrap_err();

        assert!(matches!(err, CatalogError::Validation(_)));
        assert_eq!(direct.calls(), 0);
    }

    #[tokio::test]
    async fn bulk_link_rejects_zero_page_size() {
        let harness = Harness::new(seeded_store(3, 0));
        let err = harness
            .bulk()
            .bulk_create_links(&bulk_request(0))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
    }

    #[tokio::test]
    async fn delete_by_ids_runs_in_batches_products_first() {
        let harness = Harness::new(seeded_store(25, 20));
        let ids: Vec<EntryId> = (0..25)
            .map(|i| EntryId::from(format!("p-{i:03}")))
            .chain((0..20).map(|i| EntryId::from(format!("c-{i:03}"))))
            .collect();

        let summary = harness
            .bulk()
            .delete_by_criteria(&SearchCriteria::default().with_object_ids(ids))
            .await
            .unwrap();

        assert_eq!(summary.batches, 3);
        assert_eq!(summary.products_deleted, 25);
        assert_eq!(summary.categories_deleted, 20);

        let product_lookups: Vec<usize> = harness
            .store
            .gets()
            .iter()
            .filter(|(kind, _)| *kind == EntryKind::Product)
            .map(|(_, ids)| ids.len())
            .collect();
        assert_eq!(product_lookups, vec![20, 20, 5]);

        let mut deleted_products = HashSet::new();
        let mut deleted_categories = HashSet::new();
        for call in harness.store.calls() {
            if let StoreCall::Delete(kind, ids) = call {
                match kind {
                    EntryKind::Product => deleted_products.extend(ids),
                    EntryKind::Category => deleted_categories.extend(ids),
                }
            }
        }
        assert!(deleted_products.is_disjoint(&deleted_categories));
        assert_eq!(deleted_products.len() + deleted_categories.len(), 45);
    }

    #[tokio::test]
    async fn delete_batch_size_is_configurable() {
        let harness = Harness::new(seeded_store(5, 0)).with_config(
            ListingConfig::default().with_delete_batch_size(NonZeroUsize::new(2).unwrap()),
        );
        let ids = (0..5).map(|i| EntryId::from(format!("p-{i:03}"))).collect();

        let summary = harness
            .bulk()
            .delete_by_criteria(&SearchCriteria::default().with_object_ids(ids))
            .await
            .unwrap();

        assert_eq!(summary.batches, 3);
    }

    #[tokio::test]
    async fn delete_by_search_skips_synthetic_rows() {
        let harness = Harness::new(seeded_store(1, 0));
        let direct = Arc::new(StubListSearch::synthetic_and_product());
        let bulk = harness.bulk_with_direct(direct);

        let summary = bulk
            .delete_by_criteria(&SearchCriteria::default().with_catalog(master()))
            .await
            .unwrap();

        assert_eq!(summary.products_deleted, 1);
        let looked_up: Vec<EntryId> = harness
            .store
            .gets()
            .into_iter()
            .flat_map(|(_, ids)| ids)
            .collect();
        assert!(!looked_up.contains(&EntryId::from("synthetic-root")));
    }

    #[tokio::test]
    async fn denied_delete_touches_nothing() {
        let harness = Harness::with_gate(seeded_store(3, 0), ScriptedGate::deny_all());
        let ids = vec![EntryId::from("p-000")];

        let err = harness
            .bulk()
            .delete_by_criteria(&SearchCriteria::default().with_object_ids(ids))
            .await
            .unwrap_err();

        assert!(err.is_authorization_denied());
        assert!(harness.store.calls().is_empty());
    }

    #[tokio::test]
    async fn delete_failure_aborts_remaining_batches() {
        let harness = Harness::new(seeded_store(45, 0));
        harness.store.fail_delete_call(2);
        let ids = (0..45).map(|i| EntryId::from(format!("p-{i:03}"))).collect();

        let err = harness
            .bulk()
            .delete_by_criteria(&SearchCriteria::default().with_object_ids(ids))
            .await
            .unwrap_err();

        assert!(matches!(err, CatalogError::Adapter(AdapterError::Store(_))));
        assert_eq!(harness.inner.count(EntryKind::Product), 25);
    }
}
