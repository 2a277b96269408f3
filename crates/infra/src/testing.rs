//! Fixtures and adapter doubles for the in-crate tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use catalog_auth::CatalogPermission;
use catalog_core::{AdapterError, CatalogId, Entity, EntryId};
use catalog_model::{
    Catalog, CatalogEntity, Category, EntryKind, ListEntry, Product, ResponseGroup, SearchCriteria,
    SearchResult, SyntheticListEntry,
};

use crate::authorization::{AuthorizationGate, AuthorizationSubject};
use crate::bulk::BulkMutations;
use crate::config::ListingConfig;
use crate::entry_store::{EntryStore, InMemoryEntryStore};
use crate::indexed_search::{IndexSearchHits, IndexSearchRequest, IndexedSearch, InMemoryIndexedSearch};
use crate::list_search::{InMemoryListEntrySearch, ListEntrySearch};
use crate::mover::MoveCoordinator;
use crate::search::HybridSearch;
use crate::settings::InMemorySettings;

pub(crate) fn master() -> CatalogId {
    "master".into()
}

/// Store with physical catalogs `master` and `outlet`, virtual catalog
/// `promo`, and `products`/`categories` entries in `master`.
///
/// Ids are `p-000`, `c-000`, ...; every name contains "Tea".
pub(crate) fn seeded_store(products: usize, categories: usize) -> Arc<InMemoryEntryStore> {
    let store = InMemoryEntryStore::new();
    store.insert_catalog(Catalog::physical(master(), "Master")).unwrap();
    store.insert_catalog(Catalog::physical("outlet".into(), "Outlet")).unwrap();
    store.insert_catalog(Catalog::virtual_catalog("promo".into(), "Promo")).unwrap();

    for i in 0..categories {
        store
            .insert_category(
                Category::new(format!("c-{i:03}").into(), master(), format!("CAT{i:03}"), format!("Tea category {i}"))
                    .with_outline(format!("master/c-{i:03}")),
            )
            .unwrap();
    }
    for i in 0..products {
        store
            .insert_product(
                Product::new(format!("p-{i:03}").into(), master(), format!("PRD{i:03}"), format!("Tea product {i}"))
                    .with_outline("master"),
            )
            .unwrap();
    }
    Arc::new(store)
}

/// Hybrid search over a seeded store with a recording index.
pub(crate) struct SearchFixture {
    pub index: Arc<RecordingIndex>,
    pub direct: Arc<InMemoryListEntrySearch>,
}

impl SearchFixture {
    pub fn new(categories: usize, products: usize) -> Self {
        let store = seeded_store(products, categories);
        Self {
            index: Arc::new(RecordingIndex::new(InMemoryIndexedSearch::new(store.clone()))),
            direct: Arc::new(InMemoryListEntrySearch::new(store)),
        }
    }

    pub fn search(&self) -> HybridSearch {
        HybridSearch::new(
            self.index.clone(),
            self.direct.clone(),
            Arc::new(InMemorySettings::new()),
        )
    }
}

pub(crate) struct RecordingIndex {
    inner: InMemoryIndexedSearch,
    requests: Mutex<Vec<IndexSearchRequest>>,
}

impl RecordingIndex {
    pub fn new(inner: InMemoryIndexedSearch) -> Self {
        Self {
            inner,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<IndexSearchRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl IndexedSearch for RecordingIndex {
    async fn search(&self, request: &IndexSearchRequest) -> Result<IndexSearchHits, AdapterError> {
        self.requests.lock().unwrap().push(request.clone());
        self.inner.search(request).await
    }
}

pub(crate) struct FailingIndex;

#[async_trait]
impl IndexedSearch for FailingIndex {
    async fn search(&self, _request: &IndexSearchRequest) -> Result<IndexSearchHits, AdapterError> {
        Err(AdapterError::Index("index unavailable".to_string()))
    }
}

/// Direct search returning a fixed page.
pub(crate) struct StubListSearch {
    result: SearchResult,
}

impl StubListSearch {
    /// A synthetic root row followed by product `p-000`.
    pub fn synthetic_and_product() -> Self {
        let product = Product::new("p-000".into(), master(), "PRD000", "Tea product 0");
        let synthetic = ListEntry::Synthetic(SyntheticListEntry {
            id: "synthetic-root".into(),
            type_name: "catalog".to_string(),
            name: "Master".to_string(),
            outline: None,
        });
        Self {
            result: SearchResult::new(vec![synthetic, ListEntry::from(&product)], 2),
        }
    }

    pub fn result(&self) -> &SearchResult {
        &self.result
    }
}

#[async_trait]
impl ListEntrySearch for StubListSearch {
    async fn search(&self, _criteria: &SearchCriteria) -> Result<SearchResult, AdapterError> {
        Ok(self.result.clone())
    }
}

pub(crate) struct CountingListSearch {
    inner: Arc<dyn ListEntrySearch>,
    calls: AtomicUsize,
}

impl CountingListSearch {
    pub fn new(inner: Arc<dyn ListEntrySearch>) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ListEntrySearch for CountingListSearch {
    async fn search(&self, criteria: &SearchCriteria) -> Result<SearchResult, AdapterError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.search(criteria).await
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum StoreCall {
    Get(EntryKind, Vec<EntryId>),
    Save(EntryKind, Vec<EntryId>),
    Delete(EntryKind, Vec<EntryId>),
    Catalogs(Vec<CatalogId>),
}

/// Store wrapper that records every call and can fail the n-th delete.
pub(crate) struct RecordingStore {
    inner: Arc<InMemoryEntryStore>,
    calls: Mutex<Vec<StoreCall>>,
    deletes: AtomicUsize,
    fail_delete_at: Mutex<Option<usize>>,
}

impl RecordingStore {
    pub fn new(inner: Arc<InMemoryEntryStore>) -> Self {
        Self {
            inner,
            calls: Mutex::new(Vec::new()),
            deletes: AtomicUsize::new(0),
            fail_delete_at: Mutex::new(None),
        }
    }

    /// Make the `n`-th delete call (1-based) fail.
    pub fn fail_delete_call(&self, n: usize) {
        *self.fail_delete_at.lock().unwrap() = Some(n);
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn gets(&self) -> Vec<(EntryKind, Vec<EntryId>)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                StoreCall::Get(kind, ids) => Some((kind, ids)),
                _ => None,
            })
            .collect()
    }

    pub fn saves(&self) -> Vec<(EntryKind, Vec<EntryId>)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                StoreCall::Save(kind, ids) => Some((kind, ids)),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: StoreCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl EntryStore for RecordingStore {
    async fn get_by_ids(
        &self,
        ids: &[EntryId],
        response_group: ResponseGroup,
        kind: EntryKind,
    ) -> Result<Vec<CatalogEntity>, AdapterError> {
        self.record(StoreCall::Get(kind, ids.to_vec()));
        self.inner.get_by_ids(ids, response_group, kind).await
    }

    async fn save(&self, entities: Vec<CatalogEntity>, kind: EntryKind) -> Result<(), AdapterError> {
        self.record(StoreCall::Save(
            kind,
            entities.iter().map(|e| e.id().clone()).collect(),
        ));
        self.inner.save(entities, kind).await
    }

    async fn delete(&self, ids: &[EntryId], kind: EntryKind) -> Result<(), AdapterError> {
        self.record(StoreCall::Delete(kind, ids.to_vec()));
        let n = self.deletes.fetch_add(1, Ordering::SeqCst) + 1;
        if *self.fail_delete_at.lock().unwrap() == Some(n) {
            return Err(AdapterError::Store("delete timed out".to_string()));
        }
        self.inner.delete(ids, kind).await
    }

    async fn get_catalogs(&self, ids: &[CatalogId]) -> Result<Vec<Catalog>, AdapterError> {
        self.record(StoreCall::Catalogs(ids.to_vec()));
        self.inner.get_catalogs(ids).await
    }
}

#[derive(Debug)]
struct GateState {
    script: VecDeque<bool>,
    fallback: bool,
    permissions: Vec<CatalogPermission>,
    subjects: Vec<&'static str>,
}

/// Gate answering from a script, then a fallback. Clones share state.
#[derive(Debug, Clone)]
pub(crate) struct ScriptedGate {
    state: Arc<Mutex<GateState>>,
}

impl ScriptedGate {
    fn with(script: VecDeque<bool>, fallback: bool) -> Self {
        Self {
            state: Arc::new(Mutex::new(GateState {
                script,
                fallback,
                permissions: Vec::new(),
                subjects: Vec::new(),
            })),
        }
    }

    pub fn allow_all() -> Self {
        Self::with(VecDeque::new(), true)
    }

    pub fn deny_all() -> Self {
        Self::with(VecDeque::new(), false)
    }

    /// Answer with `decisions` in order, then deny.
    pub fn script(decisions: impl IntoIterator<Item = bool>) -> Self {
        Self::with(decisions.into_iter().collect(), false)
    }

    pub fn permissions(&self) -> Vec<CatalogPermission> {
        self.state.lock().unwrap().permissions.clone()
    }

    /// `AuthorizationSubject::describe` of every check, in order.
    pub fn subjects(&self) -> Vec<&'static str> {
        self.state.lock().unwrap().subjects.clone()
    }
}

#[async_trait]
impl AuthorizationGate for ScriptedGate {
    async fn authorize(
        &self,
        subject: AuthorizationSubject<'_>,
        permission: CatalogPermission,
    ) -> Result<bool, AdapterError> {
        let mut state = self.state.lock().unwrap();
        state.permissions.push(permission);
        state.subjects.push(subject.describe());
        let fallback = state.fallback;
        Ok(state.script.pop_front().unwrap_or(fallback))
    }
}

/// Gate whose backend is unreachable.
#[derive(Debug, Clone, Copy)]
pub(crate) struct UnreachableGate;

#[async_trait]
impl AuthorizationGate for UnreachableGate {
    async fn authorize(
        &self,
        _subject: AuthorizationSubject<'_>,
        _permission: CatalogPermission,
    ) -> Result<bool, AdapterError> {
        Err(AdapterError::Authorization("policy service unreachable".to_string()))
    }
}

/// Recording store over a seeded in-memory store, plus workflow builders.
pub(crate) struct Harness {
    pub inner: Arc<InMemoryEntryStore>,
    pub store: Arc<RecordingStore>,
    pub gate: ScriptedGate,
    pub config: ListingConfig,
}

impl Harness {
    pub fn new(inner: Arc<InMemoryEntryStore>) -> Self {
        Self::with_gate(inner, ScriptedGate::allow_all())
    }

    pub fn with_gate(inner: Arc<InMemoryEntryStore>, gate: ScriptedGate) -> Self {
        Self {
            store: Arc::new(RecordingStore::new(inner.clone())),
            inner,
            gate,
            config: ListingConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ListingConfig) -> Self {
        self.config = config;
        self
    }

    pub fn direct(&self) -> Arc<dyn ListEntrySearch> {
        Arc::new(InMemoryListEntrySearch::new(self.inner.clone()))
    }

    pub fn bulk(&self) -> BulkMutations {
        self.bulk_with_direct(self.direct())
    }

    pub fn bulk_with_direct(&self, direct: Arc<dyn ListEntrySearch>) -> BulkMutations {
        let search = HybridSearch::new(
            Arc::new(InMemoryIndexedSearch::new(self.inner.clone())),
            direct.clone(),
            Arc::new(InMemorySettings::new()),
        );
        BulkMutations::new(
            self.store.clone(),
            direct,
            search,
            Arc::new(self.gate.clone()),
            self.config.clone(),
        )
    }

    pub fn mover(&self) -> MoveCoordinator {
        MoveCoordinator::new(self.store.clone(), Arc::new(self.gate.clone()))
    }

    pub fn product(&self, id: &str) -> Product {
        self.inner
            .product(&id.into())
            .unwrap_or_else(|| panic!("product {id} missing"))
    }

    pub fn category(&self, id: &str) -> Category {
        self.inner
            .category(&id.into())
            .unwrap_or_else(|| panic!("category {id} missing"))
    }
}
