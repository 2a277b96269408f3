//! Moving categories and products between catalogs and categories.
//!
//! A move is two-phase: `EntryMover::prepare` loads and relocates entities in
//! memory, `PreparedMove::confirm` persists them. Both kinds are prepared
//! before either is confirmed, so a request that fails to resolve writes
//! nothing. The caller must hold `Update` on the destination and on every
//! catalog the entries are moved out of.

use std::marker::PhantomData;
use std::slice;
use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use catalog_auth::CatalogPermission;
use catalog_core::{CatalogError, CatalogId, CatalogResult, Entity, EntryId};
use catalog_model::{
    CatalogEntity, Category, EntryKind, LinkedEntity, LoadedEntries, MoveRequest, Product, ResponseGroup,
};

use crate::authorization::{AuthorizationGate, AuthorizationSubject, ensure_authorized};
use crate::entry_store::EntryStore;

/// Entity kind that can be relocated by a move request.
pub trait MovableEntry: LinkedEntity + Clone + Send + Sync + Sized + 'static {
    const KIND: EntryKind;

    fn from_entity(entity: CatalogEntity) -> Option<Self>;

    fn into_entity(self) -> CatalogEntity;

    /// Re-parent in memory. `parent_id` of `None` means the catalog root.
    fn relocate(&mut self, catalog_id: CatalogId, parent_id: Option<EntryId>) -> CatalogResult<()>;
}

impl MovableEntry for Category {
    const KIND: EntryKind = EntryKind::Category;

    fn from_entity(entity: CatalogEntity) -> Option<Self> {
        entity.into_category()
    }

    fn into_entity(self) -> CatalogEntity {
        self.into()
    }

    fn relocate(&mut self, catalog_id: CatalogId, parent_id: Option<EntryId>) -> CatalogResult<()> {
        if parent_id.as_ref() == Some(self.id()) {
            return Err(CatalogError::validation(format!(
                "category '{}' cannot be moved under itself",
                self.id()
            )));
        }
        self.move_to(catalog_id, parent_id);
        Ok(())
    }
}

impl MovableEntry for Product {
    const KIND: EntryKind = EntryKind::Product;

    fn from_entity(entity: CatalogEntity) -> Option<Self> {
        entity.into_product()
    }

    fn into_entity(self) -> CatalogEntity {
        self.into()
    }

    fn relocate(&mut self, catalog_id: CatalogId, parent_id: Option<EntryId>) -> CatalogResult<()> {
        self.move_to(catalog_id, parent_id);
        Ok(())
    }
}

/// Prepares moves for one entry kind.
pub struct EntryMover<T> {
    store: Arc<dyn EntryStore>,
    _kind: PhantomData<fn() -> T>,
}

impl<T> Clone for EntryMover<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            _kind: PhantomData,
        }
    }
}

impl<T: MovableEntry> EntryMover<T> {
    pub fn new(store: Arc<dyn EntryStore>) -> Self {
        Self {
            store,
            _kind: PhantomData,
        }
    }

    /// Load the request's entries of kind `T` and relocate them in memory.
    ///
    /// Every id must resolve; the first one that does not is reported as
    /// `NotFound`.
    pub async fn prepare(&self, request: &MoveRequest) -> CatalogResult<PreparedMove<T>> {
        let catalog_id = request.target_catalog()?;
        let ids = request.ids_of(T::KIND);
        if ids.is_empty() {
            return Ok(PreparedMove::new(Vec::new(), Vec::new(), self.store.clone()));
        }

        let mut entries: Vec<T> = self
            .store
            .get_by_ids(&ids, ResponseGroup::FULL, T::KIND)
            .await?
            .into_iter()
            .filter_map(T::from_entity)
            .collect();

        if let Some(missing) = ids.iter().find(|id| !entries.iter().any(|e| e.id() == *id)) {
            return Err(CatalogError::not_found(T::KIND, missing));
        }

        let origins = entries.clone();
        for entry in &mut entries {
            entry.relocate(catalog_id.clone(), request.category_id.clone())?;
        }

        Ok(PreparedMove::new(entries, origins, self.store.clone()))
    }
}

/// Relocated entities waiting to be persisted. Dropping it discards the move.
#[must_use = "a prepared move is not persisted until confirmed"]
pub struct PreparedMove<T> {
    entries: Vec<T>,
    origins: Vec<T>,
    store: Arc<dyn EntryStore>,
}

impl<T: MovableEntry> PreparedMove<T> {
    fn new(entries: Vec<T>, origins: Vec<T>, store: Arc<dyn EntryStore>) -> Self {
        Self {
            entries,
            origins,
            store,
        }
    }

    pub fn entries(&self) -> &[T] {
        &self.entries
    }

    /// The same entities as loaded, before relocation.
    pub fn origins(&self) -> &[T] {
        &self.origins
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Persist the relocated entities in one batch. Returns how many moved.
    pub async fn confirm(self) -> CatalogResult<usize> {
        let moved = self.entries.len();
        if moved > 0 {
            let batch = self.entries.into_iter().map(T::into_entity).collect();
            self.store.save(batch, T::KIND).await?;
        }
        Ok(moved)
    }
}

impl<T: MovableEntry> core::fmt::Debug for PreparedMove<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PreparedMove")
            .field("kind", &T::KIND)
            .field("entries", &self.entries.len())
            .finish()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MoveSummary {
    pub categories_moved: usize,
    pub products_moved: usize,
}

#[derive(Clone)]
pub struct MoveCoordinator {
    store: Arc<dyn EntryStore>,
    gate: Arc<dyn AuthorizationGate>,
    categories: EntryMover<Category>,
    products: EntryMover<Product>,
}

impl MoveCoordinator {
    pub fn new(store: Arc<dyn EntryStore>, gate: Arc<dyn AuthorizationGate>) -> Self {
        Self {
            categories: EntryMover::new(store.clone()),
            products: EntryMover::new(store.clone()),
            store,
            gate,
        }
    }

    pub async fn move_entries(&self, request: &MoveRequest) -> CatalogResult<MoveSummary> {
        let catalog_id = request.target_catalog()?;

        ensure_authorized(
            self.gate.as_ref(),
            AuthorizationSubject::Move(request),
            CatalogPermission::Update,
        )
        .await?;

        let destination = self
            .store
            .get_catalogs(slice::from_ref(catalog_id))
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| CatalogError::not_found("catalog", catalog_id))?;
        if destination.is_virtual {
            return Err(CatalogError::validation(format!(
                "unable to move to virtual catalog '{catalog_id}'"
            )));
        }

        let categories = self.categories.prepare(request).await?;
        let products = self.products.prepare(request).await?;

        let sources = LoadedEntries::new(products.origins().to_vec(), categories.origins().to_vec());
        ensure_authorized(
            self.gate.as_ref(),
            AuthorizationSubject::Entries(&sources),
            CatalogPermission::Update,
        )
        .await?;

        let summary = MoveSummary {
            categories_moved: categories.confirm().await?,
            products_moved: products.confirm().await?,
        };

        info!(
            catalog_id = %catalog_id,
            category_id = ?request.category_id,
            categories = summary.categories_moved,
            products = summary.products_moved,
            "entries moved"
        );
        Ok(summary)
    }
}
