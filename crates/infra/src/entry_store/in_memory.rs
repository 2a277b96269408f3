use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::Utc;

use catalog_core::{AdapterError, CatalogId, Entity, EntryId};
use catalog_model::{Catalog, CatalogEntity, Category, EntryKind, LinkedEntity, Product, ResponseGroup};

use super::r#trait::EntryStore;

#[derive(Debug, Default)]
struct State {
    catalogs: BTreeMap<CatalogId, Catalog>,
    categories: BTreeMap<EntryId, Category>,
    products: BTreeMap<EntryId, Product>,
}

/// In-memory catalog, category and product store.
///
/// Intended for tests/dev. Entities are kept in id order, which also gives
/// the in-memory search adapters a stable result order.
///
/// Response groups only control whether links are returned; everything else
/// is always populated so a load-then-save cycle never drops data.
#[derive(Debug, Default)]
pub struct InMemoryEntryStore {
    state: RwLock<State>,
}

impl InMemoryEntryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Panic while holding the write lock so later access sees it poisoned.
    #[cfg(test)]
    pub(crate) fn poison(&self) {
        std::thread::scope(|s| {
            let _ = s
                .spawn(|| {
                    let _guard = self.state.write();
                    panic!("poisoning entry store");
                })
                .join();
        });
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, State>, AdapterError> {
        self.state
            .read()
            .map_err(|_| AdapterError::Store("lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, State>, AdapterError> {
        self.state
            .write()
            .map_err(|_| AdapterError::Store("lock poisoned".to_string()))
    }

    pub fn insert_catalog(&self, catalog: Catalog) -> Result<(), AdapterError> {
        self.write()?.catalogs.insert(catalog.id.clone(), catalog);
        Ok(())
    }

    pub fn insert_category(&self, category: Category) -> Result<(), AdapterError> {
        self.write()?
            .categories
            .insert(category.id().clone(), category);
        Ok(())
    }

    pub fn insert_product(&self, product: Product) -> Result<(), AdapterError> {
        self.write()?.products.insert(product.id().clone(), product);
        Ok(())
    }

    pub fn category(&self, id: &EntryId) -> Option<Category> {
        self.read().ok()?.categories.get(id).cloned()
    }

    pub fn product(&self, id: &EntryId) -> Option<Product> {
        self.read().ok()?.products.get(id).cloned()
    }

    /// Snapshot of every stored entity of `kind`, in id order.
    pub fn entities(&self, kind: EntryKind) -> Result<Vec<CatalogEntity>, AdapterError> {
        let state = self.read()?;
        let entities = match kind {
            EntryKind::Category => state
                .categories
                .values()
                .cloned()
                .map(CatalogEntity::from)
                .collect(),
            EntryKind::Product => state
                .products
                .values()
                .cloned()
                .map(CatalogEntity::from)
                .collect(),
        };
        Ok(entities)
    }

    pub fn count(&self, kind: EntryKind) -> usize {
        self.read()
            .map(|state| match kind {
                EntryKind::Category => state.categories.len(),
                EntryKind::Product => state.products.len(),
            })
            .unwrap_or(0)
    }
}

fn shape(mut entity: CatalogEntity, response_group: ResponseGroup) -> CatalogEntity {
    if !response_group.contains(ResponseGroup::LINKS) {
        entity.links_mut().clear();
    }
    entity
}

#[async_trait]
impl EntryStore for InMemoryEntryStore {
    async fn get_by_ids(
        &self,
        ids: &[EntryId],
        response_group: ResponseGroup,
        kind: EntryKind,
    ) -> Result<Vec<CatalogEntity>, AdapterError> {
        let state = self.read()?;
        let found = ids
            .iter()
            .filter_map(|id| match kind {
                EntryKind::Category => state.categories.get(id).cloned().map(CatalogEntity::from),
                EntryKind::Product => state.products.get(id).cloned().map(CatalogEntity::from),
            })
            .map(|entity| shape(entity, response_group))
            .collect();
        Ok(found)
    }

    async fn save(&self, entities: Vec<CatalogEntity>, kind: EntryKind) -> Result<(), AdapterError> {
        if let Some(stray) = entities.iter().find(|e| e.kind() != kind) {
            return Err(AdapterError::Store(format!(
                "{} '{}' cannot be saved as a {kind}",
                stray.kind(),
                stray.id()
            )));
        }

        let now = Utc::now();
        let mut state = self.write()?;
        for mut entity in entities {
            entity.touch(now);
            match entity {
                CatalogEntity::Category(c) => {
                    state.categories.insert(c.id().clone(), c);
                }
                CatalogEntity::Product(p) => {
                    state.products.insert(p.id().clone(), p);
                }
            }
        }
        Ok(())
    }

    async fn delete(&self, ids: &[EntryId], kind: EntryKind) -> Result<(), AdapterError> {
        let mut state = self.write()?;
        for id in ids {
            match kind {
                EntryKind::Category => {
                    state.categories.remove(id);
                }
                EntryKind::Product => {
                    state.products.remove(id);
                }
            }
        }
        Ok(())
    }

    async fn get_catalogs(&self, ids: &[CatalogId]) -> Result<Vec<Catalog>, AdapterError> {
        let state = self.read()?;
        Ok(ids
            .iter()
            .filter_map(|id| state.catalogs.get(id).cloned())
            .collect())
    }
}

/// Filters shared by the in-memory search adapters.
///
/// An entity matches a catalog when it is owned by it or linked into it, and
/// a category when it is a direct child of it or linked under it. Explicit ids
/// replace the keyword match.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct EntityFilter<'a> {
    pub keyword: Option<&'a str>,
    pub object_ids: Option<&'a [EntryId]>,
    pub catalog_id: Option<&'a CatalogId>,
    pub category_id: Option<&'a EntryId>,
}

impl EntityFilter<'_> {
    pub fn matches(&self, entity: &CatalogEntity) -> bool {
        if let Some(keyword) = self.keyword.filter(|_| self.object_ids.is_none()) {
            let needle = keyword.to_lowercase();
            let hit = entity.name().to_lowercase().contains(&needle)
                || entity.code().to_lowercase().contains(&needle);
            if !hit {
                return false;
            }
        }

        if let Some(ids) = self.object_ids {
            if !ids.contains(entity.id()) {
                return false;
            }
        }

        if let Some(catalog_id) = self.catalog_id {
            let owned = entity.catalog_id() == catalog_id;
            let linked = entity.links().iter().any(|l| &l.catalog_id == catalog_id);
            if !owned && !linked {
                return false;
            }
        }

        if let Some(category_id) = self.category_id {
            let child = entity.parent_id() == Some(category_id);
            let linked = entity
                .links()
                .iter()
                .any(|l| l.category_id.as_ref() == Some(category_id));
            if !child && !linked {
                return false;
            }
        }

        true
    }
}
