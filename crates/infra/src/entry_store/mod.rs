//! Entry store abstraction plus the load/persist helpers shared by the
//! mutation workflows.

pub mod in_memory;
pub mod r#trait;

pub use in_memory::InMemoryEntryStore;
pub use r#trait::EntryStore;

use std::collections::HashSet;

use catalog_core::{AdapterError, Entity, EntryId};
use catalog_model::{CatalogEntity, EntryKind, LoadedEntries, ResponseGroup};

/// Response groups used when loading entities whose links will be edited.
pub const PRODUCT_LINKS_GROUP: ResponseGroup = ResponseGroup::LINKS.union(ResponseGroup::VARIATIONS);
pub const CATEGORY_LINKS_GROUP: ResponseGroup = ResponseGroup::LINKS;

/// Resolve `ids` against products first, then categories for whatever did
/// not resolve as a product. An id is never looked up in both stores once it
/// resolved, and duplicate ids are loaded once.
pub async fn load_entries(
    store: &dyn EntryStore,
    ids: &[EntryId],
    product_group: ResponseGroup,
    category_group: ResponseGroup,
) -> Result<LoadedEntries, AdapterError> {
    let mut seen: HashSet<&EntryId> = HashSet::new();
    let unique: Vec<EntryId> = ids.iter().filter(|id| seen.insert(*id)).cloned().collect();
    if unique.is_empty() {
        return Ok(LoadedEntries::default());
    }

    let products: Vec<_> = store
        .get_by_ids(&unique, product_group, EntryKind::Product)
        .await?
        .into_iter()
        .filter_map(CatalogEntity::into_product)
        .collect();

    let resolved: HashSet<&EntryId> = products.iter().map(|p| p.id()).collect();
    let remaining: Vec<EntryId> = unique
        .iter()
        .filter(|id| !resolved.contains(id))
        .cloned()
        .collect();

    let categories = if remaining.is_empty() {
        Vec::new()
    } else {
        store
            .get_by_ids(&remaining, category_group, EntryKind::Category)
            .await?
            .into_iter()
            .filter_map(CatalogEntity::into_category)
            .collect()
    };

    Ok(LoadedEntries::new(products, categories))
}

/// Persist a loaded set as (at most) two batched saves: products, then categories.
pub async fn save_entries(store: &dyn EntryStore, entries: LoadedEntries) -> Result<(), AdapterError> {
    let LoadedEntries {
        products,
        categories,
    } = entries;

    if !products.is_empty() {
        let batch = products.into_iter().map(CatalogEntity::from).collect();
        store.save(batch, EntryKind::Product).await?;
    }
    if !categories.is_empty() {
        let batch = categories.into_iter().map(CatalogEntity::from).collect();
        store.save(batch, EntryKind::Category).await?;
    }
    Ok(())
}
