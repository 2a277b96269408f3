//! Tagged view over the two entity kinds, and the loaded-set container the
//! bulk workflows authorize and persist.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use catalog_core::{CatalogId, Entity, EntryId};

use crate::category::Category;
use crate::kind::EntryKind;
use crate::link::{Link, LinkedEntity};
use crate::product::Product;

/// Either a category or a product, as returned by stores and indexes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CatalogEntity {
    Category(Category),
    Product(Product),
}

impl CatalogEntity {
    pub fn name(&self) -> &str {
        match self {
            CatalogEntity::Category(c) => c.name(),
            CatalogEntity::Product(p) => p.name(),
        }
    }

    pub fn code(&self) -> &str {
        match self {
            CatalogEntity::Category(c) => c.code(),
            CatalogEntity::Product(p) => p.code(),
        }
    }

    pub fn outline(&self) -> Option<&str> {
        match self {
            CatalogEntity::Category(c) => c.outline(),
            CatalogEntity::Product(p) => p.outline(),
        }
    }

    pub fn set_outline(&mut self, outline: Option<String>) {
        match self {
            CatalogEntity::Category(c) => c.set_outline(outline),
            CatalogEntity::Product(p) => p.set_outline(outline),
        }
    }

    /// Direct parent: the category's parent or the product's category.
    pub fn parent_id(&self) -> Option<&EntryId> {
        match self {
            CatalogEntity::Category(c) => c.parent_id(),
            CatalogEntity::Product(p) => p.category_id(),
        }
    }

    pub fn touch(&mut self, at: DateTime<Utc>) {
        match self {
            CatalogEntity::Category(c) => c.touch(at),
            CatalogEntity::Product(p) => p.touch(at),
        }
    }

    pub fn into_category(self) -> Option<Category> {
        match self {
            CatalogEntity::Category(c) => Some(c),
            CatalogEntity::Product(_) => None,
        }
    }

    pub fn into_product(self) -> Option<Product> {
        match self {
            CatalogEntity::Product(p) => Some(p),
            CatalogEntity::Category(_) => None,
        }
    }
}

impl From<Category> for CatalogEntity {
    fn from(value: Category) -> Self {
        CatalogEntity::Category(value)
    }
}

impl From<Product> for CatalogEntity {
    fn from(value: Product) -> Self {
        CatalogEntity::Product(value)
    }
}

impl Entity for CatalogEntity {
    type Id = EntryId;

    fn id(&self) -> &EntryId {
        match self {
            CatalogEntity::Category(c) => c.id(),
            CatalogEntity::Product(p) => p.id(),
        }
    }
}

impl LinkedEntity for CatalogEntity {
    fn kind(&self) -> EntryKind {
        match self {
            CatalogEntity::Category(_) => EntryKind::Category,
            CatalogEntity::Product(_) => EntryKind::Product,
        }
    }

    fn catalog_id(&self) -> &CatalogId {
        match self {
            CatalogEntity::Category(c) => c.catalog_id(),
            CatalogEntity::Product(p) => p.catalog_id(),
        }
    }

    fn links(&self) -> &[Link] {
        match self {
            CatalogEntity::Category(c) => c.links(),
            CatalogEntity::Product(p) => p.links(),
        }
    }

    fn links_mut(&mut self) -> &mut Vec<Link> {
        match self {
            CatalogEntity::Category(c) => c.links_mut(),
            CatalogEntity::Product(p) => p.links_mut(),
        }
    }
}

/// Concrete entity set loaded for one request (or one page of a bulk request).
///
/// This is what authorization is evaluated against, since ids alone may
/// resolve to entities the caller cannot see.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedEntries {
    pub products: Vec<Product>,
    pub categories: Vec<Category>,
}

impl LoadedEntries {
    pub fn new(products: Vec<Product>, categories: Vec<Category>) -> Self {
        Self {
            products,
            categories,
        }
    }

    pub fn from_entities(entities: impl IntoIterator<Item = CatalogEntity>) -> Self {
        let mut loaded = Self::default();
        for entity in entities {
            match entity {
                CatalogEntity::Category(c) => loaded.categories.push(c),
                CatalogEntity::Product(p) => loaded.products.push(p),
            }
        }
        loaded
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty() && self.categories.is_empty()
    }

    pub fn len(&self) -> usize {
        self.products.len() + self.categories.len()
    }

    pub fn ids(&self) -> impl Iterator<Item = &EntryId> {
        self.products
            .iter()
            .map(|p| p.id())
            .chain(self.categories.iter().map(|c| c.id()))
    }

    pub fn catalog_ids(&self) -> impl Iterator<Item = &CatalogId> {
        self.products
            .iter()
            .map(|p| p.catalog_id())
            .chain(self.categories.iter().map(|c| c.catalog_id()))
    }

    pub fn find_mut(&mut self, id: &EntryId) -> Option<&mut dyn LinkedEntity> {
        if let Some(p) = self.products.iter_mut().find(|p| p.id() == id) {
            return Some(p);
        }
        self.categories
            .iter_mut()
            .find(|c| c.id() == id)
            .map(|c| c as &mut dyn LinkedEntity)
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut dyn LinkedEntity> {
        let products = self
            .products
            .iter_mut()
            .map(|p| p as &mut dyn LinkedEntity);
        let categories = self
            .categories
            .iter_mut()
            .map(|c| c as &mut dyn LinkedEntity);
        products.chain(categories)
    }

    /// Drop every entity whose id is not in `keep`.
    pub fn retain_ids(&mut self, keep: &HashSet<EntryId>) {
        self.products.retain(|p| keep.contains(p.id()));
        self.categories.retain(|c| keep.contains(c.id()));
    }
}
