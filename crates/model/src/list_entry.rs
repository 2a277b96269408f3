//! Read-only listing projection over categories and products.
//!
//! A `ListEntry` is a snapshot produced by a search call, not a live handle:
//! mutating the underlying entity afterwards does not change it.

use serde::{Deserialize, Serialize};

use catalog_core::{CatalogId, Entity, EntryId};

use crate::category::Category;
use crate::entity::CatalogEntity;
use crate::kind::EntryKind;
use crate::link::{Link, LinkedEntity};
use crate::product::Product;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryListEntry {
    pub id: EntryId,
    pub name: String,
    pub code: String,
    pub catalog_id: CatalogId,
    #[serde(default)]
    pub parent_id: Option<EntryId>,
    #[serde(default)]
    pub outline: Option<String>,
    pub is_active: bool,
    #[serde(default)]
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductListEntry {
    pub id: EntryId,
    pub name: String,
    pub code: String,
    pub catalog_id: CatalogId,
    #[serde(default)]
    pub category_id: Option<EntryId>,
    #[serde(default)]
    pub outline: Option<String>,
    pub is_active: bool,
    #[serde(default)]
    pub links: Vec<Link>,
}

/// Any other listing row a direct search backend may emit (e.g. a catalog
/// root or a grouping row). It addresses no category or product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyntheticListEntry {
    pub id: EntryId,
    pub type_name: String,
    pub name: String,
    #[serde(default)]
    pub outline: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ListEntry {
    Category(CategoryListEntry),
    Product(ProductListEntry),
    Synthetic(SyntheticListEntry),
}

impl ListEntry {
    pub fn id(&self) -> &EntryId {
        match self {
            ListEntry::Category(e) => &e.id,
            ListEntry::Product(e) => &e.id,
            ListEntry::Synthetic(e) => &e.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            ListEntry::Category(e) => &e.name,
            ListEntry::Product(e) => &e.name,
            ListEntry::Synthetic(e) => &e.name,
        }
    }

    pub fn outline(&self) -> Option<&str> {
        match self {
            ListEntry::Category(e) => e.outline.as_deref(),
            ListEntry::Product(e) => e.outline.as_deref(),
            ListEntry::Synthetic(e) => e.outline.as_deref(),
        }
    }

    /// The entity kind this row addresses; `None` for synthetic rows.
    pub fn entry_kind(&self) -> Option<EntryKind> {
        match self {
            ListEntry::Category(_) => Some(EntryKind::Category),
            ListEntry::Product(_) => Some(EntryKind::Product),
            ListEntry::Synthetic(_) => None,
        }
    }

    pub fn type_name(&self) -> &str {
        match self {
            ListEntry::Category(_) => EntryKind::Category.as_str(),
            ListEntry::Product(_) => EntryKind::Product.as_str(),
            ListEntry::Synthetic(e) => &e.type_name,
        }
    }
}

impl From<&Category> for CategoryListEntry {
    fn from(c: &Category) -> Self {
        Self {
            id: c.id().clone(),
            name: c.name().to_string(),
            code: c.code().to_string(),
            catalog_id: c.catalog_id().clone(),
            parent_id: c.parent_id().cloned(),
            outline: c.outline().map(str::to_string),
            is_active: c.is_active(),
            links: c.links().to_vec(),
        }
    }
}

impl From<&Product> for ProductListEntry {
    fn from(p: &Product) -> Self {
        Self {
            id: p.id().clone(),
            name: p.name().to_string(),
            code: p.code().to_string(),
            catalog_id: p.catalog_id().clone(),
            category_id: p.category_id().cloned(),
            outline: p.outline().map(str::to_string),
            is_active: p.is_active(),
            links: p.links().to_vec(),
        }
    }
}

impl From<&Category> for ListEntry {
    fn from(c: &Category) -> Self {
        ListEntry::Category(c.into())
    }
}

impl From<&Product> for ListEntry {
    fn from(p: &Product) -> Self {
        ListEntry::Product(p.into())
    }
}

impl From<&CatalogEntity> for ListEntry {
    fn from(entity: &CatalogEntity) -> Self {
        match entity {
            CatalogEntity::Category(c) => c.into(),
            CatalogEntity::Product(p) => p.into(),
        }
    }
}

impl From<CatalogEntity> for ListEntry {
    fn from(entity: CatalogEntity) -> Self {
        (&entity).into()
    }
}
