use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use catalog_core::{CatalogId, Entity, EntryId};

use crate::kind::EntryKind;
use crate::link::{Link, LinkedEntity};

fn active_by_default() -> bool {
    true
}

/// Leaf catalog entry (sellable item).
///
/// Only the fields the list-entry workflows touch are modelled; pricing,
/// variations and assets belong to the product store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: EntryId,
    catalog_id: CatalogId,
    #[serde(default)]
    category_id: Option<EntryId>,
    code: String,
    name: String,
    #[serde(default)]
    outline: Option<String>,
    #[serde(default = "active_by_default")]
    is_active: bool,
    #[serde(default)]
    links: Vec<Link>,
    #[serde(default)]
    modified_at: Option<DateTime<Utc>>,
}

impl Product {
    pub fn new(
        id: EntryId,
        catalog_id: CatalogId,
        code: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id,
            catalog_id,
            category_id: None,
            code: code.into(),
            name: name.into(),
            outline: None,
            is_active: true,
            links: Vec::new(),
            modified_at: None,
        }
    }

    pub fn in_category(mut self, category_id: EntryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn with_outline(mut self, outline: impl Into<String>) -> Self {
        self.outline = Some(outline.into());
        self
    }

    pub fn category_id(&self) -> Option<&EntryId> {
        self.category_id.as_ref()
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn outline(&self) -> Option<&str> {
        self.outline.as_deref()
    }

    pub fn set_outline(&mut self, outline: Option<String>) {
        self.outline = outline;
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn modified_at(&self) -> Option<DateTime<Utc>> {
        self.modified_at
    }

    pub fn touch(&mut self, at: DateTime<Utc>) {
        self.modified_at = Some(at);
    }

    /// Re-home the product. `category_id = None` places it at the catalog root.
    pub fn move_to(&mut self, catalog_id: CatalogId, category_id: Option<EntryId>) {
        self.catalog_id = catalog_id;
        self.category_id = category_id;
    }
}

impl Entity for Product {
    type Id = EntryId;

    fn id(&self) -> &EntryId {
        &self.id
    }
}

impl LinkedEntity for Product {
    fn kind(&self) -> EntryKind {
        EntryKind::Product
    }

    fn catalog_id(&self) -> &CatalogId {
        &self.catalog_id
    }

    fn links(&self) -> &[Link] {
        &self.links
    }

    fn links_mut(&mut self) -> &mut Vec<Link> {
        &mut self.links
    }
}
