use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use catalog_core::{CatalogId, Entity, EntryId};

use crate::kind::EntryKind;
use crate::link::{Link, LinkedEntity};

fn active_by_default() -> bool {
    true
}

/// Hierarchical catalog node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    id: EntryId,
    catalog_id: CatalogId,
    #[serde(default)]
    parent_id: Option<EntryId>,
    code: String,
    name: String,
    /// Materialized ancestor path, e.g. `master/c-1/c-7`.
    #[serde(default)]
    outline: Option<String>,
    #[serde(default = "active_by_default")]
    is_active: bool,
    #[serde(default)]
    links: Vec<Link>,
    #[serde(default)]
    modified_at: Option<DateTime<Utc>>,
}

impl Category {
    pub fn new(
        id: EntryId,
        catalog_id: CatalogId,
        code: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id,
            catalog_id,
            parent_id: None,
            code: code.into(),
            name: name.into(),
            outline: None,
            is_active: true,
            links: Vec::new(),
            modified_at: None,
        }
    }

    pub fn under(mut self, parent_id: EntryId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    pub fn with_outline(mut self, outline: impl Into<String>) -> Self {
        self.outline = Some(outline.into());
        self
    }

    pub fn parent_id(&self) -> Option<&EntryId> {
        self.parent_id.as_ref()
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

    /// Re-home the category. `parent_id = None` places it at the catalog root.
    pub fn move_to(&mut self, catalog_id: CatalogId, parent_id: Option<EntryId>) {
        self.catalog_id = catalog_id;
        self.parent_id = parent_id;
    }
}

impl Entity for Category {
    type Id = EntryId;

    fn id(&self) -> &EntryId {
        &self.id
    }
}

impl LinkedEntity for Category {
    fn kind(&self) -> EntryKind {
        EntryKind::Category
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
