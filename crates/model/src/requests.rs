//! Mutation requests accepted by the list-entry workflows.

use serde::{Deserialize, Serialize};

use catalog_core::{CatalogError, CatalogId, CatalogResult, EntryId};

use crate::criteria::SearchCriteria;
use crate::kind::EntryKind;

fn required_catalog<'a>(catalog_id: Option<&'a CatalogId>, what: &str) -> CatalogResult<&'a CatalogId> {
    match catalog_id {
        Some(id) if !id.is_blank() => Ok(id),
        _ => Err(CatalogError::validation(format!(
            "target catalog identifier should be specified for {what}"
        ))),
    }
}

/// Entry named by a move request, tagged with its kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveEntry {
    pub id: EntryId,
    pub kind: EntryKind,
}

/// Relocate categories and products into a catalog (root) or a category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRequest {
    #[serde(default)]
    pub catalog_id: Option<CatalogId>,
    #[serde(default)]
    pub category_id: Option<EntryId>,
    #[serde(default)]
    pub entries: Vec<MoveEntry>,
}

impl MoveRequest {
    pub fn to_catalog(catalog_id: CatalogId) -> Self {
        Self {
            catalog_id: Some(catalog_id),
            ..Self::default()
        }
    }

    pub fn into_category(mut self, category_id: EntryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn with_entry(mut self, id: EntryId, kind: EntryKind) -> Self {
        self.entries.push(MoveEntry { id, kind });
        self
    }

    pub fn target_catalog(&self) -> CatalogResult<&CatalogId> {
        required_catalog(self.catalog_id.as_ref(), "move")
    }

    /// Ids of `kind`, de-duplicated, in request order.
    pub fn ids_of(&self, kind: EntryKind) -> Vec<EntryId> {
        let mut ids: Vec<EntryId> = Vec::new();
        for entry in self.entries.iter().filter(|e| e.kind == kind) {
            if !ids.contains(&entry.id) {
                ids.push(entry.id.clone());
            }
        }
        ids
    }
}

/// Link every entry matched by `search_criteria` to a catalog/category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkLinkRequest {
    #[serde(default)]
    pub catalog_id: Option<CatalogId>,
    #[serde(default)]
    pub category_id: Option<EntryId>,
    #[serde(default)]
    pub search_criteria: SearchCriteria,
}

impl BulkLinkRequest {
    pub fn new(catalog_id: CatalogId, category_id: Option<EntryId>, search_criteria: SearchCriteria) -> Self {
        Self {
            catalog_id: Some(catalog_id),
            category_id,
            search_criteria,
        }
    }

    pub fn target_catalog(&self) -> CatalogResult<&CatalogId> {
        required_catalog(self.catalog_id.as_ref(), "bulk link creation")
    }
}
