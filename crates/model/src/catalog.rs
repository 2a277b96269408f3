use serde::{Deserialize, Serialize};

use catalog_core::CatalogId;

/// Catalog read model.
///
/// A virtual catalog only aggregates links to entries owned by physical
/// catalogs; it can never own entries, so it is not a valid move destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub id: CatalogId,
    pub name: String,
    #[serde(default)]
    pub is_virtual: bool,
}

impl Catalog {
    pub fn physical(id: CatalogId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            is_virtual: false,
        }
    }

    pub fn virtual_catalog(id: CatalogId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            is_virtual: true,
        }
    }
}
