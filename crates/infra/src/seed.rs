use serde::{Deserialize, Serialize};
use thiserror::Error;

use catalog_core::AdapterError;
use catalog_model::{Catalog, Category, Product};

use crate::entry_store::InMemoryEntryStore;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("invalid catalog seed: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Store(#[from] AdapterError),
}

/// JSON document used to populate an in-memory store at startup.
///
/// ```json
/// { "catalogs": [...], "categories": [...], "products": [...] }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSeed {
    pub catalogs: Vec<Catalog>,
    pub categories: Vec<Category>,
    pub products: Vec<Product>,
}

impl CatalogSeed {
    pub fn from_json(raw: &str) -> Result<Self, SeedError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn len(&self) -> usize {
        self.catalogs.len() + self.categories.len() + self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Insert everything into `store`, replacing entries with the same id.
    pub fn load_into(self, store: &InMemoryEntryStore) -> Result<usize, SeedError> {
        let loaded = self.len();
        for catalog in self.catalogs {
            store.insert_catalog(catalog)?;
        }
        for category in self.categories {
            store.insert_category(category)?;
        }
        for product in self.products {
            store.insert_product(product)?;
        }
        Ok(loaded)
    }
}
