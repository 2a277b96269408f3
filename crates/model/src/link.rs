//! Links attach an entry to an additional parent catalog or category.

use serde::{Deserialize, Serialize};

use catalog_core::{CatalogId, Entity, EntryId, ValueObject};

use crate::kind::EntryKind;

/// Directed association of an entry to a catalog (root) or a category in it.
///
/// Links are never persisted on their own: they live in the owning entity's
/// link list and are saved together with it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Link {
    pub entry_id: EntryId,
    pub entry_kind: EntryKind,
    pub catalog_id: CatalogId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<EntryId>,
}

impl ValueObject for Link {}

impl Link {
    pub fn new(
        entry_id: EntryId,
        entry_kind: EntryKind,
        catalog_id: CatalogId,
        category_id: Option<EntryId>,
    ) -> Self {
        Self {
            entry_id,
            entry_kind,
            catalog_id,
            category_id,
        }
    }
}

/// A link as addressed by a caller, before the entry's kind is known.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LinkRequest {
    pub entry_id: EntryId,
    pub catalog_id: CatalogId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<EntryId>,
}

impl LinkRequest {
    pub fn new(entry_id: EntryId, catalog_id: CatalogId, category_id: Option<EntryId>) -> Self {
        Self {
            entry_id,
            catalog_id,
            category_id,
        }
    }

    /// Resolve into a `Link` once the addressed entity has been loaded.
    pub fn to_link(&self, kind: EntryKind) -> Link {
        Link::new(
            self.entry_id.clone(),
            kind,
            self.catalog_id.clone(),
            self.category_id.clone(),
        )
    }
}

/// Entity that carries a mutable list of links.
///
/// The list keeps insertion order. `add_link` gives set semantics (value-equal
/// links are not added twice); `push_link` appends unconditionally and is used
/// by the criteria-driven bulk path.
pub trait LinkedEntity: Entity<Id = EntryId> {
    fn kind(&self) -> EntryKind;

    fn catalog_id(&self) -> &CatalogId;

    fn links(&self) -> &[Link];

    fn links_mut(&mut self) -> &mut Vec<Link>;

    /// Returns `false` when a value-equal link was already present.
    fn add_link(&mut self, link: Link) -> bool {
        if self.links().contains(&link) {
            return false;
        }
        self.links_mut().push(link);
        true
    }

    fn push_link(&mut self, link: Link) {
        self.links_mut().push(link);
    }

    /// Remove the first value-equal link. Returns `false` if none matched.
    fn remove_link(&mut self, link: &Link) -> bool {
        let links = self.links_mut();
        match links.iter().position(|l| l == link) {
            Some(pos) => {
                links.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Build a link from this entity to `catalog_id` / `category_id`.
    fn link_to(&self, catalog_id: CatalogId, category_id: Option<EntryId>) -> Link {
        Link::new(self.id().clone(), self.kind(), catalog_id, category_id)
    }
}
