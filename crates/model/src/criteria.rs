//! Search criteria, pagination window and response shape selection.

use serde::{Deserialize, Serialize};

use catalog_core::{CatalogId, EntryId};

use crate::list_entry::ListEntry;

pub const DEFAULT_TAKE: u32 = 20;

/// List-entry search criteria as sent by callers.
///
/// The engine never mutates criteria; paging state is carried in
/// `PaginationWindow` values derived from `skip`/`take`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchCriteria {
    pub keyword: Option<String>,
    /// Explicit id set; when present the keyword is not used to pick targets.
    pub object_ids: Option<Vec<EntryId>>,
    pub catalog_id: Option<CatalogId>,
    pub category_id: Option<EntryId>,
    pub store_id: Option<String>,
    /// Passed to index backends untouched; ordering is not a stable contract.
    pub sort: Option<String>,
    pub skip: u32,
    pub take: u32,
}

impl Default for SearchCriteria {
    fn default() -> Self {
        Self {
            keyword: None,
            object_ids: None,
            catalog_id: None,
            category_id: None,
            store_id: None,
            sort: None,
            skip: 0,
            take: DEFAULT_TAKE,
        }
    }
}

impl SearchCriteria {
    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    pub fn with_catalog(mut self, catalog_id: CatalogId) -> Self {
        self.catalog_id = Some(catalog_id);
        self
    }

    pub fn with_category(mut self, category_id: EntryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn with_object_ids(mut self, ids: Vec<EntryId>) -> Self {
        self.object_ids = Some(ids);
        self
    }

    pub fn paged(mut self, skip: u32, take: u32) -> Self {
        self.skip = skip;
        self.take = take;
        self
    }

    /// Keyword with surrounding whitespace removed; `None` if blank or if
    /// explicit ids were supplied, which take its place.
    pub fn keyword(&self) -> Option<&str> {
        if self.explicit_ids().is_some() {
            return None;
        }
        self.keyword
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }

    /// Explicit ids, if a non-empty set was supplied.
    pub fn explicit_ids(&self) -> Option<&[EntryId]> {
        self.object_ids.as_deref().filter(|ids| !ids.is_empty())
    }

    pub fn window(&self) -> PaginationWindow {
        PaginationWindow::new(self.skip, self.take)
    }

    /// Copy of these criteria addressing `window` instead.
    pub fn with_window(&self, window: PaginationWindow) -> Self {
        Self {
            skip: window.skip,
            take: window.take,
            ..self.clone()
        }
    }
}

/// `(skip, take)` over a logical row sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PaginationWindow {
    pub skip: u32,
    pub take: u32,
}

/// How a window splits against a leading bucket of `total` rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BucketSplit {
    /// Rows before this page that fall inside the bucket.
    pub skip_consumed: u32,
    /// Rows of this page filled by the bucket.
    pub take_consumed: u32,
    /// Window left for the next bucket.
    pub remaining: PaginationWindow,
}

impl PaginationWindow {
    pub fn new(skip: u32, take: u32) -> Self {
        Self { skip, take }
    }

    /// Split this window against a bucket holding `total` rows that precedes
    /// everything else in the logical sequence.
    pub fn consume(self, total: u64) -> BucketSplit {
        let skip = u64::from(self.skip);
        let take = u64::from(self.take);

        // Both are bounded by skip/take, so they fit back into u32.
        let skip_consumed = total.min(skip) as u32;
        let take_consumed = take.min(total.saturating_sub(skip)) as u32;

        BucketSplit {
            skip_consumed,
            take_consumed,
            remaining: PaginationWindow {
                skip: self.skip - skip_consumed,
                take: self.take - take_consumed,
            },
        }
    }

    /// Window of the following page.
    pub fn advance(self) -> Self {
        Self {
            skip: self.skip.saturating_add(self.take),
            take: self.take,
        }
    }

    pub fn is_empty(self) -> bool {
        self.take == 0
    }
}

/// Page of list entries plus the logical total across both kinds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub results: Vec<ListEntry>,
    pub total_count: u64,
}

impl SearchResult {
    pub fn new(results: Vec<ListEntry>, total_count: u64) -> Self {
        Self {
            results,
            total_count,
        }
    }
}

/// Flag set selecting which parts of an entity an adapter should return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ResponseGroup(u8);

impl ResponseGroup {
    pub const NONE: Self = Self(0);
    pub const INFO: Self = Self(1);
    pub const OUTLINES: Self = Self(1 << 1);
    pub const LINKS: Self = Self(1 << 2);
    pub const VARIATIONS: Self = Self(1 << 3);
    pub const FULL: Self = Self(0b1111);

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn bits(self) -> u8 {
        self.0
    }
}

impl core::ops::BitOr for ResponseGroup {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}
