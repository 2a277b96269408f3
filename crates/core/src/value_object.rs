//! Value object marker: equality by value, not identity.

/// Marker trait for values compared field by field.
///
/// A catalog link is the typical example: two links pointing the same entry at
/// the same catalog/category are the same link, regardless of where they came
/// from. Collections that hold value objects use this equality for
/// de-duplication and removal.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct Link { catalog_id: CatalogId, category_id: Option<EntryId> }
///
/// impl ValueObject for Link {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
