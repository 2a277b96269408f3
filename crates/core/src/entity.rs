//! Entity trait: identity that survives state changes.

/// Anything persisted by an entry store and addressed by id.
pub trait Entity {
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> &Self::Id;
}
