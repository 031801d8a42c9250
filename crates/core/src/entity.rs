//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Identity is assigned by the store, so an entity that has never been
/// persisted has no id yet.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the identifier, or `None` before the first insert.
    fn id(&self) -> Option<Self::Id>;

    /// Clear the identifier so the store assigns a fresh one on insert.
    fn clear_id(&mut self);

    /// Record the identifier assigned by the store.
    fn assign_id(&mut self, id: Self::Id);

    fn is_persisted(&self) -> bool {
        self.id().is_some()
    }
}
