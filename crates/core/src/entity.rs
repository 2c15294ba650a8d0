//! Entity trait: records with a stable identity.

/// Entity marker + minimal interface.
///
/// Identifiers are ordered; UUIDv7-backed ids sort by creation time, which the
/// record collections rely on for stable listings.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + Ord + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
