//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Products, categories and stock records are all identified by the integer
/// key the remote API assigns them.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> Self::Id;
}
