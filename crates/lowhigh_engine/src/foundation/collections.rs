//! Specialized collection types

pub use indexmap::{IndexMap, IndexSet};
pub use slotmap::SlotMap;

/// Insertion-ordered map keyed by name
///
/// Iteration order follows first insertion, which keeps reported counts and
/// created-group ordering stable for a given input ordering.
pub type NamedMap<T> = IndexMap<String, T>;

/// Insertion-ordered set used for group membership
pub type OrderedSet<T> = IndexSet<T>;

/// Handle-based map using slot map for stable references
pub type HandleMap<K, T> = SlotMap<K, T>;
