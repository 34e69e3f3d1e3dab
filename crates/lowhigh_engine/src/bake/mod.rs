//! Bake preparation
//!
//! The grouping half of the LOW/HIGH workflow:
//!
//! ```text
//! selection ─→ EntityDuplicator ─→ LOW / HIGH groups
//! all entities ─→ PairMatcher ─→ BakeGroupOrganizer ─→ Bake_* groups
//! Bake_* groups ─→ prune_empty
//! ```

mod duplicator;
mod pairs;
mod organizer;
mod pruner;

pub use duplicator::{Duplicate, DuplicateBatch, DuplicateError, EntityDuplicator};
pub use pairs::{Pair, PairMatcher};
pub use organizer::BakeGroupOrganizer;
pub use pruner::prune_empty;
