//! Scene management
//!
//! Entities, payloads and groups as the engine sees them.
//!
//! ## Architecture
//!
//! ```text
//! Host scene (or snapshot file)
//!      ↓
//! EntityStore (World)  +  GroupRegistry
//!      ↓
//! Scene (owned by the caller, passed into every operation)
//! ```

mod entity;
mod world;
mod groups;
mod state;
mod snapshot;

pub use entity::{Entity, EntityId, EntityKind, Payload, PayloadId};
pub use world::{EntityStore, StoreError, World};
pub use groups::{Group, GroupError, GroupRegistry, MoveOutcome};
pub use state::Scene;
pub use snapshot::{EntityRecord, PayloadRecord, SceneSnapshot, SnapshotError};
