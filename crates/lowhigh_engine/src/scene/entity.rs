//! Entity and payload data

use serde::{Serialize, Deserialize};

slotmap::new_key_type! {
    /// Stable identifier of an entity in a store
    pub struct EntityId;

    /// Stable identifier of a payload data block in a store
    pub struct PayloadId;
}

/// Broad classification of an entity
///
/// Only geometric entities carry bake-relevant payloads; callers use this to
/// filter selections before bake preparation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// Mesh-like object with geometry data
    #[default]
    Geometric,
    /// Lights, cameras, empties and anything else
    Other,
}

impl EntityKind {
    /// Whether this kind is eligible for bake operations
    pub fn is_geometric(self) -> bool {
        matches!(self, EntityKind::Geometric)
    }
}

/// A named scene object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub(crate) name: String,
    pub(crate) payload: Option<PayloadId>,
    pub(crate) kind: EntityKind,
}

impl Entity {
    pub(crate) fn new(name: String, kind: EntityKind, payload: Option<PayloadId>) -> Self {
        Self { name, payload, kind }
    }

    /// Current name, unique within its store
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attached payload, if any
    pub fn payload(&self) -> Option<PayloadId> {
        self.payload
    }

    /// Entity classification
    pub fn kind(&self) -> EntityKind {
        self.kind
    }
}

/// A data block attached to one or more entities (mesh data, typically)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    pub(crate) name: String,
    pub(crate) locked: bool,
}

impl Payload {
    /// Current name, unique among payloads of its store
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Locked payloads are linked from an external library and cannot be copied
    pub fn is_locked(&self) -> bool {
        self.locked
    }
}
