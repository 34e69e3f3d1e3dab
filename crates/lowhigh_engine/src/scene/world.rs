//! Entity store contract and the in-memory store
//!
//! The engine never owns scene objects; it reads and renames them through
//! [`EntityStore`]. [`World`] is the in-memory implementation used by the
//! command-line tool and by tests. It behaves like a host scene: names are
//! kept unique by appending `.001`, `.002`, ... and copies share their
//! source's payload until the payload itself is copied.

use std::collections::HashMap;

use super::entity::{Entity, EntityId, EntityKind, Payload, PayloadId};
use crate::foundation::collections::HandleMap;

/// Entity store errors
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No entity with this id
    #[error("Unknown entity: {0:?}")]
    UnknownEntity(EntityId),

    /// No payload with this id
    #[error("Unknown payload: {0:?}")]
    UnknownPayload(PayloadId),

    /// Payload is linked from a library and cannot be copied
    #[error("Payload '{0}' is locked")]
    PayloadLocked(String),
}

/// Minimal contract of a host entity store
pub trait EntityStore {
    /// All entity ids in store order
    fn entity_ids(&self) -> Vec<EntityId>;

    /// Look up an entity
    fn entity(&self, id: EntityId) -> Option<&Entity>;

    /// Resolve an entity by its exact name
    fn find_by_name(&self, name: &str) -> Option<EntityId>;

    /// Look up a payload
    fn payload(&self, id: PayloadId) -> Option<&Payload>;

    /// Rename an entity; returns the name actually assigned
    fn rename_entity(&mut self, id: EntityId, desired: &str) -> Result<String, StoreError>;

    /// Rename a payload; returns the name actually assigned
    fn rename_payload(&mut self, id: PayloadId, desired: &str) -> Result<String, StoreError>;

    /// Structural copy of an entity, sharing the source payload
    fn copy_entity(&mut self, id: EntityId) -> Result<EntityId, StoreError>;

    /// Copy a payload data block
    fn copy_payload(&mut self, id: PayloadId) -> Result<PayloadId, StoreError>;

    /// Attach or detach an entity's payload
    fn set_payload(&mut self, id: EntityId, payload: Option<PayloadId>) -> Result<(), StoreError>;

    /// Number of entities
    fn len(&self) -> usize;

    /// Whether the store holds no entities
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory entity store
#[derive(Debug, Default, Clone)]
pub struct World {
    entities: HandleMap<EntityId, Entity>,
    payloads: HandleMap<PayloadId, Payload>,
    order: Vec<EntityId>,
    entity_names: HashMap<String, EntityId>,
    payload_names: HashMap<String, PayloadId>,
}

impl World {
    /// Create a new empty world
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a payload data block; the name is made unique if needed
    pub fn create_payload(&mut self, name: &str, locked: bool) -> PayloadId {
        let name = unique_name(name, |candidate| self.payload_names.contains_key(candidate));
        let id = self.payloads.insert(Payload { name: name.clone(), locked });
        self.payload_names.insert(name, id);
        id
    }

    /// Create an entity; the name is made unique if needed
    pub fn spawn(&mut self, name: &str, kind: EntityKind, payload: Option<PayloadId>) -> EntityId {
        let name = unique_name(name, |candidate| self.entity_names.contains_key(candidate));
        let id = self.entities.insert(Entity::new(name.clone(), kind, payload));
        self.entity_names.insert(name, id);
        self.order.push(id);
        id
    }

    /// Create a geometric entity with its own payload of the same name
    pub fn spawn_mesh(&mut self, name: &str) -> EntityId {
        let payload = self.create_payload(name, false);
        self.spawn(name, EntityKind::Geometric, Some(payload))
    }

    /// Resolve a payload by its exact name
    pub fn find_payload_by_name(&self, name: &str) -> Option<PayloadId> {
        self.payload_names.get(name).copied()
    }

    /// Iterate entities in store order
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.order
            .iter()
            .filter_map(move |&id| self.entities.get(id).map(|entity| (id, entity)))
    }

    /// Name of an entity's payload, if it has one
    pub fn payload_name_of(&self, id: EntityId) -> Option<&str> {
        let payload = self.entities.get(id)?.payload?;
        self.payloads.get(payload).map(Payload::name)
    }

    /// Number of payload data blocks
    pub fn payload_count(&self) -> usize {
        self.payloads.len()
    }
}

impl EntityStore for World {
    fn entity_ids(&self) -> Vec<EntityId> {
        self.order.clone()
    }

    fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id)
    }

    fn find_by_name(&self, name: &str) -> Option<EntityId> {
        self.entity_names.get(name).copied()
    }

    fn payload(&self, id: PayloadId) -> Option<&Payload> {
        self.payloads.get(id)
    }

    fn rename_entity(&mut self, id: EntityId, desired: &str) -> Result<String, StoreError> {
        let current = self.entities.get(id).ok_or(StoreError::UnknownEntity(id))?.name.clone();
        if current == desired {
            return Ok(current);
        }
        let name = unique_name(desired, |candidate| {
            self.entity_names.get(candidate).is_some_and(|&owner| owner != id)
        });
        self.entity_names.remove(&current);
        self.entity_names.insert(name.clone(), id);
        if let Some(entity) = self.entities.get_mut(id) {
            entity.name.clone_from(&name);
        }
        Ok(name)
    }

    fn rename_payload(&mut self, id: PayloadId, desired: &str) -> Result<String, StoreError> {
        let current = self.payloads.get(id).ok_or(StoreError::UnknownPayload(id))?.name.clone();
        if current == desired {
            return Ok(current);
        }
        let name = unique_name(desired, |candidate| {
            self.payload_names.get(candidate).is_some_and(|&owner| owner != id)
        });
        self.payload_names.remove(&current);
        self.payload_names.insert(name.clone(), id);
        if let Some(payload) = self.payloads.get_mut(id) {
            payload.name.clone_from(&name);
        }
        Ok(name)
    }

    fn copy_entity(&mut self, id: EntityId) -> Result<EntityId, StoreError> {
        let source = self.entities.get(id).ok_or(StoreError::UnknownEntity(id))?.clone();
        Ok(self.spawn(&source.name, source.kind, source.payload))
    }

    fn copy_payload(&mut self, id: PayloadId) -> Result<PayloadId, StoreError> {
        let source = self.payloads.get(id).ok_or(StoreError::UnknownPayload(id))?;
        if source.locked {
            return Err(StoreError::PayloadLocked(source.name.clone()));
        }
        let name = source.name.clone();
        Ok(self.create_payload(&name, false))
    }

    fn set_payload(&mut self, id: EntityId, payload: Option<PayloadId>) -> Result<(), StoreError> {
        if let Some(payload) = payload {
            if !self.payloads.contains_key(payload) {
                return Err(StoreError::UnknownPayload(payload));
            }
        }
        let entity = self.entities.get_mut(id).ok_or(StoreError::UnknownEntity(id))?;
        entity.payload = payload;
        Ok(())
    }

    fn len(&self) -> usize {
        self.order.len()
    }
}

/// First free name among `desired`, `stem.001`, `stem.002`, ...
///
/// A numeric `.NNN` tail already present on `desired` is replaced rather than
/// extended, so copying `Rock.001` yields `Rock.002`.
fn unique_name(desired: &str, is_taken: impl Fn(&str) -> bool) -> String {
    if !is_taken(desired) {
        return desired.to_string();
    }
    let stem = numbered_stem(desired);
    (1u32..)
        .map(|n| format!("{stem}.{n:03}"))
        .find(|candidate| !is_taken(candidate))
        .unwrap_or_else(|| desired.to_string())
}

fn numbered_stem(name: &str) -> &str {
    match name.rsplit_once('.') {
        Some((stem, digits))
            if !stem.is_empty() && !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) =>
        {
            stem
        }
        _ => name,
    }
}
