//! Serializable snapshot of a scene
//!
//! Snapshots are how the command-line tool exchanges scenes with a host:
//! entity names, kinds, payload names and group links, in store order.
//! Entities naming the same payload share one payload data block.

use serde::{Serialize, Deserialize};
use std::path::Path;

use super::entity::{EntityKind, PayloadId};
use super::state::Scene;
use super::world::{EntityStore, World};
use crate::config::{read_document, write_document, ConfigError};

/// Snapshot errors
#[derive(thiserror::Error, Debug)]
pub enum SnapshotError {
    /// Reading or writing the document failed
    #[error(transparent)]
    Document(#[from] ConfigError),

    /// Two entities share a name
    #[error("Duplicate entity name in snapshot: {0}")]
    DuplicateEntity(String),

    /// Records naming the same payload disagree on whether it is locked
    #[error("Payload '{0}' is listed both locked and unlocked")]
    ConflictingPayload(String),
}

/// Payload entry of a snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayloadRecord {
    /// Payload name
    pub name: String,
    /// Linked from a library; cannot be copied
    #[serde(default)]
    pub locked: bool,
}

/// Entity entry of a snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRecord {
    /// Entity name
    pub name: String,
    /// Entity classification
    #[serde(default)]
    pub kind: EntityKind,
    /// Groups the entity is linked to
    #[serde(default)]
    pub groups: Vec<String>,
    /// Attached payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<PayloadRecord>,
}

/// Whole-scene snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneSnapshot {
    /// Groups in creation order, including empty ones
    #[serde(default)]
    pub groups: Vec<String>,
    /// Entities in store order
    #[serde(default)]
    pub entities: Vec<EntityRecord>,
}

impl SceneSnapshot {
    /// Load a snapshot from a `.toml` or `.ron` file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        Ok(read_document(path)?)
    }

    /// Save a snapshot to a `.toml` or `.ron` file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SnapshotError> {
        Ok(write_document(self, path)?)
    }
}

impl Scene<World> {
    /// Build a scene from a snapshot
    ///
    /// Groups referenced only by entities are created after the listed ones.
    pub fn from_snapshot(snapshot: &SceneSnapshot) -> Result<Self, SnapshotError> {
        let mut scene = Scene::new(World::new());
        for group in &snapshot.groups {
            scene.groups.get_or_create(group);
        }

        for record in &snapshot.entities {
            if scene.world.find_by_name(&record.name).is_some() {
                return Err(SnapshotError::DuplicateEntity(record.name.clone()));
            }
            let payload = match &record.payload {
                Some(payload) => Some(scene.shared_payload(payload)?),
                None => None,
            };
            let id = scene.world.spawn(&record.name, record.kind, payload);
            for group in &record.groups {
                scene.groups.get_or_create(group);
                if let Err(err) = scene.groups.link(group, id) {
                    log::debug!("Snapshot link skipped: {}", err);
                }
            }
        }

        Ok(scene)
    }

    /// Payload named by a record, created on first mention
    fn shared_payload(&mut self, record: &PayloadRecord) -> Result<PayloadId, SnapshotError> {
        let Some(existing) = self.world.find_payload_by_name(&record.name) else {
            return Ok(self.world.create_payload(&record.name, record.locked));
        };
        if self.world.payload(existing).is_some_and(|payload| payload.is_locked() != record.locked) {
            return Err(SnapshotError::ConflictingPayload(record.name.clone()));
        }
        Ok(existing)
    }

    /// Capture the scene as a snapshot
    pub fn snapshot(&self) -> SceneSnapshot {
        let entities = self
            .world
            .iter()
            .map(|(id, entity)| EntityRecord {
                name: entity.name().to_string(),
                kind: entity.kind(),
                groups: self.groups.groups_of(id),
                payload: entity
                    .payload()
                    .and_then(|payload| self.world.payload(payload))
                    .map(|payload| PayloadRecord {
                        name: payload.name().to_string(),
                        locked: payload.is_locked(),
                    }),
            })
            .collect();

        SceneSnapshot {
            groups: self.groups.names().map(str::to_string).collect(),
            entities,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SceneSnapshot {
        SceneSnapshot {
            groups: vec!["Bake_Empty".to_string()],
            entities: vec![
                EntityRecord {
                    name: "Rock".to_string(),
                    kind: EntityKind::Geometric,
                    groups: vec!["Props".to_string()],
                    payload: Some(PayloadRecord { name: "RockMesh".to_string(), locked: false }),
                },
                EntityRecord {
                    name: "Rock_instance".to_string(),
                    kind: EntityKind::Geometric,
                    groups: vec![],
                    payload: Some(PayloadRecord { name: "RockMesh".to_string(), locked: false }),
                },
                EntityRecord {
                    name: "Sun".to_string(),
                    kind: EntityKind::Other,
                    groups: vec!["Props".to_string(), "Lights".to_string()],
                    payload: None,
                },
            ],
        }
    }

    #[test]
    fn test_snapshot_round_trip() {
        let snapshot = sample();
        let scene = Scene::from_snapshot(&snapshot).unwrap();

        let mut expected = snapshot;
        expected.groups = vec!["Bake_Empty".to_string(), "Props".to_string(), "Lights".to_string()];
        assert_eq!(scene.snapshot(), expected);
    }

    #[test]
    fn test_shared_payload_names_share_one_block() {
        let scene = Scene::from_snapshot(&sample()).unwrap();

        assert_eq!(scene.world.payload_count(), 1);
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let mut snapshot = sample();
        snapshot.entities[1].name = "Rock".to_string();

        assert!(matches!(
            Scene::from_snapshot(&snapshot),
            Err(SnapshotError::DuplicateEntity(name)) if name == "Rock"
        ));
    }

    #[test]
    fn test_conflicting_payload_lock_rejected() {
        let mut snapshot = sample();
        if let Some(payload) = snapshot.entities[1].payload.as_mut() {
            payload.locked = true;
        }

        assert!(matches!(
            Scene::from_snapshot(&snapshot),
            Err(SnapshotError::ConflictingPayload(name)) if name == "RockMesh"
        ));
    }

    #[test]
    fn test_locked_shared_payload_kept_locked() {
        let mut snapshot = sample();
        for record in &mut snapshot.entities {
            if let Some(payload) = record.payload.as_mut() {
                payload.locked = true;
            }
        }

        let scene = Scene::from_snapshot(&snapshot).unwrap();

        assert_eq!(scene.world.payload_count(), 1);
        assert!(scene.snapshot().entities.iter().all(|record| {
            record.payload.as_ref().map_or(true, |payload| payload.locked)
        }));
    }
}
