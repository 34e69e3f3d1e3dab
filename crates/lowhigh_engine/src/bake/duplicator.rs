//! Convention-tagged duplication
//!
//! A duplicate is renamed `base + "_" + suffix` and ends up linked to exactly
//! one group, whatever links the copy inherited from its source.

use crate::core::config::NamingConfig;
use crate::naming::{compose, derived_payload_name, NameNormalizer, Suffix};
use crate::scene::{EntityId, EntityStore, MoveOutcome, PayloadId, Scene, StoreError};

/// Duplication errors
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DuplicateError {
    /// Source entity is not in the store
    #[error("Unknown source entity: {0:?}")]
    UnknownEntity(EntityId),

    /// The store refused a step on the fresh copy
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// A freshly created duplicate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Duplicate {
    /// Source entity
    pub source: EntityId,
    /// The copy
    pub entity: EntityId,
    /// Name assigned to the copy
    pub name: String,
    /// Whether the source payload was copied (`false` also when there was none)
    pub payload_cloned: bool,
    /// Membership changes made while isolating the copy in its group
    pub membership: MoveOutcome,
}

/// Outcome of duplicating a selection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DuplicateBatch {
    /// Copies that were created
    pub created: Vec<Duplicate>,
    /// Sources that could not be copied
    pub failed: Vec<(EntityId, DuplicateError)>,
}

/// Creates suffixed copies of entities inside a target group
#[derive(Debug, Clone, Default)]
pub struct EntityDuplicator {
    normalizer: NameNormalizer,
}

impl EntityDuplicator {
    /// Duplicator that strips the given normalizer's tokens from source names
    pub fn new(normalizer: NameNormalizer) -> Self {
        Self { normalizer }
    }

    /// Duplicator for the configured LOW/HIGH suffixes
    pub fn from_config(config: &NamingConfig) -> Self {
        Self::new(NameNormalizer::from_config(config))
    }

    /// Duplicate `source` into `target_group` with `suffix`
    ///
    /// Steps: copy the entity (inheriting the source's groups), make
    /// `target_group` its only group, copy the payload, rename. Only an
    /// unknown source is an error. Once the copy exists, a failing later
    /// step is a warning and the copy is still returned: a payload that
    /// cannot be copied or attached leaves the duplicate without its own
    /// payload, and a refused rename keeps the name the store gave it.
    pub fn duplicate<S: EntityStore>(
        &self,
        scene: &mut Scene<S>,
        source: EntityId,
        suffix: &Suffix,
        target_group: &str,
    ) -> Result<Duplicate, DuplicateError> {
        let source_entity = scene
            .world
            .entity(source)
            .ok_or(DuplicateError::UnknownEntity(source))?;
        let source_name = source_entity.name().to_string();
        let source_payload = source_entity.payload();

        let copy = scene.copy_entity(source)?;
        let membership = scene.groups.move_exclusive(copy, target_group);

        let payload = source_payload.and_then(|payload| attach_payload_copy(&mut scene.world, copy, payload, &source_name));

        let base = self.normalizer.extended(suffix.as_str()).base_name(&source_name).to_string();
        let name = match scene.world.rename_entity(copy, &compose(&base, suffix.as_str())) {
            Ok(name) => name,
            Err(err) => {
                log::warn!("Could not rename copy of '{}': {}", source_name, err);
                scene.name_of(copy).to_string()
            }
        };
        if let Some(payload) = payload {
            if let Err(err) = scene.world.rename_payload(payload, &derived_payload_name(&name)) {
                log::warn!("Could not rename payload of '{}': {}", name, err);
            }
        }

        log::debug!("Duplicated '{}' as '{}' into '{}'", source_name, name, target_group);

        Ok(Duplicate {
            source,
            entity: copy,
            name,
            payload_cloned: payload.is_some(),
            membership,
        })
    }

    /// Duplicate every entity of a selection
    ///
    /// Each source is handled independently; a failure is recorded and the
    /// batch continues.
    pub fn duplicate_all<S: EntityStore>(
        &self,
        scene: &mut Scene<S>,
        selection: &[EntityId],
        suffix: &Suffix,
        target_group: &str,
    ) -> DuplicateBatch {
        let mut batch = DuplicateBatch::default();
        for &source in selection {
            match self.duplicate(scene, source, suffix, target_group) {
                Ok(duplicate) => batch.created.push(duplicate),
                Err(err) => {
                    log::warn!("Skipping duplicate of {:?}: {}", source, err);
                    batch.failed.push((source, err));
                }
            }
        }
        batch
    }
}

/// Give `copy` its own copy of `payload`, returning it when attached
///
/// On failure the copy is detached from the shared payload where possible;
/// either way nothing the source owns is renamed afterwards.
fn attach_payload_copy<S: EntityStore>(
    world: &mut S,
    copy: EntityId,
    payload: PayloadId,
    source_name: &str,
) -> Option<PayloadId> {
    let cloned = match world.copy_payload(payload) {
        Ok(cloned) => Some(cloned),
        Err(err) => {
            log::warn!(
                "Could not copy payload of '{}' ({}); the duplicate has no payload",
                source_name, err
            );
            None
        }
    };
    if let Err(err) = world.set_payload(copy, cloned) {
        log::warn!("Could not attach payload to the copy of '{}': {}", source_name, err);
        return None;
    }
    cloned
}
