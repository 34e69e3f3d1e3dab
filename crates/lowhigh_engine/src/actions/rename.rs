//! Suffix renaming of an entity and its payload

use crate::naming::{compose, derived_payload_name, NameNormalizer, Suffix};
use crate::scene::{EntityId, EntityStore, StoreError};

/// Rename an entity to `base + "_" + suffix`, and its payload to match
///
/// Returns the name the store assigned.
pub fn rename_with_suffix<S: EntityStore>(
    world: &mut S,
    entity: EntityId,
    normalizer: &NameNormalizer,
    suffix: &Suffix,
) -> Result<String, StoreError> {
    let current = world.entity(entity).ok_or(StoreError::UnknownEntity(entity))?;
    let base = normalizer.extended(suffix.as_str()).base_name(current.name()).to_string();
    let payload = current.payload();

    let name = world.rename_entity(entity, &compose(&base, suffix.as_str()))?;
    if let Some(payload) = payload {
        world.rename_payload(payload, &derived_payload_name(&name))?;
    }
    Ok(name)
}

/// Rename an entity to its base name, and its payload to `base + "_mesh"`
pub fn rename_to_base<S: EntityStore>(
    world: &mut S,
    entity: EntityId,
    normalizer: &NameNormalizer,
) -> Result<String, StoreError> {
    let current = world.entity(entity).ok_or(StoreError::UnknownEntity(entity))?;
    let base = normalizer.base_name(current.name()).to_string();
    let payload = current.payload();

    let name = world.rename_entity(entity, &base)?;
    if let Some(payload) = payload {
        world.rename_payload(payload, &derived_payload_name(&name))?;
    }
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::World;

    #[test]
    fn test_add_suffix_renames_payload() {
        let mut world = World::new();
        let rock = world.spawn_mesh("Rock");

        let name = rename_with_suffix(&mut world, rock, &NameNormalizer::default(), &Suffix::new("_low").unwrap()).unwrap();

        assert_eq!(name, "Rock_low");
        assert_eq!(world.payload_name_of(rock), Some("Rock_low_mesh"));
    }

    #[test]
    fn test_add_suffix_replaces_other_role() {
        let mut world = World::new();
        let rock = world.spawn_mesh("Rock_low");
        let suffix = Suffix::new("high").unwrap();

        rename_with_suffix(&mut world, rock, &NameNormalizer::default(), &suffix).unwrap();
        let again = rename_with_suffix(&mut world, rock, &NameNormalizer::default(), &suffix).unwrap();

        assert_eq!(again, "Rock_high");
    }

    #[test]
    fn test_remove_suffix() {
        let mut world = World::new();
        let rock = world.spawn_mesh("Rock_LP");
        let normalizer = NameNormalizer::new(["lp", "hp"]);

        let name = rename_to_base(&mut world, rock, &normalizer).unwrap();

        assert_eq!(name, "Rock");
        assert_eq!(world.payload_name_of(rock), Some("Rock_mesh"));
    }
}
