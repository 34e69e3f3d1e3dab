//! Scene state owned by the caller for the duration of a session

use super::entity::EntityId;
use super::groups::GroupRegistry;
use super::world::{EntityStore, StoreError, World};

/// An entity store together with its group registry
///
/// Every engine operation receives the scene explicitly; there is no
/// process-wide scene. Exclusive access is expressed through `&mut Scene`.
#[derive(Debug, Default, Clone)]
pub struct Scene<S = World> {
    /// Entity store
    pub world: S,
    /// Groups of entity links
    pub groups: GroupRegistry,
}

impl<S: EntityStore> Scene<S> {
    /// Wrap an existing store with an empty group registry
    pub fn new(world: S) -> Self {
        Self {
            world,
            groups: GroupRegistry::new(),
        }
    }

    /// Copy an entity the way a host does
    ///
    /// The copy shares the source payload and is linked into every group the
    /// source belongs to.
    pub fn copy_entity(&mut self, source: EntityId) -> Result<EntityId, StoreError> {
        let copy = self.world.copy_entity(source)?;
        for group in self.groups.groups_of(source) {
            if let Err(err) = self.groups.link(&group, copy) {
                log::debug!("Copy not linked to '{}': {}", group, err);
            }
        }
        Ok(copy)
    }

    /// Resolve entity names, returning found ids and the names that did not resolve
    pub fn resolve_names<I, N>(&self, names: I) -> (Vec<EntityId>, Vec<String>)
    where
        I: IntoIterator<Item = N>,
        N: AsRef<str>,
    {
        let mut found = Vec::new();
        let mut missing = Vec::new();
        for name in names {
            let name = name.as_ref();
            match self.world.find_by_name(name) {
                Some(id) => found.push(id),
                None => missing.push(name.to_string()),
            }
        }
        (found, missing)
    }

    /// Entity name, or an empty string for unknown ids
    pub fn name_of(&self, id: EntityId) -> &str {
        self.world.entity(id).map_or("", |entity| entity.name())
    }
}
