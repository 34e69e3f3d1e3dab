//! Named groups of entities and the single-managed-owner move
//!
//! A group holds identity links to entities, never their data. An entity may
//! sit in any number of groups, but [`GroupRegistry::move_exclusive`] leaves
//! it in exactly one.

use super::entity::EntityId;
use crate::foundation::collections::{NamedMap, OrderedSet};

/// Group registry errors
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GroupError {
    /// No group with this name
    #[error("Unknown group: {0}")]
    UnknownGroup(String),

    /// Entity is not linked to the group
    #[error("Entity {entity:?} is not a member of group '{group}'")]
    NotAMember {
        /// Group name
        group: String,
        /// Entity that was expected in the group
        entity: EntityId,
    },

    /// Group still has members
    #[error("Group '{group}' still has {members} member(s)")]
    GroupNotEmpty {
        /// Group name
        group: String,
        /// Remaining member count
        members: usize,
    },
}

/// A named, insertion-ordered set of entity links
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    name: String,
    members: OrderedSet<EntityId>,
}

impl Group {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            members: OrderedSet::new(),
        }
    }

    /// Group name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Members in link order
    pub fn members(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.members.iter().copied()
    }

    /// Whether the entity is linked to this group
    pub fn contains(&self, entity: EntityId) -> bool {
        self.members.contains(&entity)
    }

    /// Number of members
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the group has no members
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Result of a best-effort exclusive move
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveOutcome {
    /// The entity was newly linked to the target
    pub linked: bool,
    /// Other groups the entity was removed from
    pub unlinked: usize,
    /// Expected memberships that turned out not to exist
    pub stale: usize,
}

impl MoveOutcome {
    /// Whether every expected membership was found
    pub fn is_clean(&self) -> bool {
        self.stale == 0
    }
}

/// Registry of all groups, keyed by unique name
#[derive(Debug, Default, Clone)]
pub struct GroupRegistry {
    groups: NamedMap<Group>,
}

impl GroupRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of groups
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether there are no groups
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Whether a group with this name exists
    pub fn contains(&self, name: &str) -> bool {
        self.groups.contains_key(name)
    }

    /// Look up a group
    pub fn get(&self, name: &str) -> Option<&Group> {
        self.groups.get(name)
    }

    /// Group names in creation order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// Groups in creation order
    pub fn iter(&self) -> impl Iterator<Item = &Group> {
        self.groups.values()
    }

    /// Return the named group, creating an empty one on first reference
    pub fn get_or_create(&mut self, name: &str) -> &Group {
        self.ensure(name)
    }

    fn ensure(&mut self, name: &str) -> &mut Group {
        if !self.groups.contains_key(name) {
            log::debug!("Creating group '{}'", name);
        }
        self.groups
            .entry(name.to_string())
            .or_insert_with(|| Group::new(name))
    }

    /// Names of every group the entity is linked to
    pub fn groups_of(&self, entity: EntityId) -> Vec<String> {
        self.groups
            .values()
            .filter(|group| group.contains(entity))
            .map(|group| group.name.clone())
            .collect()
    }

    /// Link an entity to an existing group; returns `false` if already linked
    pub fn link(&mut self, group: &str, entity: EntityId) -> Result<bool, GroupError> {
        let group = self
            .groups
            .get_mut(group)
            .ok_or_else(|| GroupError::UnknownGroup(group.to_string()))?;
        Ok(group.members.insert(entity))
    }

    /// Unlink an entity from a group
    pub fn unlink(&mut self, group: &str, entity: EntityId) -> Result<(), GroupError> {
        let found = self
            .groups
            .get_mut(group)
            .ok_or_else(|| GroupError::UnknownGroup(group.to_string()))?;
        if found.members.shift_remove(&entity) {
            Ok(())
        } else {
            Err(GroupError::NotAMember {
                group: group.to_string(),
                entity,
            })
        }
    }

    /// Make `target` the only group holding `entity`
    ///
    /// The target is created if missing. Memberships are read once before any
    /// mutation; see [`GroupRegistry::move_exclusive_from`].
    pub fn move_exclusive(&mut self, entity: EntityId, target: &str) -> MoveOutcome {
        let memberships = self.groups_of(entity);
        self.move_exclusive_from(entity, target, memberships)
    }

    /// Make `target` the only group holding `entity`, given the groups the
    /// caller believes it belongs to
    ///
    /// `memberships` may be stale (a host's membership list read earlier).
    /// Entries naming the target are skipped. Unlink failures are swallowed,
    /// logged, and counted in [`MoveOutcome::stale`]; the entity still ends up
    /// linked to `target`.
    pub fn move_exclusive_from<I, S>(&mut self, entity: EntityId, target: &str, memberships: I) -> MoveOutcome
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut outcome = MoveOutcome {
            linked: self.ensure(target).members.insert(entity),
            ..MoveOutcome::default()
        };

        for group in memberships {
            let group = group.as_ref();
            if group == target {
                continue;
            }
            match self.unlink(group, entity) {
                Ok(()) => outcome.unlinked += 1,
                Err(err) => {
                    log::debug!("Ignoring stale membership: {}", err);
                    outcome.stale += 1;
                }
            }
        }

        outcome
    }

    /// Remove a group by name, only if it exists and is empty
    ///
    /// Returns whether a group was removed; non-empty and unknown groups are
    /// left alone.
    pub fn remove(&mut self, name: &str) -> bool {
        match self.try_remove(name) {
            Ok(_) => true,
            Err(err) => {
                log::debug!("Not removing group: {}", err);
                false
            }
        }
    }

    /// Remove an empty group, reporting why removal was refused
    pub fn try_remove(&mut self, name: &str) -> Result<Group, GroupError> {
        let group = self
            .groups
            .get(name)
            .ok_or_else(|| GroupError::UnknownGroup(name.to_string()))?;
        if !group.is_empty() {
            return Err(GroupError::GroupNotEmpty {
                group: name.to_string(),
                members: group.len(),
            });
        }
        self.groups
            .shift_remove(name)
            .ok_or_else(|| GroupError::UnknownGroup(name.to_string()))
    }
}
