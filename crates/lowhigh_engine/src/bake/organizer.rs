//! Bake-group assignment for matched pairs

use super::pairs::Pair;
use crate::core::config::GroupNames;
use crate::scene::GroupRegistry;

/// Moves matched pairs into bake groups
#[derive(Debug, Clone)]
pub struct BakeGroupOrganizer {
    names: GroupNames,
}

impl BakeGroupOrganizer {
    /// Organizer using the reserved names `Bake_Pairs` and `Bake_<base>`
    pub fn new() -> Self {
        Self::from_names(&GroupNames::default())
    }

    /// Organizer using configured reserved names
    pub fn from_names(names: &GroupNames) -> Self {
        Self { names: names.clone() }
    }

    /// Group a pair is assigned to under the given policy
    pub fn group_name_for(&self, pair: &Pair, use_common_group: bool) -> String {
        if use_common_group {
            self.names.common_bake.clone()
        } else {
            self.names.bake_group_for(&pair.base_name)
        }
    }

    /// Move both members of every pair exclusively into its bake group
    ///
    /// Returns the number of pairs processed. Safe to repeat: members already
    /// in place are not linked twice.
    pub fn organize(&self, groups: &mut GroupRegistry, pairs: &[Pair], use_common_group: bool) -> usize {
        let mut stale = 0;
        for pair in pairs {
            let group = self.group_name_for(pair, use_common_group);
            for member in [pair.low, pair.high] {
                stale += groups.move_exclusive(member, &group).stale;
            }
        }
        if stale > 0 {
            log::warn!("Ignored {} stale group membership(s) while organizing", stale);
        }
        log::debug!("Organized {} pair(s)", pairs.len());
        pairs.len()
    }
}

impl Default for BakeGroupOrganizer {
    fn default() -> Self {
        Self::new()
    }
}
