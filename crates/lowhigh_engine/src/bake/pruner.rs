//! Removal of empty bake groups

use crate::scene::GroupRegistry;

/// Remove every empty group whose name starts with `reserved_prefix`
///
/// Group names are snapshotted before any removal. Returns the number of
/// groups removed.
pub fn prune_empty(groups: &mut GroupRegistry, reserved_prefix: &str) -> usize {
    let candidates: Vec<String> = groups
        .iter()
        .filter(|group| group.name().starts_with(reserved_prefix) && group.is_empty())
        .map(|group| group.name().to_string())
        .collect();

    let mut removed = 0;
    for name in candidates {
        if groups.remove(&name) {
            log::debug!("Removed empty group '{}'", name);
            removed += 1;
        }
    }
    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{EntityKind, World};

    #[test]
    fn test_prunes_only_empty_prefixed_groups() {
        let mut world = World::new();
        let tree = world.spawn("Tree_low", EntityKind::Geometric, None);
        let mut groups = GroupRegistry::new();
        groups.get_or_create("Bake_Rock");
        groups.get_or_create("Bake_Tree");
        groups.get_or_create("Other");
        groups.link("Bake_Tree", tree).unwrap();

        assert_eq!(prune_empty(&mut groups, "Bake_"), 1);
        assert_eq!(groups.names().collect::<Vec<_>>(), ["Bake_Tree", "Other"]);
    }

    #[test]
    fn test_adjacent_empty_groups_all_removed() {
        let mut groups = GroupRegistry::new();
        for name in ["Bake_A", "Bake_B", "Bake_C"] {
            groups.get_or_create(name);
        }

        assert_eq!(prune_empty(&mut groups, "Bake_"), 3);
        assert!(groups.is_empty());
        assert_eq!(prune_empty(&mut groups, "Bake_"), 0);
    }
}
