//! LOW/HIGH pair detection
//!
//! Entities are grouped by base name; within each group one LOW and one HIGH
//! candidate are chosen. Grouping keeps first-seen order, so the pairs come
//! out in the order their base names first appear in the input.

use crate::core::config::{NamingConfig, TieBreak};
use crate::foundation::collections::NamedMap;
use crate::naming::{ends_with_token, trim_underscores, NameNormalizer};
use crate::scene::{Entity, EntityId, EntityStore};

/// A matched LOW/HIGH couple sharing a base name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pair {
    /// Shared base name
    pub base_name: String,
    /// Low-poly member
    pub low: EntityId,
    /// High-poly member
    pub high: EntityId,
}

/// Finds LOW/HIGH pairs among entities
#[derive(Debug, Clone)]
pub struct PairMatcher {
    normalizer: NameNormalizer,
    suffix_low: String,
    suffix_high: String,
    tie_break: TieBreak,
}

impl PairMatcher {
    /// Matcher for the given suffix tokens, keeping the first candidate per role
    pub fn new(suffix_low: &str, suffix_high: &str) -> Self {
        Self {
            normalizer: NameNormalizer::new([suffix_low, suffix_high]),
            suffix_low: trim_underscores(suffix_low).to_string(),
            suffix_high: trim_underscores(suffix_high).to_string(),
            tie_break: TieBreak::FirstMatch,
        }
    }

    /// Matcher for a naming configuration, including its tie-break rule
    pub fn from_config(config: &NamingConfig) -> Self {
        Self::new(config.suffix_low(), config.suffix_high()).with_tie_break(config.tie_break)
    }

    /// Set the rule for base names with several candidates for one role
    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    /// Find pairs among `(id, entity)` items, in input order
    pub fn find_pairs<'a, I>(&self, entities: I) -> Vec<Pair>
    where
        I: IntoIterator<Item = (EntityId, &'a Entity)>,
    {
        let mut by_base: NamedMap<Vec<(EntityId, &'a str)>> = NamedMap::new();
        for (id, entity) in entities {
            let name = entity.name();
            by_base
                .entry(self.normalizer.base_name(name).to_string())
                .or_default()
                .push((id, name));
        }

        let mut pairs = Vec::new();
        for (base_name, candidates) in by_base {
            let mut low = None;
            let mut high = None;
            for (id, name) in candidates {
                // LOW is checked first; with equal suffixes an entity only ever fills LOW.
                let slot = if ends_with_token(name, &self.suffix_low) {
                    &mut low
                } else if ends_with_token(name, &self.suffix_high) {
                    &mut high
                } else {
                    continue;
                };
                self.choose(slot, id, &base_name);
            }
            if let (Some(low), Some(high)) = (low, high) {
                pairs.push(Pair { base_name, low, high });
            }
        }

        pairs
    }

    /// Find pairs among every entity of a store, in store order
    pub fn find_pairs_in<S: EntityStore>(&self, store: &S) -> Vec<Pair> {
        let ids = store.entity_ids();
        self.find_pairs(ids.into_iter().filter_map(|id| store.entity(id).map(|entity| (id, entity))))
    }

    fn choose(&self, slot: &mut Option<EntityId>, candidate: EntityId, base_name: &str) {
        match (self.tie_break, slot.as_ref()) {
            (_, None) | (TieBreak::LastMatch, Some(_)) => {
                if slot.is_some() {
                    log::debug!("Base name '{}' has several candidates; keeping the last", base_name);
                }
                *slot = Some(candidate);
            }
            (TieBreak::FirstMatch, Some(_)) => {
                log::debug!("Base name '{}' has several candidates; keeping the first", base_name);
            }
        }
    }
}

impl Default for PairMatcher {
    fn default() -> Self {
        Self::from_config(&NamingConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{EntityKind, World};

    fn world_of(names: &[&str]) -> (World, Vec<EntityId>) {
        let mut world = World::new();
        let ids = names
            .iter()
            .map(|name| world.spawn(name, EntityKind::Geometric, None))
            .collect();
        (world, ids)
    }

    #[test]
    fn test_single_pair_found() {
        let (world, ids) = world_of(&["Rock_low", "Rock_high", "Tree_low"]);

        let pairs = PairMatcher::new("low", "high").find_pairs_in(&world);

        assert_eq!(
            pairs,
            [Pair { base_name: "Rock".to_string(), low: ids[0], high: ids[1] }]
        );
    }

    #[test]
    fn test_unrelated_bases_not_merged() {
        let (world, _) = world_of(&["Rock_low", "Rock_low2_low", "Rock_low2_high"]);

        let pairs = PairMatcher::new("low", "high").find_pairs_in(&world);

        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].base_name, "Rock_low2");
    }

    #[test]
    fn test_case_insensitive_roles() {
        let (world, ids) = world_of(&["Crate_HIGH", "crate_misc", "Crate_Low"]);

        let pairs = PairMatcher::new("_low_", "HIGH").find_pairs_in(&world);

        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].low, ids[2]);
        assert_eq!(pairs[0].high, ids[0]);
    }

    #[test]
    fn test_first_match_wins_by_default() {
        let (world, ids) = world_of(&["Rock_low", "Rock_LOW_low", "Rock_high"]);

        let pairs = PairMatcher::new("low", "high").find_pairs_in(&world);

        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].low, ids[0]);
    }

    #[test]
    fn test_last_match_tie_break() {
        let (world, ids) = world_of(&["Rock_low", "Rock_LOW_low", "Rock_high"]);

        let pairs = PairMatcher::new("low", "high")
            .with_tie_break(TieBreak::LastMatch)
            .find_pairs_in(&world);

        assert_eq!(pairs[0].low, ids[1]);
        assert_eq!(pairs[0].high, ids[2]);
    }

    #[test]
    fn test_pairs_follow_first_appearance() {
        let (world, _) = world_of(&["Tree_high", "Rock_low", "Tree_low", "Rock_high"]);

        let bases: Vec<_> = PairMatcher::default()
            .find_pairs_in(&world)
            .into_iter()
            .map(|pair| pair.base_name)
            .collect();

        assert_eq!(bases, ["Tree", "Rock"]);
    }

    #[test]
    fn test_custom_suffixes() {
        let (world, ids) = world_of(&["Bolt_lp", "Bolt_hp", "Bolt"]);
        let config = NamingConfig::new("lp", "hp");

        let pairs = PairMatcher::from_config(&config).find_pairs_in(&world);

        assert_eq!(pairs, [Pair { base_name: "Bolt".to_string(), low: ids[0], high: ids[1] }]);
    }

    #[test]
    fn test_equal_suffixes_find_nothing() {
        let (world, _) = world_of(&["Rock_x", "Rock_X"]);

        assert!(PairMatcher::new("x", "x").find_pairs_in(&world).is_empty());
    }

    #[test]
    fn test_empty_input() {
        assert!(PairMatcher::default().find_pairs(std::iter::empty()).is_empty());
    }
}
