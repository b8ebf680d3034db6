//! Item definitions and live placements. Lookup is case-insensitive and
//! whitespace-normalized; placement here is the source of truth that the
//! session keeps consistent with location item sets and the inventory.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::game::types::{Item, Placement};

/// Normalize a name for lookup: lowercase, trimmed, inner whitespace
/// collapsed to single spaces.
fn normalize_name(name: &str) -> String {
    name.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemRegistry {
    items: BTreeMap<String, Item>,
}

impl ItemRegistry {
    /// Build the registry from already-validated item records.
    pub fn new(items: Vec<Item>) -> Self {
        Self {
            items: items
                .into_iter()
                .map(|item| (normalize_name(&item.name), item))
                .collect(),
        }
    }

    /// Case-insensitive lookup by name. `None` means no such item is
    /// defined anywhere in the game.
    pub fn find(&self, name: &str) -> Option<&Item> {
        self.items.get(&normalize_name(name))
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut Item> {
        self.items.get_mut(&normalize_name(name))
    }

    /// Update an item's placement. Unknown names are ignored.
    pub fn set_placement(&mut self, name: &str, placement: Placement) {
        if let Some(item) = self.find_mut(name) {
            item.placement = placement;
        }
    }

    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::types::LocationId;

    fn registry_with_mug() -> ItemRegistry {
        ItemRegistry::new(vec![Item::new(
            "Lucky Mug",
            "A chipped mug.",
            Some(LocationId(9)),
            LocationId(10),
        )])
    }

    #[test]
    fn find_is_case_insensitive_and_whitespace_tolerant() {
        let registry = registry_with_mug();
        assert!(registry.find("lucky mug").is_some());
        assert!(registry.find("  LUCKY   MUG ").is_some());
        assert!(registry.find("unlucky mug").is_none());
    }

    #[test]
    fn placement_updates_are_visible_through_find() {
        let mut registry = registry_with_mug();
        registry.set_placement("lucky mug", Placement::Held);
        assert_eq!(registry.find("Lucky Mug").unwrap().placement, Placement::Held);
    }
}
