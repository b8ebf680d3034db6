//! Player state: inventory, score, and the move counter. The session is the
//! only caller that mutates any of these, and nothing here touches state
//! outside the player's own fields.

use serde::{Deserialize, Serialize};

/// The player. Inventory entries are canonical item names in acquisition
/// order; the item records themselves live in the registry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    inventory: Vec<String>,
    score: u32,
    moves_made: u32,
}

impl Player {
    pub fn new() -> Self {
        Self::default()
    }

    /// Items currently held, in the order they were acquired.
    pub fn inventory(&self) -> &[String] {
        &self.inventory
    }

    /// Score so far. Non-decreasing over the life of a session.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Successful movement commands so far. Non-decreasing.
    pub fn moves_made(&self) -> u32 {
        self.moves_made
    }

    pub fn add_item(&mut self, name: &str) {
        self.inventory.push(name.to_string());
    }

    /// Remove an item by name (case-insensitive) and return its canonical
    /// name, or `None` if it is not held.
    pub fn remove_item(&mut self, name: &str) -> Option<String> {
        let index = self
            .inventory
            .iter()
            .position(|held| held.eq_ignore_ascii_case(name))?;
        Some(self.inventory.remove(index))
    }

    pub fn has_item(&self, name: &str) -> bool {
        self.inventory
            .iter()
            .any(|held| held.eq_ignore_ascii_case(name))
    }

    pub fn add_score(&mut self, points: u32) {
        self.score += points;
    }

    pub fn increment_moves(&mut self) {
        self.moves_made += 1;
    }
}
