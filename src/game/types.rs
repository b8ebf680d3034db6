//! Core data model for the campus world: locations, items, transitions,
//! and the consolidated progress record that owns every one-shot flag.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Base move budget before any consumable bonus. Only successful `go`
/// commands count against it.
pub const BASE_MAX_MOVES: u32 = 28;

/// Bonus moves granted by the one-shot coffee consumable.
pub const COFFEE_BONUS_MOVES: u32 = 5;

/// Score bonus awarded when the summoning ritual fires.
pub const RITUAL_BONUS_POINTS: u32 = 50;

/// Score bonus awarded when the keypad code is entered correctly.
pub const KEYPAD_BONUS_POINTS: u32 = 20;

/// The three items that must rest together in the ritual circle.
pub const REQUIRED_ITEMS: [&str; 3] = ["USB Drive", "Laptop Charger", "Lucky Mug"];

/// Canonical name of the artifact the ritual leaves behind. Winning requires
/// this item to sit in the home location's item set.
pub const RITUAL_ARTIFACT: &str = "backup_usb";

/// Canonical name of the one-shot consumable that extends the move budget.
pub const CONSUMABLE_ITEM: &str = "Coffee";

/// Action tag carried by the keypad location's transition table.
pub const KEYPAD_ACTION: &str = "keypad";

/// Command added to the keypad location once the code is accepted.
pub const UNLOCK_COMMAND: &str = "go south";

/// Where the player starts and must return to win.
pub const HOME_LOCATION_ID: LocationId = LocationId(0);

/// The ritual circle. Drops here re-evaluate the ritual trigger.
pub const RITUAL_LOCATION_ID: LocationId = LocationId(10);

/// Destination of the edge the keypad unlocks.
pub const SERVER_ROOM_ID: LocationId = LocationId(12);

/// Unique identifier for a location. Assigned by the game data, never
/// generated at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationId(pub u32);

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One entry in a location's transition table: either a destination or a
/// tagged special action the session interprets (e.g. the keypad).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    To(LocationId),
    Action(String),
}

/// A location in the campus world. Created once at load time; the session
/// mutates only its item set, its visited flag, and (for the keypad unlock)
/// its transition table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub brief_desc: String,
    pub long_desc: String,
    pub transitions: BTreeMap<String, Transition>,
    /// Canonical item names currently physically present here.
    pub items: BTreeSet<String>,
    #[serde(default)]
    pub visited: bool,
}

impl Location {
    pub fn new(id: LocationId, brief_desc: &str, long_desc: &str) -> Self {
        Self {
            id,
            brief_desc: brief_desc.to_string(),
            long_desc: long_desc.to_string(),
            transitions: BTreeMap::new(),
            items: BTreeSet::new(),
            visited: false,
        }
    }

    /// Add a movement command leading to another location.
    pub fn with_exit(mut self, command: &str, destination: LocationId) -> Self {
        self.transitions
            .insert(command.to_string(), Transition::To(destination));
        self
    }

    /// Add a command carrying a special-action tag instead of a destination.
    pub fn with_action(mut self, command: &str, tag: &str) -> Self {
        self.transitions
            .insert(command.to_string(), Transition::Action(tag.to_string()));
        self
    }

    /// Place an item here at load time.
    pub fn with_item(mut self, name: &str) -> Self {
        self.items.insert(name.to_string());
        self
    }
}

/// Where an item currently is. The registry's placement is the source of
/// truth; location item sets and the inventory must agree with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    /// Physically present at a location.
    At(LocationId),
    /// Carried by the player.
    Held,
    /// Not in the world: either not yet spawned, or consumed/dissolved.
    Nowhere,
}

/// An item definition plus its live placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Canonical name; unique case-insensitively across the game.
    pub name: String,
    pub description: String,
    /// Starting location, or `None` for items spawned during play.
    pub origin: Option<LocationId>,
    /// Dropping the item here awards `target_points`.
    pub target: LocationId,
    pub target_points: u32,
    pub pickup_points: u32,
    pub placement: Placement,
}

impl Item {
    pub fn new(name: &str, description: &str, origin: Option<LocationId>, target: LocationId) -> Self {
        let placement = match origin {
            Some(id) => Placement::At(id),
            None => Placement::Nowhere,
        };
        Self {
            name: name.to_string(),
            description: description.to_string(),
            origin,
            target,
            target_points: 0,
            pickup_points: 0,
            placement,
        }
    }

    pub fn with_pickup_points(mut self, points: u32) -> Self {
        self.pickup_points = points;
        self
    }

    pub fn with_target_points(mut self, points: u32) -> Self {
        self.target_points = points;
        self
    }
}

/// Narrative progress. Selects which contextual message class the front end
/// shows; no effect on win or lose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GameStage {
    #[default]
    Start,
    Exploring,
    Gathering,
    ReadyRitual,
    RitualDone,
}

/// One-shot flags and the stage value, consolidated so the "fires at most
/// once" and "never regresses" invariants live in one place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Progress {
    pub stage: GameStage,
    pub server_room_unlocked: bool,
    pub consumable_used: bool,
    pub ritual_complete: bool,
}

impl Progress {
    /// Advance the stage. Backward transitions are ignored.
    pub fn advance_stage(&mut self, stage: GameStage) {
        if stage > self.stage {
            self.stage = stage;
        }
    }

    /// Flip the ritual flag. Returns false if it was already set, so callers
    /// can enforce the fire-at-most-once contract.
    pub fn complete_ritual(&mut self) -> bool {
        if self.ritual_complete {
            return false;
        }
        self.ritual_complete = true;
        self.advance_stage(GameStage::RitualDone);
        true
    }
}
