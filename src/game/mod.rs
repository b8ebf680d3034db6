//! Game engine data model and session machinery.
//!
//! The session ([`GameSession`]) owns all mutable world and player state,
//! enforces the move-budget, scoring, stage, and one-shot invariants, and
//! records an append-only-but-truncatable history of visited locations for
//! replay and audit. The front end lives in the binary; the engine never
//! reads input or prints.

pub mod errors;
pub mod events;
pub mod player;
pub mod registry;
pub mod seed;
pub mod session;
pub mod simulation;
pub mod types;
pub mod world;

pub use errors::{CommandError, SeedError};
pub use events::{EventEntry, EventLog};
pub use player::Player;
pub use registry::ItemRegistry;
pub use seed::{canonical_campus_seed, load_game_data, GameData, DEFAULT_PUZZLE_CODE};
pub use session::{
    Command, ConsumableEffect, GameSession, Outcome, RitualReport, StatusReport, KEYPAD_HINT,
};
pub use simulation::{lose_demo, Simulation, INVENTORY_DEMO, SCORES_DEMO, WIN_WALKTHROUGH};
pub use types::*;
pub use world::WorldGraph;
