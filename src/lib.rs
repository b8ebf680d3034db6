//! # Campus Quest - a turn-based graph-navigation puzzle game
//!
//! Campus Quest is a small text adventure engine: a player races a move
//! budget across a campus map, gathers three missing items, solves a keypad
//! code, and performs a ritual that replaces the items with the artifact
//! needed to win.
//!
//! ## Features
//!
//! - **Session state machine**: all world and player mutation funnels
//!   through one `process` entry point that returns structured outcomes and
//!   recoverable errors, never text.
//! - **Move budget**: only successful movement commands count; everything
//!   else is free, and a one-shot consumable can raise the limit.
//! - **Event history**: a doubly-linked, truncatable log of visited
//!   locations supporting lazy replay traversal.
//! - **Data-driven worlds**: locations and items load from JSON or TOML
//!   data files, with construction-time validation; a built-in canonical
//!   campus world ships in the crate.
//! - **Scripted replay**: deterministic walkthrough simulation for demos
//!   and tests.
//!
//! ## Quick start
//!
//! ```rust
//! use campus_quest::game::{canonical_campus_seed, Command, GameSession, HOME_LOCATION_ID};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut session = GameSession::new(canonical_campus_seed(), HOME_LOCATION_ID)?;
//!     let outcome = session.process(Command::parse("go east"))?;
//!     println!("{outcome:?}");
//!     Ok(())
//! }
//! ```
//!
//! ## Module organization
//!
//! - [`game::types`] - locations, items, transitions, stage and progress
//! - [`game::world`] / [`game::registry`] - the location graph and item registry
//! - [`game::player`] - inventory, score, move counter
//! - [`game::events`] - the visited-location history log
//! - [`game::session`] - the command-processing state machine
//! - [`game::seed`] - data loading, validation, and the canonical world
//! - [`game::simulation`] - scripted replay and demo walkthroughs
//!
//! The interactive front end lives in `src/main.rs`; the engine itself never
//! reads input or prints output.

pub mod game;
