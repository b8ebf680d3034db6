//! Scripted replay: runs a predetermined command list through a fresh
//! session and records the resulting sequence of visited locations in its
//! own event log, one entry per command. Used by the demo subcommand and by
//! the walkthrough tests.

use log::debug;

use crate::game::errors::SeedError;
use crate::game::events::EventLog;
use crate::game::seed::GameData;
use crate::game::session::{Command, GameSession};
use crate::game::types::LocationId;

/// Canonical winning walkthrough for the built-in campus world: collect the
/// coffee, gather the three items, perform the ritual at Founders' Circle,
/// and carry the artifact home. Exactly 18 movement commands.
pub const WIN_WALKTHROUGH: &[&str] = &[
    "go east",             // 0 -> 1
    "take coffee",         // free; +5 moves to the limit
    "go north",            // 1 -> 2
    "go north",            // 2 -> 10
    "go west",             // 10 -> 7
    "go up",               // 7 -> 8
    "take laptop charger", // free; +5 pts
    "go down",             // 8 -> 7
    "go north",            // 7 -> 3
    "go north",            // 3 -> 5
    "go up",               // 5 -> 6
    "take usb drive",      // free; +5 pts
    "go down",             // 6 -> 5
    "go south",            // 5 -> 3
    "go west",             // 3 -> 9
    "take lucky mug",      // free; +5 pts
    "go east",             // 9 -> 3
    "go south",            // 3 -> 7
    "go east",             // 7 -> 10
    "drop usb drive",      // ritual step 1
    "drop laptop charger", // ritual step 2
    "drop lucky mug",      // ritual step 3; artifact spawns, +50 pts
    "take backup_usb",
    "go south",            // 10 -> 2
    "go south",            // 2 -> 1
    "go west",             // 1 -> 0
    "drop backup_usb",     // +100 pts, win
];

/// Shortest route to the charger plus an inventory check.
pub const INVENTORY_DEMO: &[&str] = &[
    "go east",
    "go north",
    "go north",
    "go west",
    "go up",
    "take laptop charger",
    "inventory",
];

/// First score increase of the game, then a status check.
pub const SCORES_DEMO: &[&str] = &[
    "go east",
    "go north",
    "go north",
    "go west",
    "go north",
    "go north",
    "go up",
    "take usb drive",
    "score",
];

/// Pace between home and the hallway until the base move budget runs out.
pub fn lose_demo() -> Vec<&'static str> {
    let mut commands = Vec::new();
    for _ in 0..14 {
        commands.push("go east");
        commands.push("go west");
    }
    commands
}

/// Replays a command list against a fresh session. Every command records an
/// event: movement commands record the arrival location, everything else
/// re-records the current one.
pub struct Simulation {
    session: GameSession,
    events: EventLog,
}

impl Simulation {
    pub fn new(data: GameData, start: LocationId, commands: &[&str]) -> Result<Self, SeedError> {
        let session = GameSession::new(data, start)?;
        let mut events = EventLog::new();
        if let Ok(location) = session.current_location() {
            events.add(location.id, &location.long_desc, None);
        }

        let mut simulation = Self { session, events };
        for command in commands {
            simulation.step(command);
        }
        Ok(simulation)
    }

    /// Process one raw command line. Command failures do not stop a replay;
    /// the event trail simply shows no movement.
    fn step(&mut self, raw: &str) {
        if let Err(error) = self.session.process(Command::parse(raw)) {
            debug!("replay: '{raw}' failed: {error}");
        }
        if let Ok(location) = self.session.current_location() {
            self.events.add(location.id, &location.long_desc, Some(raw));
        }
    }

    /// Location ids in the order they were recorded, one per command plus
    /// the starting location.
    pub fn id_log(&self) -> Vec<LocationId> {
        self.events.sequence().collect()
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::seed::canonical_campus_seed;
    use crate::game::types::HOME_LOCATION_ID;

    #[test]
    fn empty_replay_records_only_the_start() {
        let simulation =
            Simulation::new(canonical_campus_seed(), HOME_LOCATION_ID, &[]).unwrap();
        assert_eq!(simulation.id_log(), vec![HOME_LOCATION_ID]);
    }

    #[test]
    fn non_movement_commands_re_record_the_current_location() {
        let simulation = Simulation::new(
            canonical_campus_seed(),
            HOME_LOCATION_ID,
            &["look", "go east", "inventory"],
        )
        .unwrap();
        let ids: Vec<u32> = simulation.id_log().iter().map(|id| id.0).collect();
        assert_eq!(ids, vec![0, 0, 1, 1]);
    }

    #[test]
    fn failed_moves_stay_put_but_still_log() {
        let simulation = Simulation::new(
            canonical_campus_seed(),
            HOME_LOCATION_ID,
            &["go north", "go east"],
        )
        .unwrap();
        let ids: Vec<u32> = simulation.id_log().iter().map(|id| id.0).collect();
        assert_eq!(ids, vec![0, 0, 1]);
        assert_eq!(simulation.session().player().moves_made(), 1);
    }
}
