//! The game session state machine: owns the world, the item registry, the
//! player, the event history, and every one-shot flag. All command
//! processing funnels through [`GameSession::process`], which either applies
//! an operation completely or reports a [`CommandError`] and changes nothing.

use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::game::errors::{CommandError, SeedError};
use crate::game::events::EventLog;
use crate::game::player::Player;
use crate::game::registry::ItemRegistry;
use crate::game::seed::GameData;
use crate::game::types::{
    GameStage, Location, LocationId, Placement, Progress, Transition, BASE_MAX_MOVES,
    COFFEE_BONUS_MOVES, CONSUMABLE_ITEM, KEYPAD_ACTION, KEYPAD_BONUS_POINTS, REQUIRED_ITEMS,
    RITUAL_ARTIFACT, RITUAL_BONUS_POINTS, RITUAL_LOCATION_ID, SERVER_ROOM_ID, UNLOCK_COMMAND,
};
use crate::game::world::WorldGraph;

/// Hint surfaced alongside an incorrect keypad code.
pub const KEYPAD_HINT: &str = "When the university was born, so was the code.";

/// A normalized command: a verb plus optional argument, as produced by the
/// front end (or by [`Command::parse`] for scripted replay).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Go(String),
    Take(String),
    Drop(String),
    Examine(String),
    EnterCode(String),
    Look,
    Inventory,
    Status,
    History,
    Quit,
    Unknown(String),
}

impl Command {
    /// Parse a normalized line of input. Input is lowercased and trimmed;
    /// item matching downstream is case-insensitive anyway.
    pub fn parse(input: &str) -> Command {
        let input = input.trim().to_lowercase();

        if let Some(direction) = input.strip_prefix("go ") {
            return Command::Go(direction.trim().to_string());
        }
        if let Some(name) = input.strip_prefix("take ") {
            return Command::Take(name.trim().to_string());
        }
        if let Some(name) = input.strip_prefix("drop ") {
            return Command::Drop(name.trim().to_string());
        }
        if let Some(name) = input.strip_prefix("examine ") {
            return Command::Examine(name.trim().to_string());
        }
        if input == "enter code" {
            return Command::EnterCode(String::new());
        }
        if let Some(code) = input.strip_prefix("enter code ") {
            return Command::EnterCode(code.trim().to_string());
        }

        match input.as_str() {
            "look" | "l" => Command::Look,
            "inventory" | "i" => Command::Inventory,
            "score" | "status" => Command::Status,
            "log" | "history" => Command::History,
            "quit" | "q" => Command::Quit,
            other => Command::Unknown(other.to_string()),
        }
    }
}

/// The one-time effect of the bonus consumable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsumableEffect {
    pub bonus_moves: u32,
    pub new_limit: u32,
}

/// What the ritual trigger observed after a drop at the circle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RitualReport {
    /// All three items were present: they dissolved, the artifact spawned,
    /// and the bonus was awarded.
    Completed { artifact: String, bonus_points: u32 },
    /// Not yet: these items are still missing from the circle.
    Missing { missing: Vec<String> },
}

/// Snapshot of player standing for the front end's status display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusReport {
    pub score: u32,
    pub moves_made: u32,
    pub move_limit: u32,
    pub collected_required: usize,
    pub required_total: usize,
    pub energized: bool,
    pub ritual_complete: bool,
    pub stage: GameStage,
}

/// Structured result of one processed command. The front end turns this into
/// text; the engine never prints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Moved {
        location: LocationId,
        first_visit: bool,
        description: String,
        items: Vec<String>,
        stage: GameStage,
    },
    Taken {
        item: String,
        pickup_points: u32,
        consumable: Option<ConsumableEffect>,
        remaining_required: Vec<String>,
    },
    Dropped {
        item: String,
        target_points: u32,
        ritual: Option<RitualReport>,
    },
    Examined {
        item: String,
        description: String,
    },
    Unlocked {
        bonus_points: u32,
    },
    Looked {
        description: String,
        items: Vec<String>,
        exits: Vec<String>,
    },
    InventoryListed {
        items: Vec<String>,
    },
    Status(StatusReport),
    History {
        entries: Vec<(LocationId, Option<String>)>,
    },
    Quit {
        score: u32,
        moves_made: u32,
    },
}

/// A self-contained, single-player game session.
pub struct GameSession {
    world: WorldGraph,
    registry: ItemRegistry,
    player: Player,
    events: EventLog,
    progress: Progress,
    current: LocationId,
    move_limit: u32,
    puzzle_code: String,
    /// Items ever collected, by canonical name. Append-only: removal from
    /// the inventory never removes an entry here.
    items_collected: BTreeSet<String>,
    ongoing: bool,
}

impl GameSession {
    /// Validate the loader output and build a session starting at `start`.
    pub fn new(data: GameData, start: LocationId) -> Result<Self, SeedError> {
        data.validate(start)?;
        let GameData {
            locations,
            items,
            puzzle_code,
        } = data;

        let mut world = WorldGraph::new(locations);
        let mut events = EventLog::new();
        if let Ok(start_loc) = world.lookup_mut(start) {
            start_loc.visited = true;
            let description = start_loc.long_desc.clone();
            events.add(start, &description, None);
        }

        Ok(Self {
            world,
            registry: ItemRegistry::new(items),
            player: Player::new(),
            events,
            progress: Progress::default(),
            current: start,
            move_limit: BASE_MAX_MOVES,
            puzzle_code,
            items_collected: BTreeSet::new(),
            ongoing: true,
        })
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn current_location(&self) -> Result<&Location, CommandError> {
        self.world.lookup(self.current)
    }

    pub fn current_location_id(&self) -> LocationId {
        self.current
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn events(&self) -> &EventLog {
        &self.events
    }

    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    pub fn move_limit(&self) -> u32 {
        self.move_limit
    }

    pub fn is_ongoing(&self) -> bool {
        self.ongoing
    }

    pub fn status(&self) -> StatusReport {
        StatusReport {
            score: self.player.score(),
            moves_made: self.player.moves_made(),
            move_limit: self.move_limit,
            collected_required: self.collected_required(),
            required_total: REQUIRED_ITEMS.len(),
            energized: self.progress.consumable_used,
            ritual_complete: self.progress.ritual_complete,
            stage: self.progress.stage,
        }
    }

    // ------------------------------------------------------------------
    // Command processing
    // ------------------------------------------------------------------

    /// Process one normalized command. Failures are recoverable and leave
    /// every piece of session state untouched.
    pub fn process(&mut self, command: Command) -> Result<Outcome, CommandError> {
        debug!("processing {command:?} at location {}", self.current);
        match command {
            Command::Go(direction) => self.handle_go(&direction),
            Command::Take(name) => self.handle_take(&name),
            Command::Drop(name) => self.handle_drop(&name),
            Command::Examine(name) => self.handle_examine(&name),
            Command::EnterCode(code) => self.handle_enter_code(&code),
            Command::Look => self.handle_look(),
            Command::Inventory => Ok(Outcome::InventoryListed {
                items: self.player.inventory().to_vec(),
            }),
            Command::Status => Ok(Outcome::Status(self.status())),
            Command::History => Ok(Outcome::History {
                entries: self
                    .events
                    .iter()
                    .map(|entry| (entry.location, entry.next_command.clone()))
                    .collect(),
            }),
            Command::Quit => {
                self.ongoing = false;
                Ok(Outcome::Quit {
                    score: self.player.score(),
                    moves_made: self.player.moves_made(),
                })
            }
            Command::Unknown(raw) => Err(CommandError::UnknownCommand(raw)),
        }
    }

    /// The only operation that increments the move counter. Failed attempts
    /// are free.
    fn handle_go(&mut self, direction: &str) -> Result<Outcome, CommandError> {
        let command = format!("go {direction}");
        let destination = match self.world.resolve(self.current, &command) {
            Some(Transition::To(id)) => *id,
            _ => return Err(CommandError::InvalidDirection(direction.to_string())),
        };

        let location = self.world.lookup_mut(destination)?;
        let first_visit = !location.visited;
        location.visited = true;
        let description = if first_visit {
            location.long_desc.clone()
        } else {
            location.brief_desc.clone()
        };
        let long_desc = location.long_desc.clone();
        let items: Vec<String> = location.items.iter().cloned().collect();

        self.current = destination;
        self.player.increment_moves();
        self.events.add(destination, &long_desc, Some(&command));
        self.update_stage();

        Ok(Outcome::Moved {
            location: destination,
            first_visit,
            description,
            items,
            stage: self.progress.stage,
        })
    }

    fn handle_take(&mut self, name: &str) -> Result<Outcome, CommandError> {
        let item = self
            .registry
            .find(name)
            .ok_or_else(|| CommandError::ItemNotFound(name.to_string()))?;
        let canonical = item.name.clone();
        let pickup_points = item.pickup_points;

        if !self.current_location()?.items.contains(&canonical) {
            return Err(CommandError::ItemNotHere(name.to_string()));
        }

        self.world.take_item(self.current, &canonical)?;
        self.registry.set_placement(&canonical, Placement::Held);
        self.player.add_item(&canonical);
        self.player.add_score(pickup_points);
        self.items_collected.insert(canonical.clone());

        let consumable = self.maybe_consume(&canonical);
        self.update_stage();

        let remaining_required = REQUIRED_ITEMS
            .iter()
            .filter(|required| !self.items_collected.contains(**required))
            .map(|required| required.to_string())
            .collect();

        Ok(Outcome::Taken {
            item: canonical,
            pickup_points,
            consumable,
            remaining_required,
        })
    }

    /// Fire the one-shot consumable if this pickup is the designated item
    /// and the effect has never fired. The item leaves play afterwards.
    fn maybe_consume(&mut self, canonical: &str) -> Option<ConsumableEffect> {
        if !canonical.eq_ignore_ascii_case(CONSUMABLE_ITEM) || self.progress.consumable_used {
            return None;
        }
        self.progress.consumable_used = true;
        self.move_limit += COFFEE_BONUS_MOVES;
        self.player.remove_item(canonical);
        self.registry.set_placement(canonical, Placement::Nowhere);
        info!("consumable fired: move limit raised to {}", self.move_limit);
        Some(ConsumableEffect {
            bonus_moves: COFFEE_BONUS_MOVES,
            new_limit: self.move_limit,
        })
    }

    fn handle_drop(&mut self, name: &str) -> Result<Outcome, CommandError> {
        if !self.player.has_item(name) {
            return Err(CommandError::ItemNotHeld(name.to_string()));
        }
        self.current_location()?;
        let (canonical, target, target_points) = {
            let item = self
                .registry
                .find(name)
                .ok_or_else(|| CommandError::ItemNotHeld(name.to_string()))?;
            (item.name.clone(), item.target, item.target_points)
        };

        self.player.remove_item(&canonical);
        self.world.place_item(self.current, &canonical)?;
        self.registry
            .set_placement(&canonical, Placement::At(self.current));

        let awarded = if self.current == target && target_points > 0 {
            self.player.add_score(target_points);
            target_points
        } else {
            0
        };

        let ritual = if self.current == RITUAL_LOCATION_ID {
            match self.trigger_ritual() {
                Ok(report) => Some(report),
                Err(CommandError::AlreadyComplete) => None,
                Err(other) => return Err(other),
            }
        } else {
            None
        };

        Ok(Outcome::Dropped {
            item: canonical,
            target_points: awarded,
            ritual,
        })
    }

    /// Check-then-act ritual evaluation. Either all three required items are
    /// at the circle and everything (item set, placements, score, flags)
    /// changes together, or nothing changes at all.
    pub fn trigger_ritual(&mut self) -> Result<RitualReport, CommandError> {
        if self.progress.ritual_complete {
            return Err(CommandError::AlreadyComplete);
        }

        let circle = self.world.lookup(RITUAL_LOCATION_ID)?;
        let missing: Vec<String> = REQUIRED_ITEMS
            .iter()
            .filter(|required| !circle.items.contains(**required))
            .map(|required| required.to_string())
            .collect();
        if !missing.is_empty() {
            return Ok(RitualReport::Missing { missing });
        }

        for required in REQUIRED_ITEMS {
            self.world.take_item(RITUAL_LOCATION_ID, required)?;
            self.registry.set_placement(required, Placement::Nowhere);
        }
        self.world.place_item(RITUAL_LOCATION_ID, RITUAL_ARTIFACT)?;
        self.registry
            .set_placement(RITUAL_ARTIFACT, Placement::At(RITUAL_LOCATION_ID));
        self.player.add_score(RITUAL_BONUS_POINTS);
        self.progress.complete_ritual();
        info!("ritual complete: {RITUAL_ARTIFACT} spawned at {RITUAL_LOCATION_ID}");

        Ok(RitualReport::Completed {
            artifact: RITUAL_ARTIFACT.to_string(),
            bonus_points: RITUAL_BONUS_POINTS,
        })
    }

    fn handle_examine(&mut self, name: &str) -> Result<Outcome, CommandError> {
        let item = self
            .registry
            .find(name)
            .ok_or_else(|| CommandError::ItemNotFound(name.to_string()))?;
        let canonical = item.name.clone();
        let description = item.description.clone();

        let visible = self.player.has_item(&canonical)
            || self.current_location()?.items.contains(&canonical);
        if !visible {
            return Err(CommandError::ItemNotHere(name.to_string()));
        }

        Ok(Outcome::Examined {
            item: canonical,
            description,
        })
    }

    /// The keypad puzzle. Valid only where the transition table carries the
    /// keypad action tag; succeeds at most once per session.
    fn handle_enter_code(&mut self, code: &str) -> Result<Outcome, CommandError> {
        let here = self.current_location()?;
        let has_keypad = here
            .transitions
            .values()
            .any(|transition| matches!(transition, Transition::Action(tag) if tag == KEYPAD_ACTION));
        if !has_keypad {
            return Err(CommandError::NoKeypadHere);
        }
        if self.progress.server_room_unlocked {
            return Err(CommandError::AlreadyUnlocked);
        }
        if code != self.puzzle_code {
            return Err(CommandError::IncorrectCode {
                entered: code.to_string(),
                hint: KEYPAD_HINT.to_string(),
            });
        }

        self.progress.server_room_unlocked = true;
        self.world
            .unlock_edge(self.current, UNLOCK_COMMAND, SERVER_ROOM_ID)?;
        self.player.add_score(KEYPAD_BONUS_POINTS);
        info!("keypad solved: edge '{UNLOCK_COMMAND}' unlocked at {}", self.current);

        Ok(Outcome::Unlocked {
            bonus_points: KEYPAD_BONUS_POINTS,
        })
    }

    fn handle_look(&self) -> Result<Outcome, CommandError> {
        let location = self.current_location()?;
        Ok(Outcome::Looked {
            description: location.long_desc.clone(),
            items: location.items.iter().cloned().collect(),
            exits: location.transitions.keys().cloned().collect(),
        })
    }

    // ------------------------------------------------------------------
    // Derived state
    // ------------------------------------------------------------------

    fn collected_required(&self) -> usize {
        REQUIRED_ITEMS
            .iter()
            .filter(|required| self.items_collected.contains(**required))
            .count()
    }

    /// Re-evaluate the stage rule after a pickup or a move. At most one
    /// forward transition applies per evaluation.
    fn update_stage(&mut self) {
        let collected = self.collected_required();
        let stage = self.progress.stage;

        let next = if stage == GameStage::Start && collected > 0 {
            Some(GameStage::Exploring)
        } else if stage == GameStage::Exploring && collected >= 2 {
            Some(GameStage::Gathering)
        } else if collected == REQUIRED_ITEMS.len() && !self.progress.ritual_complete {
            Some(GameStage::ReadyRitual)
        } else if self.progress.ritual_complete {
            Some(GameStage::RitualDone)
        } else {
            None
        };

        if let Some(stage) = next {
            self.progress.advance_stage(stage);
        }
    }

    /// Won: standing at home with the artifact resting in the home item set.
    /// Merely holding it does not count.
    pub fn check_win(&self) -> bool {
        use crate::game::types::HOME_LOCATION_ID;
        self.current == HOME_LOCATION_ID
            && self
                .world
                .lookup(HOME_LOCATION_ID)
                .map(|home| home.items.contains(RITUAL_ARTIFACT))
                .unwrap_or(false)
    }

    /// Lost: the move budget is spent. Callers evaluate [`Self::check_win`]
    /// first; win takes priority when both become true at once.
    pub fn check_lose(&self) -> bool {
        self.player.moves_made() >= self.move_limit
    }

    #[cfg(test)]
    pub(crate) fn world_mut(&mut self) -> &mut WorldGraph {
        &mut self.world
    }
}
