//! Game data loading: the structured record handed to the session at
//! construction, file loaders for JSON and TOML data files, and the built-in
//! canonical campus world.
//!
//! File contents are parsed into private seed structs that mirror the data
//! format, then converted into domain records. Validation happens once, at
//! session construction; it is the only failure class that aborts instead of
//! being reported as an in-session command error.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use crate::game::errors::SeedError;
use crate::game::types::{Item, Location, LocationId, Transition, KEYPAD_ACTION};

/// Puzzle code used when the data file does not provide one.
pub const DEFAULT_PUZZLE_CODE: &str = "1992";

/// Prefix marking a transition-table value as a special-action tag rather
/// than a destination.
const ACTION_PREFIX: &str = "action:";

/// The loader output contract: everything a session needs, already
/// structured. Produced by [`load_game_data`] or [`canonical_campus_seed`].
#[derive(Debug, Clone, PartialEq)]
pub struct GameData {
    pub locations: Vec<Location>,
    pub items: Vec<Item>,
    pub puzzle_code: String,
}

impl GameData {
    /// Reject malformed data before any session state exists. Checks ids,
    /// names, transition destinations, and that item origins agree with the
    /// location item lists in both directions.
    pub fn validate(&self, start: LocationId) -> Result<(), SeedError> {
        let mut ids = BTreeSet::new();
        for location in &self.locations {
            if !ids.insert(location.id) {
                return Err(SeedError::DuplicateLocation(location.id));
            }
        }

        if !ids.contains(&start) {
            return Err(SeedError::UnknownStartLocation(start));
        }

        for location in &self.locations {
            for (command, transition) in &location.transitions {
                if let Transition::To(destination) = transition {
                    if !ids.contains(destination) {
                        return Err(SeedError::UnknownDestination {
                            from: location.id,
                            command: command.clone(),
                            destination: *destination,
                        });
                    }
                }
            }
        }

        let mut names = BTreeSet::new();
        for item in &self.items {
            if !names.insert(item.name.to_lowercase()) {
                return Err(SeedError::DuplicateItem(item.name.clone()));
            }
            for referenced in [item.origin, Some(item.target)].into_iter().flatten() {
                if !ids.contains(&referenced) {
                    return Err(SeedError::UnknownItemLocation {
                        item: item.name.clone(),
                        location: referenced,
                    });
                }
            }
        }

        // Item lists and origins must tell the same story: every listed item
        // is defined and originates there, and every origin is listed.
        for location in &self.locations {
            for name in &location.items {
                let Some(item) = self
                    .items
                    .iter()
                    .find(|item| item.name.eq_ignore_ascii_case(name))
                else {
                    return Err(SeedError::UndefinedItem {
                        location: location.id,
                        item: name.clone(),
                    });
                };
                if item.origin != Some(location.id) {
                    return Err(SeedError::InconsistentPlacement {
                        item: item.name.clone(),
                    });
                }
            }
        }
        for item in &self.items {
            if let Some(origin) = item.origin {
                let listed = self
                    .locations
                    .iter()
                    .any(|location| location.id == origin && location.items.contains(&item.name));
                if !listed {
                    return Err(SeedError::InconsistentPlacement {
                        item: item.name.clone(),
                    });
                }
            }
        }

        Ok(())
    }
}

/// Load game data from a `.json` or `.toml` file.
pub fn load_game_data<P: AsRef<Path>>(path: P) -> Result<GameData, SeedError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_lowercase();

    let seed: GameSeed = match extension.as_str() {
        "json" => serde_json::from_str(&contents).map_err(|e| SeedError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?,
        "toml" => toml::from_str(&contents).map_err(|e| SeedError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?,
        other => return Err(SeedError::UnsupportedFormat(other.to_string())),
    };

    Ok(seed.into_game_data())
}

// ============================================================================
// Seed structs mirroring the data-file format
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
struct GameSeed {
    locations: Vec<LocationSeed>,
    items: Vec<ItemSeed>,
    puzzle_code: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct LocationSeed {
    id: u32,
    brief_description: String,
    long_description: String,
    #[serde(default)]
    available_commands: BTreeMap<String, SeedTransition>,
    #[serde(default)]
    items: Vec<String>,
}

/// Transition-table values: an integer destination or an `action:` tag.
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum SeedTransition {
    Destination(u32),
    Action(String),
}

#[derive(Debug, Serialize, Deserialize)]
struct ItemSeed {
    name: String,
    description: String,
    /// `-1` (or absent) means the item does not yet exist in the world.
    #[serde(default = "latent_start")]
    start_position: i64,
    target_position: u32,
    #[serde(default)]
    target_points: u32,
    #[serde(default)]
    pickup_points: u32,
}

fn latent_start() -> i64 {
    -1
}

impl GameSeed {
    fn into_game_data(self) -> GameData {
        let locations = self
            .locations
            .into_iter()
            .map(|seed| {
                let mut location =
                    Location::new(LocationId(seed.id), &seed.brief_description, &seed.long_description);
                for (command, transition) in seed.available_commands {
                    let converted = match transition {
                        SeedTransition::Destination(id) => Transition::To(LocationId(id)),
                        SeedTransition::Action(tag) => Transition::Action(
                            tag.strip_prefix(ACTION_PREFIX).unwrap_or(&tag).to_string(),
                        ),
                    };
                    location.transitions.insert(command, converted);
                }
                for item in seed.items {
                    location.items.insert(item);
                }
                location
            })
            .collect();

        let items = self
            .items
            .into_iter()
            .map(|seed| {
                let origin = u32::try_from(seed.start_position).ok().map(LocationId);
                Item::new(
                    &seed.name,
                    &seed.description,
                    origin,
                    LocationId(seed.target_position),
                )
                .with_pickup_points(seed.pickup_points)
                .with_target_points(seed.target_points)
            })
            .collect();

        GameData {
            locations,
            items,
            puzzle_code: self.puzzle_code.unwrap_or_else(|| DEFAULT_PUZZLE_CODE.to_string()),
        }
    }
}

// ============================================================================
// Canonical campus world
// ============================================================================

/// Build the built-in Kingsbridge campus world: thirteen locations, the
/// three ritual items, the coffee consumable, and the keypad-guarded server
/// room. Used when no data file is supplied.
pub fn canonical_campus_seed() -> GameData {
    let locations = vec![
        Location::new(
            LocationId(0),
            "Your dorm room. Home base.",
            "Your dorm room is a mess of lecture notes and empty snack wrappers. The \
             project is due at one o'clock and three things you need are missing: your \
             USB drive, your laptop charger, and your lucky mug. The hallway is east.",
        )
        .with_exit("go east", LocationId(1)),
        Location::new(
            LocationId(1),
            "The residence hallway.",
            "A long hallway lined with doors and a humming vending machine. Someone has \
             left a cup of coffee on the windowsill, still warm. Your room is west; the \
             courtyard is north.",
        )
        .with_exit("go west", LocationId(0))
        .with_exit("go north", LocationId(2))
        .with_item("Coffee"),
        Location::new(
            LocationId(2),
            "The residence courtyard.",
            "A brick courtyard between the residence and the rest of campus. Founders' \
             Circle lies north; the hallway is back south.",
        )
        .with_exit("go south", LocationId(1))
        .with_exit("go north", LocationId(10)),
        Location::new(
            LocationId(3),
            "The arts crossroads.",
            "Paths cross here from every corner of campus. The library rises to the \
             north, the cafe is west, the old observatory east, and Computing Hall is \
             south.",
        )
        .with_exit("go north", LocationId(5))
        .with_exit("go south", LocationId(7))
        .with_exit("go west", LocationId(9))
        .with_exit("go east", LocationId(4)),
        Location::new(
            LocationId(4),
            "The old observatory.",
            "A disused observatory with a jammed dome. Dusty, quiet, and entirely \
             unhelpful for your deadline. The crossroads is back west.",
        )
        .with_exit("go west", LocationId(3)),
        Location::new(
            LocationId(5),
            "The library ground floor.",
            "Turnstiles, a sleepy security guard, and the smell of old paper. The \
             stacks are up a flight of stairs; the crossroads is south.",
        )
        .with_exit("go south", LocationId(3))
        .with_exit("go up", LocationId(6)),
        Location::new(
            LocationId(6),
            "The library upper stacks.",
            "Endless shelves under flickering fluorescent light. On a study carrel, \
             exactly where you did not leave it, sits your USB drive.",
        )
        .with_exit("go down", LocationId(5))
        .with_item("USB Drive"),
        Location::new(
            LocationId(7),
            "Computing Hall, ground floor.",
            "The ground floor of Computing Hall. A locked door to the south is labelled \
             SERVER ROOM, with a four-digit keypad beside it. A note on the wall reads: \
             'When the university was born, so was the code.' Stairs lead up; the \
             crossroads is north and Founders' Circle east.",
        )
        .with_exit("go north", LocationId(3))
        .with_exit("go up", LocationId(8))
        .with_exit("go east", LocationId(10))
        .with_action("enter code", KEYPAD_ACTION),
        Location::new(
            LocationId(8),
            "Lecture hall B300.",
            "Raked seating and a whiteboard covered in someone else's proofs. Coiled \
             neatly on the lectern is your laptop charger, with a sticky note: \
             'Borrowed this. Sorry. It mattered.'",
        )
        .with_exit("go down", LocationId(7))
        .with_item("Laptop Charger"),
        Location::new(
            LocationId(9),
            "The campus cafe.",
            "Espresso hiss and exam-season murmur. Behind the counter, on the regulars' \
             shelf, sits your lucky mug. The receipt tucked inside is stamped 3:47 AM.",
        )
        .with_exit("go east", LocationId(3))
        .with_item("Lucky Mug"),
        Location::new(
            LocationId(10),
            "Founders' Circle.",
            "A ring of worn flagstones at the heart of campus. Someone has drawn a neat \
             chalk triangle in the center, each corner labelled in your project \
             partner's handwriting: BLUE, SILVER, GOLD. The circle feels like it is \
             waiting.",
        )
        .with_exit("go west", LocationId(7))
        .with_exit("go south", LocationId(2))
        .with_exit("go east", LocationId(11)),
        Location::new(
            LocationId(11),
            "The reading room.",
            "Tall windows and long oak tables. A folded note addressed to you is \
             propped against a lamp.",
        )
        .with_exit("go west", LocationId(10))
        .with_item("Note"),
        Location::new(
            LocationId(12),
            "The server room.",
            "Racks of servers breathe warm air. Taped to the nearest cabinet is a \
             printout that explains everything.",
        )
        .with_exit("go north", LocationId(7))
        .with_item("Printout"),
    ];

    let items = vec![
        Item::new(
            "USB Drive",
            "Your project USB drive, labelled in your own handwriting. The file dates \
             are from two days ago.",
            Some(LocationId(6)),
            LocationId(10),
        )
        .with_pickup_points(5),
        Item::new(
            "Laptop Charger",
            "Your laptop charger, warm as if recently used all night.",
            Some(LocationId(8)),
            LocationId(10),
        )
        .with_pickup_points(5),
        Item::new(
            "Lucky Mug",
            "Your lucky mug. You have never submitted an assignment without it.",
            Some(LocationId(9)),
            LocationId(10),
        )
        .with_pickup_points(5),
        Item::new(
            "Coffee",
            "A large double-double, still steaming. One sip of this could power a whole \
             extra lap of campus.",
            Some(LocationId(1)),
            LocationId(1),
        ),
        Item::new(
            "Note",
            "Your partner's handwriting: 'The bug is in the file handler. I fixed it. \
             Bring the three to the circle and the truth will appear. The keypad code \
             is the year Kingsbridge was founded: 1827.'",
            Some(LocationId(11)),
            LocationId(11),
        ),
        Item::new(
            "Printout",
            "An official email: 'Project deadline extended to 2pm due to server \
             maintenance.' Below it, scrawled: 'I was never sabotaging you. I was up \
             all night fixing our code.'",
            Some(LocationId(12)),
            LocationId(12),
        )
        .with_pickup_points(5),
        Item::new(
            "backup_usb",
            "A pristine USB drive labelled: 'FIXED VERSION. NO BUGS. SUBMIT THIS ONE.'",
            None,
            LocationId(0),
        )
        .with_target_points(100),
    ];

    GameData {
        locations,
        items,
        puzzle_code: "1827".to_string(),
    }
}
