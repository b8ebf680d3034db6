use thiserror::Error;

use crate::game::types::LocationId;

/// Errors that can abort session construction. Malformed game data is the
/// only fatal failure class; everything after construction is a recoverable
/// [`CommandError`].
#[derive(Debug, Error)]
pub enum SeedError {
    /// Wrapper around IO errors while reading a data file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The data file could not be parsed.
    #[error("failed to parse {path}: {message}")]
    Parse { path: String, message: String },

    /// The data file extension is not a supported format.
    #[error("unsupported data format: {0} (expected .json or .toml)")]
    UnsupportedFormat(String),

    /// Two location definitions share an identifier.
    #[error("duplicate location id: {0}")]
    DuplicateLocation(LocationId),

    /// Two item definitions share a name (compared case-insensitively).
    #[error("duplicate item name: {0}")]
    DuplicateItem(String),

    /// A transition points at a location that does not exist.
    #[error("location {from}: command '{command}' leads to unknown location {destination}")]
    UnknownDestination {
        from: LocationId,
        command: String,
        destination: LocationId,
    },

    /// An item's origin or target references a location that does not exist.
    #[error("item '{item}': unknown location {location}")]
    UnknownItemLocation { item: String, location: LocationId },

    /// A location's initial item list names an item with no definition.
    #[error("location {location} lists undefined item '{item}'")]
    UndefinedItem { location: LocationId, item: String },

    /// An item's origin and the location item lists disagree.
    #[error("item '{item}' origin is inconsistent with location item lists")]
    InconsistentPlacement { item: String },

    /// The requested starting location does not exist.
    #[error("unknown start location: {0}")]
    UnknownStartLocation(LocationId),
}

/// Recoverable in-session failures. Every variant leaves the session state
/// untouched; none of them end the game.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CommandError {
    /// No such transition from the current location.
    #[error("you can't go {0} from here")]
    InvalidDirection(String),

    /// The name matches no item defined in this game.
    #[error("there is no '{0}' in this game")]
    ItemNotFound(String),

    /// The item exists but is not at the current location.
    #[error("there is no '{0}' here")]
    ItemNotHere(String),

    /// The item is not in the player's inventory.
    #[error("you don't have '{0}'")]
    ItemNotHeld(String),

    /// The keypad was already solved; informational only.
    #[error("the server room is already unlocked")]
    AlreadyUnlocked,

    /// The ritual already fired; informational only.
    #[error("the ritual has already been performed")]
    AlreadyComplete,

    /// Wrong keypad code. Carries a hint for the front end to surface.
    #[error("access denied: incorrect code '{entered}'")]
    IncorrectCode { entered: String, hint: String },

    /// `enter code` issued somewhere without a keypad.
    #[error("there's no keypad here")]
    NoKeypadHere,

    /// The verb was not recognized.
    #[error("unknown command: '{0}'")]
    UnknownCommand(String),

    /// A location id resolved to nothing. Defensive: the construction-time
    /// validation makes this unreachable in practice.
    #[error("unknown location: {0}")]
    UnknownLocation(LocationId),
}
