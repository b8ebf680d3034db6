//! Data-file loading: JSON and TOML round-trips through real files, format
//! dispatch, and construction-time failure reporting.

use std::fs;
use std::path::PathBuf;

use campus_quest::game::{
    load_game_data, GameSession, LocationId, SeedError, DEFAULT_PUZZLE_CODE,
};
use tempfile::TempDir;

fn write_fixture(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write fixture");
    path
}

const JSON_WORLD: &str = r#"{
    "locations": [
        {
            "id": 0,
            "brief_description": "A cell.",
            "long_description": "A small stone cell.",
            "available_commands": {"go east": 1},
            "items": ["Key"]
        },
        {
            "id": 1,
            "brief_description": "A corridor.",
            "long_description": "A drafty corridor.",
            "available_commands": {"go west": 0}
        }
    ],
    "items": [
        {
            "name": "Key",
            "description": "A small iron key.",
            "start_position": 0,
            "target_position": 1,
            "target_points": 10,
            "pickup_points": 2
        }
    ]
}"#;

#[test]
fn json_world_loads_and_plays() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "world.json", JSON_WORLD);

    let data = load_game_data(&path).expect("load json");
    assert_eq!(data.puzzle_code, DEFAULT_PUZZLE_CODE);

    let mut session = GameSession::new(data, LocationId(0)).expect("session starts");
    session
        .process(campus_quest::game::Command::parse("take key"))
        .expect("take succeeds");
    assert_eq!(session.player().score(), 2);
}

#[test]
fn toml_world_loads_with_its_own_code() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(
        &dir,
        "world.toml",
        r#"
puzzle_code = "9999"

[[locations]]
id = 0
brief_description = "A cell."
long_description = "A small stone cell."

[locations.available_commands]
"go east" = 1
"enter code" = "action:keypad"

[[locations]]
id = 1
brief_description = "A corridor."
long_description = "A drafty corridor."

[locations.available_commands]
"go west" = 0

[[items]]
name = "Lantern"
description = "A dented lantern."
start_position = -1
target_position = 0
"#,
    );

    let data = load_game_data(&path).expect("load toml");
    assert_eq!(data.puzzle_code, "9999");
    assert_eq!(data.items[0].origin, None);
    GameSession::new(data, LocationId(0)).expect("session starts");
}

#[test]
fn unsupported_extension_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "world.yaml", "locations: []");
    assert!(matches!(
        load_game_data(&path),
        Err(SeedError::UnsupportedFormat(ext)) if ext == "yaml"
    ));
}

#[test]
fn malformed_json_reports_a_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "broken.json", "{\"locations\": [");
    assert!(matches!(load_game_data(&path), Err(SeedError::Parse { .. })));
}

#[test]
fn missing_file_reports_io() {
    assert!(matches!(
        load_game_data("no/such/world.json"),
        Err(SeedError::Io(_))
    ));
}

#[test]
fn construction_rejects_a_start_location_outside_the_world() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "world.json", JSON_WORLD);
    let data = load_game_data(&path).unwrap();

    assert!(matches!(
        GameSession::new(data, LocationId(7)),
        Err(SeedError::UnknownStartLocation(LocationId(7)))
    ));
}
