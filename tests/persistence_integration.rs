//! Save/load round-trip tests
//!
//! The contract: serializing and reloading yields an isomorphic world
//! (same spaces, same link gates, same inventories, same mission
//! progress), and re-serializing a loaded state reproduces the file
//! byte for byte.

mod common;

use common::{engine, manor, play, Always};
use nightfell::core::config::GameConfig;
use nightfell::core::error::GameError;
use nightfell::core::types::PlayerId;
use nightfell::game::GameState;
use nightfell::mission::MissionCode;
use nightfell::persist::{load_game, parse_game, save_game, serialize_game};

fn assert_isomorphic(a: &GameState, b: &GameState) {
    assert_eq!(a.world.spaces().len(), b.world.spaces().len());
    for (left, right) in a.world.spaces().iter().zip(b.world.spaces()) {
        assert_eq!(left, right);
    }
    assert_eq!(a.world.links().len(), b.world.links().len());
    for (left, right) in a.world.links().iter().zip(b.world.links()) {
        assert_eq!(left, right);
    }
    assert_eq!(a.world.objects(), b.world.objects());
    assert_eq!(a.world.characters(), b.world.characters());
    assert_eq!(a.world.players(), b.world.players());
    assert_eq!(a.world.lights_on, b.world.lights_on);
    assert_eq!(a.turn, b.turn);
    assert_eq!(a.histories, b.histories);
    assert_eq!(a.mission, b.mission);
}

#[test]
fn test_fresh_manor_round_trips() {
    let state = manor();
    let text = serialize_game(&state);
    let loaded = parse_game(&text, GameConfig::default()).unwrap();
    assert_isomorphic(&state, &loaded);
}

#[test]
fn test_reserialization_is_byte_identical() {
    let state = manor();
    let first = serialize_game(&state);
    let loaded = parse_game(&first, GameConfig::default()).unwrap();
    let second = serialize_game(&loaded);
    assert_eq!(first, second);
}

#[test]
fn test_played_state_round_trips() {
    let mut state = manor();
    let mut engine = engine();

    play(&mut state, &mut engine, &mut Always(true), "team maren");
    play(&mut state, &mut engine, &mut Always(false), "take batteries");
    play(&mut state, &mut engine, &mut Always(false), "take lantern");
    play(&mut state, &mut engine, &mut Always(false), "take cellarkey");
    play(&mut state, &mut engine, &mut Always(false), "open cellardoor cellarkey");
    play(&mut state, &mut engine, &mut Always(false), "move down");
    play(&mut state, &mut engine, &mut Always(false), "chat ghost");
    play(&mut state, &mut engine, &mut Always(false), "move up");
    play(&mut state, &mut engine, &mut Always(false), "turn");

    assert_eq!(state.mission.code, MissionCode::Flashback);
    assert!(state.world.lights_on);

    let text = serialize_game(&state);
    let loaded = parse_game(&text, GameConfig::default()).unwrap();
    assert_isomorphic(&state, &loaded);

    // Spot checks on the interesting bits
    let rowan = loaded.world.player(PlayerId(1)).unwrap();
    assert_eq!(rowan.inventory.len(), 2);
    assert_eq!(loaded.mission.code, MissionCode::Flashback);
    assert_eq!(loaded.turn, 1);
    let record = loaded.last_command(PlayerId(1)).unwrap();
    assert_eq!(record.command.code, nightfell::command::CommandCode::Turn);

    let again = serialize_game(&loaded);
    assert_eq!(text, again);
}

#[test]
fn test_save_and_load_through_a_file() {
    let mut state = manor();
    let mut engine = engine();
    play(&mut state, &mut engine, &mut Always(false), "take batteries");

    let path = std::env::temp_dir().join(format!("nightfell_save_{}.txt", std::process::id()));
    save_game(&state, &path).unwrap();
    let loaded = load_game(&path, GameConfig::default()).unwrap();
    std::fs::remove_file(&path).ok();

    assert_isomorphic(&state, &loaded);
}

#[test]
fn test_missing_file_is_an_error() {
    let result = load_game(
        std::path::Path::new("/nonexistent/nightfell.txt"),
        GameConfig::default(),
    );
    assert!(matches!(result, Err(GameError::Io(_))));
}

#[test]
fn test_malformed_records_are_rejected() {
    let config = GameConfig::default;

    // No colon after the tag
    assert!(matches!(
        parse_game("#s 1|hall|a|b|c|d|e|", config()),
        Err(GameError::MalformedRecord { line: 1, .. })
    ));

    // Unknown tag
    assert!(matches!(
        parse_game("#q:1|what|", config()),
        Err(GameError::UnknownTag { line: 1, .. })
    ));

    // Bad direction on a link
    let text = "\
#s:1|hall|a|b|c|d|e|
#s:2|cellar|a|b|c|d|e|
#p:1|rowan|(R)|1|10|3|1||
#l:1|door|1|2|sideways|0|
";
    assert!(matches!(
        parse_game(text, config()),
        Err(GameError::MalformedRecord { .. })
    ));
}

#[test]
fn test_dangling_and_duplicate_links_are_rejected() {
    let config = GameConfig::default;

    // Link pointing at a missing space
    let dangling = "\
#s:1|hall|a|b|c|d|e|
#p:1|rowan|(R)|1|10|3|1||
#l:1|door|1|9|north|0|
";
    assert!(matches!(
        parse_game(dangling, config()),
        Err(GameError::DanglingReference(_))
    ));

    // Two links out of the same space in the same direction
    let duplicate = "\
#s:1|hall|a|b|c|d|e|
#s:2|cellar|a|b|c|d|e|
#p:1|rowan|(R)|1|10|3|1||
#l:1|door|1|2|down|0|
#l:2|hatch|1|2|down|0|
";
    assert!(matches!(
        parse_game(duplicate, config()),
        Err(GameError::DuplicateLink { .. })
    ));
}

#[test]
fn test_exclusive_object_ownership_is_enforced() {
    let config = GameConfig::default;

    // Object claims a space AND sits in an inventory
    let both = "\
#s:1|hall|a|b|c|d|e|
#o:1|key|1|a key|k|0|1|||
#p:1|rowan|(R)|1|10|3|1|1|
";
    assert!(matches!(
        parse_game(both, config()),
        Err(GameError::DanglingReference(_))
    ));

    // Object with no home at all
    let nowhere = "\
#s:1|hall|a|b|c|d|e|
#o:1|key||a key|k|0|1|||
#p:1|rowan|(R)|1|10|3|1||
";
    assert!(matches!(
        parse_game(nowhere, config()),
        Err(GameError::DanglingReference(_))
    ));
}

#[test]
fn test_inventory_overflow_on_load_is_rejected() {
    let config = GameConfig::default;
    let text = "\
#s:1|hall|a|b|c|d|e|
#o:1|a||thing a|a|0|1|||
#o:2|b||thing b|b|0|1|||
#p:1|rowan|(R)|1|10|1|1|1,2|
";
    assert!(matches!(
        parse_game(text, config()),
        Err(GameError::CapacityExceeded { .. })
    ));
}

#[test]
fn test_world_without_players_is_rejected() {
    let text = "#s:1|hall|a|b|c|d|e|\n";
    assert!(matches!(
        parse_game(text, GameConfig::default()),
        Err(GameError::NoPlayers)
    ));
}

#[test]
fn test_turn_index_out_of_range_is_rejected() {
    let text = "\
#s:1|hall|a|b|c|d|e|
#p:1|rowan|(R)|1|10|3|1||
#t:4|0|
";
    assert!(matches!(
        parse_game(text, GameConfig::default()),
        Err(GameError::DanglingReference(_))
    ));
}
