//! Campaign progression integration tests

mod common;

use common::{engine, manor, play, Always};
use nightfell::core::types::{PlayerId, SpaceId};
use nightfell::mission::MissionCode;

const ROWAN: PlayerId = PlayerId(1);
const MAREN: PlayerId = PlayerId(2);

#[test]
fn test_team_up_mission_advances_on_shared_team() {
    let mut state = manor();
    let mut engine = engine();
    assert_eq!(state.mission.code, MissionCode::TeamUp);
    assert_eq!(state.mission.step, 0);

    assert!(play(&mut state, &mut engine, &mut Always(true), "team maren"));

    assert_eq!(state.mission.code, MissionCode::Lantern);
    assert_eq!(state.mission.step, 0);
    assert_eq!(state.mission.dialogue_cursor, 0);
    assert_eq!(state.mission.objective_cursor, 0);

    // The team-up step broadcasts to both players
    for pid in [ROWAN, MAREN] {
        let history = state.history_of(pid).unwrap();
        assert!(history.display.show_message);
        assert!(history.display.message.contains("Stay close"));
        assert!(history.display.objective.contains("lantern"));
    }
}

#[test]
fn test_declined_team_up_does_not_advance() {
    let mut state = manor();
    let mut engine = engine();
    assert!(!play(&mut state, &mut engine, &mut Always(false), "team maren"));
    assert_eq!(state.mission.code, MissionCode::TeamUp);
    assert_eq!(state.mission.step, 0);
}

#[test]
fn test_unrelated_commands_do_not_advance_missions() {
    let mut state = manor();
    let mut engine = engine();
    play(&mut state, &mut engine, &mut Always(false), "inspect portrait");
    play(&mut state, &mut engine, &mut Always(false), "move up");
    play(&mut state, &mut engine, &mut Always(false), "move down");
    assert_eq!(state.mission.code, MissionCode::TeamUp);
    assert_eq!(state.mission.step, 0);
}

/// Walk the whole campaign start to finish, checking the order of the
/// stages and that progress never moves backward.
#[test]
fn test_full_campaign_walkthrough() {
    let mut state = manor();
    let mut engine = engine();

    let mut seen: Vec<(usize, u32)> = Vec::new();
    let mut note = |state: &nightfell::game::GameState| {
        let index = MissionCode::CAMPAIGN
            .iter()
            .position(|&m| m == state.mission.code)
            .unwrap();
        seen.push((index, state.mission.step));
    };

    macro_rules! step {
        ($prompt:expr, $line:expr) => {{
            play(&mut state, &mut engine, $prompt, $line);
            note(&state);
        }};
    }

    // TeamUp
    step!(&mut Always(true), "team maren");
    assert_eq!(state.mission.code, MissionCode::Lantern);

    // Lantern
    step!(&mut Always(false), "take batteries");
    assert_eq!(state.mission.step, 1);
    step!(&mut Always(false), "take lantern");
    assert_eq!(state.mission.code, MissionCode::Generator);

    // Generator
    step!(&mut Always(false), "take cellarkey");
    step!(&mut Always(false), "open cellardoor cellarkey");
    assert_eq!(state.mission.step, 1);
    assert!(!state.world.lights_on);
    step!(&mut Always(false), "move down");
    assert!(state.world.lights_on);
    assert_eq!(state.mission.code, MissionCode::Flashback);

    // Flashback: the portrait pulls the acting player into the memory
    step!(&mut Always(false), "move up");
    step!(&mut Always(false), "inspect portrait");
    let memory = state.world.space_by_name("memory").unwrap();
    assert_eq!(state.world.player(ROWAN).unwrap().location, memory);
    assert!(state.world.character_by_name("father").is_some());

    step!(&mut Always(false), "chat father");
    let hall = state.world.space_by_name("hall").unwrap();
    assert_eq!(state.world.player(ROWAN).unwrap().location, hall);
    assert_eq!(state.mission.code, MissionCode::SecondFloor);

    // SecondFloor
    step!(&mut Always(false), "move up");
    assert_eq!(state.mission.code, MissionCode::Medkit);

    // Medkit
    step!(&mut Always(false), "take medkit");
    assert_eq!(state.mission.step, 1);
    step!(&mut Always(false), "use medkit");
    assert_eq!(state.mission.code, MissionCode::Bedroom);

    // Bedroom
    step!(&mut Always(false), "move north");
    assert_eq!(state.mission.step, 1);
    step!(&mut Always(false), "inspect musicbox");
    assert_eq!(state.mission.code, MissionCode::Companion);

    // Companion
    step!(&mut Always(false), "recruit lily");
    assert_eq!(state.mission.code, MissionCode::ThirdFloor);

    // ThirdFloor
    step!(&mut Always(false), "take attickey");
    step!(&mut Always(false), "move south");
    step!(&mut Always(false), "open attichatch attickey");
    assert_eq!(state.mission.step, 1);
    step!(&mut Always(false), "move up");
    assert_eq!(state.world.player(ROWAN).unwrap().location, SpaceId(5));
    assert!(state.world.character_by_name("warden").is_some());
    assert_eq!(state.mission.code, MissionCode::Boss);

    // Boss: keep swinging until the warden falls
    let warden = state.world.character_by_name("warden").unwrap();
    for _ in 0..300 {
        if !state.world.character(warden).unwrap().is_alive() {
            break;
        }
        play(&mut state, &mut engine, &mut Always(false), "attack warden");
        note(&state);
    }
    assert!(!state.world.character(warden).unwrap().is_alive());
    assert!(state.mission.campaign_complete);

    // Progress is monotonic: mission index never decreases, and the
    // step never decreases within one mission
    for pair in seen.windows(2) {
        let (mission_a, step_a) = pair[0];
        let (mission_b, step_b) = pair[1];
        assert!(mission_b >= mission_a, "mission moved backward");
        if mission_a == mission_b {
            assert!(step_b >= step_a, "step moved backward");
        }
    }
}

#[test]
fn test_spawned_characters_are_not_duplicated() {
    let mut state = manor();
    let mut engine = engine();
    play(&mut state, &mut engine, &mut Always(true), "team maren");
    play(&mut state, &mut engine, &mut Always(false), "take batteries");
    play(&mut state, &mut engine, &mut Always(false), "take lantern");
    play(&mut state, &mut engine, &mut Always(false), "take cellarkey");
    play(&mut state, &mut engine, &mut Always(false), "open cellardoor cellarkey");
    play(&mut state, &mut engine, &mut Always(false), "move down");
    play(&mut state, &mut engine, &mut Always(false), "move up");
    play(&mut state, &mut engine, &mut Always(false), "inspect portrait");

    let fathers = state
        .world
        .characters()
        .iter()
        .filter(|c| c.name == "father")
        .count();
    assert_eq!(fathers, 1);
}
