//! Shared helpers for the integration tests

#![allow(dead_code)]

use nightfell::action::{ActionEngine, TeamPrompt};
use nightfell::command::Command;
use nightfell::core::config::GameConfig;
use nightfell::core::types::PlayerId;
use nightfell::game::GameState;
use nightfell::mission::MissionEngine;
use nightfell::persist::parse_game;
use nightfell::world::WorldModel;

/// The shipped manor, loaded through the real bulk loader
pub fn manor() -> GameState {
    parse_game(include_str!("../../data/manor.txt"), GameConfig::default())
        .expect("manor data parses")
}

pub fn engine() -> ActionEngine {
    ActionEngine::new(GameConfig::default(), 0xD15EA5E)
}

/// Scripted team prompt: always answers the same way
pub struct Always(pub bool);

impl TeamPrompt for Always {
    fn confirm(&mut self, _: &WorldModel, _: PlayerId, _: PlayerId) -> bool {
        self.0
    }
}

/// Resolve one input line the way the session loop does: parse, run the
/// action engine, then let the mission engine react
pub fn play(
    state: &mut GameState,
    engine: &mut ActionEngine,
    prompt: &mut dyn TeamPrompt,
    line: &str,
) -> bool {
    let command = Command::parse(line).expect("test input parses");
    let actor = state.active_player_id();
    let ok = engine.resolve(state, &command, prompt);
    MissionEngine::advance(state, actor);
    ok
}
