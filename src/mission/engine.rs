//! Mission progression
//!
//! After every resolved action the engine checks the active mission's
//! current step against the world and the acting player's latest
//! command. Progress only ever moves forward: steps count up within a
//! mission and missions advance through the fixed campaign order.

use crate::core::types::PlayerId;
use crate::entity::{Character, Sprite};
use crate::game::GameState;
use crate::mission::campaign::MissionCode;
use crate::mission::script::{
    script_for, SpawnSpec, Trigger, WorldEffect, OPENING_OBJECTIVE,
};

pub struct MissionEngine;

impl MissionEngine {
    /// Stage the opening objective at the start of a fresh campaign
    pub fn prime(state: &mut GameState) {
        if state.mission.code != MissionCode::TeamUp || state.mission.step != 0 {
            return;
        }
        for history in &mut state.histories {
            history.display.objective = OPENING_OBJECTIVE.to_string();
        }
    }

    /// Check the active step and advance the campaign if it is satisfied
    ///
    /// Returns true when a step completed. `actor` is the player whose
    /// command was just resolved.
    pub fn advance(state: &mut GameState, actor: PlayerId) -> bool {
        if state.mission.campaign_complete {
            return false;
        }
        let script = script_for(state.mission.code);
        let Some(step) = script.steps.get(state.mission.step as usize) else {
            return false;
        };
        if !trigger_satisfied(state, actor, step.trigger) {
            return false;
        }

        state.mission.step += 1;
        let dialogue = script
            .dialogue
            .get(state.mission.dialogue_cursor)
            .copied();
        let objective = script
            .objectives
            .get(state.mission.objective_cursor)
            .copied();
        state.mission.dialogue_cursor += 1;
        state.mission.objective_cursor += 1;

        push_text(state, actor, step.broadcast, dialogue, objective);
        for effect in step.effects {
            apply_effect(state, actor, effect);
        }

        tracing::info!(
            mission = state.mission.code.as_str(),
            step = state.mission.step,
            "mission step complete"
        );

        if state.mission.step as usize >= script.steps.len() {
            match state.mission.code.next() {
                Some(next) => {
                    state.mission.code = next;
                    state.mission.step = 0;
                    state.mission.dialogue_cursor = 0;
                    state.mission.objective_cursor = 0;
                    tracing::info!(mission = next.as_str(), "mission started");
                }
                None => {
                    state.mission.campaign_complete = true;
                    tracing::info!("campaign complete");
                }
            }
        }
        true
    }
}

fn trigger_satisfied(state: &GameState, actor: PlayerId, trigger: Trigger) -> bool {
    let world = &state.world;
    match trigger {
        Trigger::PlayersShareTeam => {
            let players = world.players();
            players.len() >= 2 && players.iter().all(|p| p.team == players[0].team)
        }
        Trigger::CommandSucceeded(code) => state
            .last_command(actor)
            .map(|r| r.success && r.command.code == code)
            .unwrap_or(false),
        Trigger::CommandSucceededOn(code, arg) => state
            .last_command(actor)
            .map(|r| {
                r.success && r.command.code == code && r.command.arg0.eq_ignore_ascii_case(arg)
            })
            .unwrap_or(false),
        Trigger::PlayerInSpace(name) => world
            .player(actor)
            .and_then(|p| world.space(p.location))
            .map(|s| s.name.eq_ignore_ascii_case(name))
            .unwrap_or(false),
        Trigger::LinkOpened(name) => world
            .links()
            .iter()
            .any(|l| l.is_open && l.name.eq_ignore_ascii_case(name)),
        Trigger::ObjectHeld(name) => world.players().iter().any(|p| {
            p.inventory.iter().any(|oid| {
                world
                    .object(oid)
                    .map(|o| o.name.eq_ignore_ascii_case(name))
                    .unwrap_or(false)
            })
        }),
        Trigger::CharacterFollowing(name) => world
            .character_by_name(name)
            .and_then(|cid| world.character(cid))
            .map(|c| c.following.is_some())
            .unwrap_or(false),
        Trigger::CharacterDefeated(name) => world
            .character_by_name(name)
            .and_then(|cid| world.character(cid))
            .map(|c| !c.is_alive())
            .unwrap_or(false),
    }
}

fn push_text(
    state: &mut GameState,
    actor: PlayerId,
    broadcast: bool,
    dialogue: Option<&str>,
    objective: Option<&str>,
) {
    let targets: Vec<PlayerId> = if broadcast {
        state.world.players().iter().map(|p| p.id).collect()
    } else {
        vec![actor]
    };
    for pid in targets {
        if let Some(history) = state.history_mut(pid) {
            if let Some(line) = dialogue {
                history.display.message = line.to_string();
                history.display.show_message = true;
            }
            if let Some(line) = objective {
                history.display.objective = line.to_string();
            }
        }
    }
}

fn apply_effect(state: &mut GameState, actor: PlayerId, effect: &WorldEffect) {
    match effect {
        WorldEffect::SpawnCharacter(spec) => spawn_character(state, spec),
        WorldEffect::SetLights(on) => {
            state.world.lights_on = *on;
        }
        WorldEffect::TeleportActivePlayer(space_name) => {
            let Some(space_id) = state.world.space_by_name(space_name) else {
                tracing::warn!(space = space_name, "teleport target missing from world");
                return;
            };
            if let Some(player) = state.world.player_mut(actor) {
                player.location = space_id;
            }
            if let Some(space) = state.world.space_mut(space_id) {
                space.discovered = true;
            }
        }
    }
}

fn spawn_character(state: &mut GameState, spec: &SpawnSpec) {
    // Idempotent: a reloaded game will try to spawn again
    if state.world.character_by_name(spec.name).is_some() {
        return;
    }
    let Some(space_id) = state.world.space_by_name(spec.space) else {
        tracing::warn!(space = spec.space, "spawn target missing from world");
        return;
    };
    let character = Character::new(
        state.world.next_character_id(),
        spec.name,
        spec.health,
        spec.friendly,
    )
    .with_sprites(Sprite::single(spec.sprite), Sprite::single(spec.dead_sprite))
    .with_messages(spec.messages.iter().map(|m| m.to_string()).collect());

    if let Err(error) = state.world.add_character(character, space_id) {
        tracing::warn!(%error, name = spec.name, "could not spawn character");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Command;
    use crate::core::config::GameConfig;
    use crate::core::types::{PlayerId, SpaceId};
    use crate::entity::{Player, Space};
    use crate::world::WorldModel;

    fn two_player_state() -> GameState {
        let mut world = WorldModel::new(GameConfig::default());
        world
            .add_space(Space::new(SpaceId(1), "hall", Sprite::empty()))
            .unwrap();
        world
            .add_player(Player::new(PlayerId(1), "rowan", SpaceId(1), 10, 3))
            .unwrap();
        world
            .add_player(Player::new(PlayerId(2), "maren", SpaceId(1), 10, 3))
            .unwrap();
        GameState::new(world)
    }

    #[test]
    fn test_team_up_advances_when_teams_match() {
        let mut state = two_player_state();
        // Distinct teams: nothing happens
        assert!(!MissionEngine::advance(&mut state, PlayerId(1)));
        assert_eq!(state.mission.code, MissionCode::TeamUp);

        if let Some(player) = state.world.player_mut(PlayerId(2)) {
            player.team = PlayerId(1);
        }
        state.record_command(PlayerId(1), Command::with_arg(crate::command::CommandCode::Team, "maren"), true);

        assert!(MissionEngine::advance(&mut state, PlayerId(1)));
        assert_eq!(state.mission.code, MissionCode::Lantern);
        assert_eq!(state.mission.step, 0);
        assert_eq!(state.mission.dialogue_cursor, 0);
    }

    #[test]
    fn test_broadcast_text_reaches_both_players() {
        let mut state = two_player_state();
        if let Some(player) = state.world.player_mut(PlayerId(2)) {
            player.team = PlayerId(1);
        }
        MissionEngine::advance(&mut state, PlayerId(1));

        for pid in [PlayerId(1), PlayerId(2)] {
            let history = state.history_of(pid).unwrap();
            assert!(history.display.show_message);
            assert!(!history.display.objective.is_empty());
        }
    }

    #[test]
    fn test_no_advance_after_campaign_complete() {
        let mut state = two_player_state();
        state.mission.campaign_complete = true;
        if let Some(player) = state.world.player_mut(PlayerId(2)) {
            player.team = PlayerId(1);
        }
        assert!(!MissionEngine::advance(&mut state, PlayerId(1)));
    }
}
