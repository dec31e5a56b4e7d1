//! Command resolution: one validate-then-commit transition per code
//!
//! Every transition checks all of its preconditions before touching any
//! state; a failed precondition leaves the world exactly as it was and
//! only the recorded success flag tells the difference.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::action::combat::{resolve_attack, AttackOutcome};
use crate::command::{Command, CommandCode};
use crate::core::config::GameConfig;
use crate::core::types::{Direction, PlayerId, SpaceId};
use crate::game::GameState;
use crate::world::WorldModel;

/// The yes/no collaborator seam for the Team command
///
/// The engine stages the invitation text into the invitee's display
/// state before calling `confirm` and restores the previous display
/// state afterward, whatever the answer.
pub trait TeamPrompt {
    fn confirm(&mut self, world: &WorldModel, proposer: PlayerId, invitee: PlayerId) -> bool;
}

/// Resolves parsed commands against the game state
pub struct ActionEngine {
    config: GameConfig,
    rng: ChaCha8Rng,
}

impl ActionEngine {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self {
            config,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Resolve one command for the active player
    ///
    /// Records the outcome into the acting player's history and returns
    /// the success flag. Save, Load and Exit are loop-level commands:
    /// the session performs and records those itself.
    pub fn resolve(
        &mut self,
        state: &mut GameState,
        command: &Command,
        prompt: &mut dyn TeamPrompt,
    ) -> bool {
        if matches!(
            command.code,
            CommandCode::Save | CommandCode::Load | CommandCode::Exit
        ) {
            return true;
        }

        let actor = state.active_player_id();
        let success = match command.code {
            CommandCode::Move => self.do_move(state, &command.arg0),
            CommandCode::Take => self.do_take(state, &command.arg0),
            CommandCode::Drop => self.do_drop(state, &command.arg0),
            CommandCode::Chat => self.do_chat(state, &command.arg0),
            CommandCode::Attack => self.do_attack(state, &command.arg0),
            CommandCode::Inspect => self.do_inspect(state, &command.arg0),
            CommandCode::Recruit => self.do_recruit(state, &command.arg0),
            CommandCode::Abandon => self.do_abandon(state, &command.arg0),
            CommandCode::Open => self.do_open(state, &command.arg0, &command.arg1),
            CommandCode::Use => self.do_use(state, &command.arg0, &command.arg1),
            CommandCode::Team => self.do_team(state, &command.arg0, prompt),
            CommandCode::Turn => self.do_turn(state),
            CommandCode::Save | CommandCode::Load | CommandCode::Exit => true,
        };

        state.record_command(actor, command.clone(), success);
        tracing::debug!(code = ?command.code, success, "action resolved");
        success
    }

    fn do_move(&mut self, state: &mut GameState, arg: &str) -> bool {
        let Some(direction) = Direction::parse(arg) else {
            return false;
        };
        let pid = state.active_player_id();
        let Some(from) = player_location(&state.world, pid) else {
            return false;
        };
        let Some(destination) = state.world.get_connection(from, direction) else {
            return false;
        };
        if !state.world.connection_is_open(from, direction) {
            return false;
        }

        if let Some(player) = state.world.player_mut(pid) {
            player.location = destination;
        }
        for follower in state.world.followers_of(pid) {
            state.world.move_character(follower, destination);
        }
        if let Some(space) = state.world.space_mut(destination) {
            space.discovered = true;
        }
        true
    }

    fn do_take(&mut self, state: &mut GameState, name: &str) -> bool {
        let pid = state.active_player_id();
        let Some(loc) = player_location(&state.world, pid) else {
            return false;
        };
        let Some(oid) = state.world.object_by_name_in_space(loc, name) else {
            return false;
        };
        let (movable, depends_on) = match state.world.object(oid) {
            Some(object) => (object.movable, object.depends_on),
            None => return false,
        };
        if !movable {
            return false;
        }
        let Some(player) = state.world.player(pid) else {
            return false;
        };
        if let Some(dependency) = depends_on {
            if !player.inventory.contains(dependency) {
                return false;
            }
        }
        if player.inventory.is_full() {
            return false;
        }

        if let Some(space) = state.world.space_mut(loc) {
            space.objects.remove(oid);
        }
        if let Some(player) = state.world.player_mut(pid) {
            player.inventory.insert(oid);
        }
        true
    }

    fn do_drop(&mut self, state: &mut GameState, name: &str) -> bool {
        let pid = state.active_player_id();
        let Some(loc) = player_location(&state.world, pid) else {
            return false;
        };
        let Some(oid) = state.world.object_in_inventory_by_name(pid, name) else {
            return false;
        };
        let Some(player) = state.world.player(pid) else {
            return false;
        };
        // Dependents block dropping their prerequisite
        let blocked = player.inventory.iter().any(|other| {
            other != oid
                && state
                    .world
                    .object(other)
                    .map(|o| o.depends_on == Some(oid))
                    .unwrap_or(false)
        });
        if blocked {
            return false;
        }

        if let Some(player) = state.world.player_mut(pid) {
            player.inventory.remove(oid);
        }
        if let Some(space) = state.world.space_mut(loc) {
            space.objects.insert(oid);
        }
        true
    }

    fn do_chat(&mut self, state: &mut GameState, name: &str) -> bool {
        let pid = state.active_player_id();
        let Some(loc) = player_location(&state.world, pid) else {
            return false;
        };
        let Some(cid) = state.world.character_by_name_in_space(loc, name) else {
            return false;
        };
        let message = match state.world.character_mut(cid) {
            Some(character) => character.next_message(),
            None => None,
        };
        let Some(message) = message else {
            return false;
        };
        let Some(history) = state.history_mut(pid) else {
            return false;
        };
        history.display.message = message;
        history.display.show_message = true;
        true
    }

    fn do_attack(&mut self, state: &mut GameState, name: &str) -> bool {
        let pid = state.active_player_id();
        let Some(loc) = player_location(&state.world, pid) else {
            return false;
        };
        let Some(target) = state.world.character_by_name_in_space(loc, name) else {
            return false;
        };
        match state.world.character(target) {
            Some(enemy) if !enemy.friendly && enemy.is_alive() => {}
            _ => return false,
        }

        let followers = state.world.followers_of(pid);
        let team_size = 1 + followers.len();
        let my_team = match state.world.player(pid) {
            Some(player) => player.team,
            None => return false,
        };
        let allied_players = state
            .world
            .players()
            .iter()
            .filter(|p| p.id != pid && p.team == my_team && p.location == loc)
            .count();

        let roll = self.rng.gen_range(1..=self.config.attack_die_sides);
        let victim_roll = self.rng.gen_range(0..team_size);

        match resolve_attack(
            roll,
            self.config.recoil_threshold,
            victim_roll,
            team_size,
            self.config.player_damage,
            allied_players,
        ) {
            AttackOutcome::Recoil { victim_index } => {
                tracing::debug!(roll, victim_index, "attack recoiled");
                if victim_index == 0 {
                    if let Some(player) = state.world.player_mut(pid) {
                        player.health -= self.config.enemy_damage;
                    }
                } else if let Some(character) =
                    state.world.character_mut(followers[victim_index - 1])
                {
                    character.health -= self.config.enemy_damage;
                    if !character.is_alive() {
                        character.following = None;
                    }
                }
            }
            AttackOutcome::Strike { damage } => {
                tracing::debug!(roll, damage, "attack landed");
                if let Some(enemy) = state.world.character_mut(target) {
                    enemy.health -= damage;
                    if !enemy.is_alive() {
                        enemy.following = None;
                    }
                }
            }
        }
        true
    }

    fn do_inspect(&mut self, state: &mut GameState, name: &str) -> bool {
        let pid = state.active_player_id();
        let Some(loc) = player_location(&state.world, pid) else {
            return false;
        };
        let oid = state
            .world
            .object_by_name_in_space(loc, name)
            .or_else(|| state.world.object_in_inventory_by_name(pid, name));
        let Some(oid) = oid else {
            return false;
        };
        let Some(description) = state.world.object(oid).map(|o| o.description.clone()) else {
            return false;
        };
        let Some(history) = state.history_mut(pid) else {
            return false;
        };
        history.display.description = description;
        true
    }

    fn do_recruit(&mut self, state: &mut GameState, name: &str) -> bool {
        let pid = state.active_player_id();
        let Some(loc) = player_location(&state.world, pid) else {
            return false;
        };
        let Some(cid) = state.world.character_by_name_in_space(loc, name) else {
            return false;
        };
        match state.world.character(cid) {
            Some(c) if c.friendly && c.is_alive() && c.following.is_none() => {}
            _ => return false,
        }
        if let Some(character) = state.world.character_mut(cid) {
            character.following = Some(pid);
        }
        true
    }

    fn do_abandon(&mut self, state: &mut GameState, name: &str) -> bool {
        let pid = state.active_player_id();
        let Some(cid) = state.world.character_by_name(name) else {
            return false;
        };
        match state.world.character(cid) {
            Some(c) if c.following == Some(pid) => {}
            _ => return false,
        }
        if let Some(character) = state.world.character_mut(cid) {
            character.following = None;
        }
        true
    }

    fn do_open(&mut self, state: &mut GameState, link_name: &str, object_name: &str) -> bool {
        let pid = state.active_player_id();
        let Some(loc) = player_location(&state.world, pid) else {
            return false;
        };
        let Some(link_id) = state.world.link_by_name_from(loc, link_name).map(|l| l.id) else {
            return false;
        };
        let Some(oid) = state.world.object_in_inventory_by_name(pid, object_name) else {
            return false;
        };
        let (opens, depends_on) = match state.world.object(oid) {
            Some(object) => (object.opens, object.depends_on),
            None => return false,
        };
        if opens != Some(link_id) {
            return false;
        }
        if let Some(dependency) = depends_on {
            let held = state
                .world
                .player(pid)
                .map(|p| p.inventory.contains(dependency))
                .unwrap_or(false);
            if !held {
                return false;
            }
        }

        if let Some(link) = state.world.link_mut(link_id) {
            link.is_open = true;
        }
        // The opener is consumed
        state.world.despawn_object(oid);
        true
    }

    fn do_use(&mut self, state: &mut GameState, object_name: &str, character_name: &str) -> bool {
        let pid = state.active_player_id();
        let Some(loc) = player_location(&state.world, pid) else {
            return false;
        };
        let oid = state
            .world
            .object_by_name_in_space(loc, object_name)
            .or_else(|| state.world.object_in_inventory_by_name(pid, object_name));
        let Some(oid) = oid else {
            return false;
        };
        let delta = match state.world.object(oid) {
            Some(object) if object.is_usable() => object.health_delta,
            _ => return false,
        };

        if character_name.is_empty() {
            if let Some(player) = state.world.player_mut(pid) {
                player.health += delta;
            }
        } else {
            let Some(cid) = state.world.character_by_name_in_space(loc, character_name) else {
                return false;
            };
            match state.world.character(cid) {
                Some(c) if c.friendly && c.is_alive() => {}
                _ => return false,
            }
            if let Some(character) = state.world.character_mut(cid) {
                character.health += delta;
            }
        }

        // Used up: gone from the game, not just the inventory
        state.world.despawn_object(oid);
        true
    }

    fn do_team(&mut self, state: &mut GameState, name: &str, prompt: &mut dyn TeamPrompt) -> bool {
        let pid = state.active_player_id();
        let Some(invitee) = state.world.player_by_name(name) else {
            return false;
        };
        if invitee == pid {
            return false;
        }
        let Some(proposer_name) = state.world.player(pid).map(|p| p.name.clone()) else {
            return false;
        };

        let Some(saved) = state.history_of(invitee).map(|h| h.snapshot()) else {
            return false;
        };
        if let Some(history) = state.history_mut(invitee) {
            history.display.message = format!("{proposer_name} proposes to team up. Accept? (y/n)");
            history.display.show_message = true;
        }

        let accepted = prompt.confirm(&state.world, pid, invitee);

        if let Some(history) = state.history_mut(invitee) {
            history.restore(saved);
        }

        if accepted {
            let team = match state.world.player(pid) {
                Some(player) => player.team,
                None => return false,
            };
            if let Some(player) = state.world.player_mut(invitee) {
                player.team = team;
            }
        }
        accepted
    }

    fn do_turn(&mut self, state: &mut GameState) -> bool {
        let count = state.world.players().len();
        if count > 0 {
            state.turn = (state.turn + 1) % count;
        }
        true
    }
}

fn player_location(world: &WorldModel, id: PlayerId) -> Option<SpaceId> {
    world.player(id).map(|p| p.location)
}
