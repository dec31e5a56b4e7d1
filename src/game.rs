//! The full game state: world, per-player histories, turn, mission

use crate::command::{Command, CommandHistory, CommandRecord};
use crate::core::types::PlayerId;
use crate::mission::MissionState;
use crate::world::WorldModel;

/// Everything the engines mutate and persistence round-trips
///
/// Histories run parallel to `world.players()`: the history at index `i`
/// belongs to the player at index `i`. Constructed only with at least
/// one player (the loader enforces this).
#[derive(Debug, Clone)]
pub struct GameState {
    pub world: WorldModel,
    pub histories: Vec<CommandHistory>,
    /// Index of the active player in `world.players()`
    pub turn: usize,
    pub mission: MissionState,
}

impl GameState {
    pub fn new(world: WorldModel) -> Self {
        let histories = world.players().iter().map(|_| CommandHistory::new()).collect();
        Self {
            world,
            histories,
            turn: 0,
            mission: MissionState::new(),
        }
    }

    pub fn active_player_id(&self) -> PlayerId {
        self.world.players()[self.turn].id
    }

    fn player_index(&self, id: PlayerId) -> Option<usize> {
        self.world.players().iter().position(|p| p.id == id)
    }

    pub fn history_of(&self, id: PlayerId) -> Option<&CommandHistory> {
        self.player_index(id).map(|i| &self.histories[i])
    }

    pub fn history_mut(&mut self, id: PlayerId) -> Option<&mut CommandHistory> {
        let index = self.player_index(id)?;
        Some(&mut self.histories[index])
    }

    pub fn record_command(&mut self, id: PlayerId, command: Command, success: bool) {
        if let Some(history) = self.history_mut(id) {
            history.record(command, success);
        }
    }

    pub fn last_command(&self, id: PlayerId) -> Option<&CommandRecord> {
        self.history_of(id)?.last()
    }
}
