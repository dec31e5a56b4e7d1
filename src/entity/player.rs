//! Player avatars

use crate::core::types::{PlayerId, SpaceId};
use crate::entity::sprite::Sprite;
use crate::world::inventory::Inventory;

/// One of the cooperating players
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub sprite: Sprite,
    pub location: SpaceId,
    pub health: i32,
    /// Team tag; players sharing a tag cooperate. Defaults to own id.
    pub team: PlayerId,
    pub inventory: Inventory,
}

impl Player {
    pub fn new(
        id: PlayerId,
        name: impl Into<String>,
        location: SpaceId,
        health: i32,
        inventory_capacity: usize,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            sprite: Sprite::empty(),
            location,
            health,
            team: id,
            inventory: Inventory::new(inventory_capacity),
        }
    }

    pub fn with_sprite(mut self, sprite: Sprite) -> Self {
        self.sprite = sprite;
        self
    }
}
