//! Non-player characters

use crate::core::types::{CharacterId, PlayerId};
use crate::entity::sprite::Sprite;

/// A friendly or hostile character
///
/// Characters have no location field; where they stand is derived from
/// space membership. Defeat is `health <= 0`; a defeated character's
/// `following` link is cleared at the point damage is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    pub sprite: Sprite,
    pub dead_sprite: Sprite,
    pub health: i32,
    pub friendly: bool,
    pub following: Option<PlayerId>,
    messages: Vec<String>,
    message_cursor: usize,
}

impl Character {
    pub fn new(id: CharacterId, name: impl Into<String>, health: i32, friendly: bool) -> Self {
        Self {
            id,
            name: name.into(),
            sprite: Sprite::empty(),
            dead_sprite: Sprite::empty(),
            health,
            friendly,
            following: None,
            messages: Vec::new(),
            message_cursor: 0,
        }
    }

    pub fn with_sprites(mut self, sprite: Sprite, dead_sprite: Sprite) -> Self {
        self.sprite = sprite;
        self.dead_sprite = dead_sprite;
        self
    }

    pub fn with_messages(mut self, messages: Vec<String>) -> Self {
        self.messages = messages;
        self
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Next chat line, cycling over the queue; None when there are no lines
    pub fn next_message(&mut self) -> Option<String> {
        if self.messages.is_empty() {
            return None;
        }
        let msg = self.messages[self.message_cursor % self.messages.len()].clone();
        self.message_cursor = (self.message_cursor + 1) % self.messages.len();
        Some(msg)
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn message_cursor(&self) -> usize {
        self.message_cursor
    }

    /// Restore a persisted read cursor (clamped to the queue length)
    pub fn set_message_cursor(&mut self, cursor: usize) {
        if self.messages.is_empty() {
            self.message_cursor = 0;
        } else {
            self.message_cursor = cursor % self.messages.len();
        }
    }
}
