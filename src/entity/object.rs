//! Objects: portable and fixed items

use crate::core::types::{LinkId, ObjectId};
use crate::entity::sprite::Sprite;

/// An item that can sit in a space or a player's inventory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Object {
    pub id: ObjectId,
    pub name: String,
    pub description: String,
    pub sprite: Sprite,
    /// Health granted (positive) or removed (negative) when used; 0
    /// means the object is not usable
    pub health_delta: i32,
    pub movable: bool,
    /// This object cannot be picked up unless the dependency is already
    /// held, and the dependency cannot be dropped while this is held
    pub depends_on: Option<ObjectId>,
    /// Link this object opens when used against it (consuming the object)
    pub opens: Option<LinkId>,
}

impl Object {
    pub fn new(id: ObjectId, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            sprite: Sprite::empty(),
            health_delta: 0,
            movable: true,
            depends_on: None,
            opens: None,
        }
    }

    pub fn with_sprite(mut self, sprite: Sprite) -> Self {
        self.sprite = sprite;
        self
    }

    pub fn with_health_delta(mut self, delta: i32) -> Self {
        self.health_delta = delta;
        self
    }

    pub fn fixed(mut self) -> Self {
        self.movable = false;
        self
    }

    pub fn depending_on(mut self, dependency: ObjectId) -> Self {
        self.depends_on = Some(dependency);
        self
    }

    pub fn opening(mut self, link: LinkId) -> Self {
        self.opens = Some(link);
        self
    }

    /// Usable objects have a nonzero health delta
    pub fn is_usable(&self) -> bool {
        self.health_delta != 0
    }
}
