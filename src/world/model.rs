//! The world model: owner of all entities and graph queries
//!
//! `WorldModel` owns every space, link, object, character and player for
//! the process lifetime. The action and mission engines mutate entities
//! in place through the accessors here; persistence replaces the whole
//! model wholesale on load.

use crate::core::config::GameConfig;
use crate::core::error::{GameError, Result};
use crate::core::types::{CharacterId, Direction, LinkId, ObjectId, PlayerId, SpaceId};
use crate::entity::{Character, Link, Object, Player, Space};

/// Owner of the entity graph
///
/// Storage is plain insertion-ordered vectors; at this scale linear
/// scans are the simplest correct lookup, and insertion order doubles as
/// the serialization order for reproducible saves.
#[derive(Debug, Clone)]
pub struct WorldModel {
    config: GameConfig,
    spaces: Vec<Space>,
    links: Vec<Link>,
    objects: Vec<Object>,
    characters: Vec<Character>,
    players: Vec<Player>,
    /// Global lighting flag, toggled by the generator mission
    pub lights_on: bool,
}

impl WorldModel {
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            spaces: Vec::new(),
            links: Vec::new(),
            objects: Vec::new(),
            characters: Vec::new(),
            players: Vec::new(),
            lights_on: false,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    // === CONSTRUCTION ===

    pub fn add_space(&mut self, space: Space) -> Result<()> {
        if self.spaces.len() >= self.config.max_spaces {
            return Err(GameError::CapacityExceeded {
                kind: "space",
                limit: self.config.max_spaces,
            });
        }
        if self.space(space.id).is_some() {
            return Err(GameError::DuplicateId {
                kind: "space",
                id: space.id.0,
            });
        }
        self.spaces.push(space);
        Ok(())
    }

    /// Add a link; duplicate directional edges out of a space are an error
    pub fn add_link(&mut self, link: Link) -> Result<()> {
        if self.links.len() >= self.config.max_links {
            return Err(GameError::CapacityExceeded {
                kind: "link",
                limit: self.config.max_links,
            });
        }
        if self.link(link.id).is_some() {
            return Err(GameError::DuplicateId {
                kind: "link",
                id: link.id.0,
            });
        }
        if self.space(link.origin).is_none() {
            return Err(GameError::DanglingReference(format!(
                "link {} origin space {} does not exist",
                link.id, link.origin
            )));
        }
        if self.space(link.destination).is_none() {
            return Err(GameError::DanglingReference(format!(
                "link {} destination space {} does not exist",
                link.id, link.destination
            )));
        }
        if self.link_from(link.origin, link.direction).is_some() {
            return Err(GameError::DuplicateLink {
                origin: link.origin,
                direction: link.direction,
            });
        }
        self.links.push(link);
        Ok(())
    }

    /// Add an object to the roster; placement happens separately
    pub fn add_object(&mut self, object: Object) -> Result<()> {
        if self.objects.len() >= self.config.max_objects {
            return Err(GameError::CapacityExceeded {
                kind: "object",
                limit: self.config.max_objects,
            });
        }
        if self.object(object.id).is_some() {
            return Err(GameError::DuplicateId {
                kind: "object",
                id: object.id.0,
            });
        }
        self.objects.push(object);
        Ok(())
    }

    /// Put a rostered object into a space's set
    pub fn place_object_in_space(&mut self, id: ObjectId, space_id: SpaceId) -> Result<()> {
        if self.object(id).is_none() {
            return Err(GameError::DanglingReference(format!(
                "object {id} is not part of the world"
            )));
        }
        match self.space_mut(space_id) {
            Some(space) => {
                space.objects.insert(id);
                Ok(())
            }
            None => Err(GameError::DanglingReference(format!(
                "object {id} placed in missing space {space_id}"
            ))),
        }
    }

    pub fn add_character(&mut self, character: Character, location: SpaceId) -> Result<()> {
        if self.characters.len() >= self.config.max_characters {
            return Err(GameError::CapacityExceeded {
                kind: "character",
                limit: self.config.max_characters,
            });
        }
        if self.character(character.id).is_some() {
            return Err(GameError::DuplicateId {
                kind: "character",
                id: character.id.0,
            });
        }
        let id = character.id;
        match self.space_mut(location) {
            Some(space) => {
                space.characters.insert(id);
            }
            None => {
                return Err(GameError::DanglingReference(format!(
                    "character {id} placed in missing space {location}"
                )))
            }
        }
        self.characters.push(character);
        Ok(())
    }

    pub fn add_player(&mut self, player: Player) -> Result<()> {
        if self.players.len() >= self.config.max_players {
            return Err(GameError::CapacityExceeded {
                kind: "player",
                limit: self.config.max_players,
            });
        }
        if self.player(player.id).is_some() {
            return Err(GameError::DuplicateId {
                kind: "player",
                id: player.id.0,
            });
        }
        if self.space(player.location).is_none() {
            return Err(GameError::DanglingReference(format!(
                "player {} starts in missing space {}",
                player.id, player.location
            )));
        }
        self.players.push(player);
        Ok(())
    }

    /// Fresh character id for mission spawns (one past the current max)
    pub fn next_character_id(&self) -> CharacterId {
        let max = self.characters.iter().map(|c| c.id.0).max().unwrap_or(0);
        CharacterId(max + 1)
    }

    // === LOOKUP ===

    pub fn spaces(&self) -> &[Space] {
        &self.spaces
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn objects(&self) -> &[Object] {
        &self.objects
    }

    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn space(&self, id: SpaceId) -> Option<&Space> {
        self.spaces.iter().find(|s| s.id == id)
    }

    pub fn space_mut(&mut self, id: SpaceId) -> Option<&mut Space> {
        self.spaces.iter_mut().find(|s| s.id == id)
    }

    pub fn link(&self, id: LinkId) -> Option<&Link> {
        self.links.iter().find(|l| l.id == id)
    }

    pub fn link_mut(&mut self, id: LinkId) -> Option<&mut Link> {
        self.links.iter_mut().find(|l| l.id == id)
    }

    pub fn object(&self, id: ObjectId) -> Option<&Object> {
        self.objects.iter().find(|o| o.id == id)
    }

    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut Object> {
        self.objects.iter_mut().find(|o| o.id == id)
    }

    pub fn character(&self, id: CharacterId) -> Option<&Character> {
        self.characters.iter().find(|c| c.id == id)
    }

    pub fn character_mut(&mut self, id: CharacterId) -> Option<&mut Character> {
        self.characters.iter_mut().find(|c| c.id == id)
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    pub fn space_by_name(&self, name: &str) -> Option<SpaceId> {
        self.spaces
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
            .map(|s| s.id)
    }

    pub fn player_by_name(&self, name: &str) -> Option<PlayerId> {
        self.players
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
            .map(|p| p.id)
    }

    pub fn character_by_name(&self, name: &str) -> Option<CharacterId> {
        self.characters
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
            .map(|c| c.id)
    }

    pub fn object_by_name(&self, name: &str) -> Option<ObjectId> {
        self.objects
            .iter()
            .find(|o| o.name.eq_ignore_ascii_case(name))
            .map(|o| o.id)
    }

    pub fn object_by_name_in_space(&self, space_id: SpaceId, name: &str) -> Option<ObjectId> {
        let space = self.space(space_id)?;
        space
            .objects
            .iter()
            .find(|&id| self.object_is_named(id, name))
    }

    pub fn object_in_inventory_by_name(&self, player_id: PlayerId, name: &str) -> Option<ObjectId> {
        let player = self.player(player_id)?;
        player
            .inventory
            .iter()
            .find(|&id| self.object_is_named(id, name))
    }

    pub fn character_by_name_in_space(&self, space_id: SpaceId, name: &str) -> Option<CharacterId> {
        let space = self.space(space_id)?;
        space.characters.iter().find(|&id| {
            self.character(id)
                .map(|c| c.name.eq_ignore_ascii_case(name))
                .unwrap_or(false)
        })
    }

    fn object_is_named(&self, id: ObjectId, name: &str) -> bool {
        self.object(id)
            .map(|o| o.name.eq_ignore_ascii_case(name))
            .unwrap_or(false)
    }

    // === GRAPH QUERIES ===

    pub fn link_from(&self, origin: SpaceId, direction: Direction) -> Option<&Link> {
        self.links
            .iter()
            .find(|l| l.origin == origin && l.direction == direction)
    }

    pub fn link_by_name_from(&self, origin: SpaceId, name: &str) -> Option<&Link> {
        self.links
            .iter()
            .find(|l| l.origin == origin && l.name.eq_ignore_ascii_case(name))
    }

    /// Destination reached by leaving `origin` in `direction`, gated or not
    pub fn get_connection(&self, origin: SpaceId, direction: Direction) -> Option<SpaceId> {
        self.link_from(origin, direction).map(|l| l.destination)
    }

    /// Whether the link out of `origin` in `direction` exists and is open
    pub fn connection_is_open(&self, origin: SpaceId, direction: Direction) -> bool {
        self.link_from(origin, direction)
            .map(|l| l.is_open)
            .unwrap_or(false)
    }

    // === DERIVED LOCATION ===

    /// Where an object sits, None while it is carried in an inventory
    pub fn object_location(&self, id: ObjectId) -> Option<SpaceId> {
        self.spaces
            .iter()
            .find(|s| s.objects.contains(id))
            .map(|s| s.id)
    }

    pub fn character_location(&self, id: CharacterId) -> Option<SpaceId> {
        self.spaces
            .iter()
            .find(|s| s.characters.contains(id))
            .map(|s| s.id)
    }

    // === RELATIONS ===

    /// Characters currently slaved to a player's movement
    pub fn followers_of(&self, player_id: PlayerId) -> Vec<CharacterId> {
        self.characters
            .iter()
            .filter(|c| c.following == Some(player_id))
            .map(|c| c.id)
            .collect()
    }

    /// Relocate a character between space sets
    pub fn move_character(&mut self, id: CharacterId, to: SpaceId) {
        if let Some(from) = self.character_location(id) {
            if from == to {
                return;
            }
            if let Some(space) = self.space_mut(from) {
                space.characters.remove(id);
            }
        }
        if let Some(space) = self.space_mut(to) {
            space.characters.insert(id);
        }
    }

    /// Remove an object from the game entirely: every space set, every
    /// inventory, and the roster
    pub fn despawn_object(&mut self, id: ObjectId) {
        for space in &mut self.spaces {
            space.objects.remove(id);
        }
        for player in &mut self.players {
            player.inventory.remove(id);
        }
        self.objects.retain(|o| o.id != id);
    }
}
