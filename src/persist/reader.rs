//! Bulk loading of world and save files
//!
//! Two-phase: tokenize every record into staging tables first, then
//! assemble through the `WorldModel` constructors so every structural
//! invariant (capacities, duplicate edges, dangling references,
//! exclusive object ownership) is re-validated on the way in.

use std::path::Path;

use ahash::AHashSet;

use crate::command::{Command, CommandCode, CommandHistory, CommandRecord};
use crate::core::config::GameConfig;
use crate::core::error::{GameError, Result};
use crate::core::types::{
    CharacterId, Direction, LinkId, ObjectId, PlayerId, SpaceId,
};
use crate::entity::{Character, Link, Object, Player, Space, Sprite};
use crate::game::GameState;
use crate::mission::{MissionCode, MissionState};
use crate::persist::record::{Record, RecordTag};
use crate::world::WorldModel;

/// Load a world or save file
pub fn load_game(path: &Path, config: GameConfig) -> Result<GameState> {
    let text = std::fs::read_to_string(path)?;
    let state = parse_game(&text, config)?;
    tracing::info!(
        path = %path.display(),
        spaces = state.world.spaces().len(),
        players = state.world.players().len(),
        "world loaded"
    );
    Ok(state)
}

/// Parse a full game state from wire-format text
pub fn parse_game(text: &str, config: GameConfig) -> Result<GameState> {
    let staged = stage_records(text)?;
    assemble(staged, config)
}

// === STAGING ===

struct StagedObject {
    object: Object,
    space: Option<u32>,
}

struct StagedPlayer {
    player: Player,
    inventory: Vec<u32>,
}

struct StagedCharacter {
    character: Character,
    space: u32,
    following: Option<u32>,
}

struct StagedInterface {
    player_index: usize,
    // Oldest last, the order the wire carries them
    commands: Vec<CommandRecord>,
    message: String,
    description: String,
    objective: String,
    show_message: bool,
    line: usize,
}

#[derive(Default)]
struct StagedGame {
    spaces: Vec<Space>,
    links: Vec<Link>,
    objects: Vec<StagedObject>,
    characters: Vec<StagedCharacter>,
    players: Vec<StagedPlayer>,
    interfaces: Vec<StagedInterface>,
    turn: usize,
    lights_on: bool,
    mission: Option<MissionState>,
}

fn stage_records(text: &str) -> Result<StagedGame> {
    let mut staged = StagedGame::default();

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let trimmed = raw.trim_end();
        // Blank lines and ';' comments are allowed in hand-authored files
        if trimmed.is_empty() || trimmed.starts_with(';') {
            continue;
        }
        let record = Record::parse(trimmed, line)?;
        match record.tag {
            RecordTag::Space => staged.spaces.push(stage_space(&record)?),
            RecordTag::Object => staged.objects.push(stage_object(&record)?),
            RecordTag::Player => staged.players.push(stage_player(&record)?),
            RecordTag::Character => staged.characters.push(stage_character(&record)?),
            RecordTag::Link => staged.links.push(stage_link(&record)?),
            RecordTag::Turn => {
                staged.turn = record.usize_field(0)?;
                staged.lights_on = match record.fields.len() {
                    0 | 1 => false,
                    _ => record.bool_field(1)?,
                };
            }
            RecordTag::Interface => staged.interfaces.push(stage_interface(&record)?),
            RecordTag::Mission => staged.mission = Some(stage_mission(&record)?),
        }
    }

    Ok(staged)
}

fn stage_space(record: &Record) -> Result<Space> {
    let id = SpaceId(record.u32_field(0)?);
    let name = record.field(1)?.to_string();
    let mut rows = Vec::with_capacity(Sprite::SPACE_ROWS);
    for row in 0..Sprite::SPACE_ROWS {
        rows.push(record.field(2 + row)?.to_string());
    }
    let mut space = Space::new(id, name, Sprite::new(rows));
    // Discovered flag is a save-file extension; world files may omit it
    space.discovered = match record.fields.len() {
        len if len > 2 + Sprite::SPACE_ROWS => record.bool_field(2 + Sprite::SPACE_ROWS)?,
        _ => false,
    };
    Ok(space)
}

fn stage_object(record: &Record) -> Result<StagedObject> {
    let id = ObjectId(record.u32_field(0)?);
    let name = record.field(1)?.to_string();
    let space = record.opt_u32_field(2)?;
    let description = record.field(3)?.to_string();
    let mut object = Object::new(id, name, description)
        .with_sprite(Sprite::single(record.field(4)?))
        .with_health_delta(record.i32_field(5)?);
    object.movable = record.bool_field(6)?;
    object.depends_on = record.opt_u32_field(7)?.map(ObjectId);
    object.opens = record.opt_u32_field(8)?.map(LinkId);
    Ok(StagedObject { object, space })
}

fn stage_player(record: &Record) -> Result<StagedPlayer> {
    let id = PlayerId(record.u32_field(0)?);
    let name = record.field(1)?.to_string();
    let sprite = Sprite::single(record.field(2)?);
    let location = SpaceId(record.u32_field(3)?);
    let health = record.i32_field(4)?;
    let capacity = record.usize_field(5)?;
    let mut player = Player::new(id, name, location, health, capacity).with_sprite(sprite);
    player.team = PlayerId(record.u32_field(6)?);
    let inventory = parse_id_list(record, 7)?;
    Ok(StagedPlayer { player, inventory })
}

fn stage_character(record: &Record) -> Result<StagedCharacter> {
    let id = CharacterId(record.u32_field(0)?);
    let name = record.field(1)?.to_string();
    let sprite = Sprite::single(record.field(2)?);
    let dead_sprite = Sprite::single(record.field(3)?);
    let space = record.u32_field(4)?;
    let health = record.i32_field(5)?;
    let friendly = record.bool_field(6)?;
    let following = record.opt_u32_field(7)?;
    let cursor = record.usize_field(8)?;
    let messages: Vec<String> = record.fields.get(9..).unwrap_or(&[]).to_vec();

    let mut character = Character::new(id, name, health, friendly)
        .with_sprites(sprite, dead_sprite)
        .with_messages(messages);
    character.set_message_cursor(cursor);
    Ok(StagedCharacter {
        character,
        space,
        following,
    })
}

fn stage_link(record: &Record) -> Result<Link> {
    let id = LinkId(record.u32_field(0)?);
    let name = record.field(1)?.to_string();
    let origin = SpaceId(record.u32_field(2)?);
    let destination = SpaceId(record.u32_field(3)?);
    let direction_text = record.field(4)?;
    let direction = Direction::parse(direction_text).ok_or(GameError::MalformedRecord {
        line: record.line,
        reason: format!("unknown direction {direction_text:?}"),
    })?;
    let mut link = Link::new(id, name, origin, destination, direction);
    link.is_open = record.bool_field(5)?;
    Ok(link)
}

fn stage_interface(record: &Record) -> Result<StagedInterface> {
    let player_index = record.usize_field(0)?;
    let mut commands = Vec::new();
    for slot in 0..crate::command::HISTORY_DEPTH {
        if let Some(parsed) = parse_command_field(record, 1 + slot)? {
            commands.push(parsed);
        }
    }
    Ok(StagedInterface {
        player_index,
        commands,
        message: record.field(4)?.to_string(),
        description: record.field(5)?.to_string(),
        objective: record.field(6)?.to_string(),
        show_message: record.bool_field(7)?,
        line: record.line,
    })
}

fn stage_mission(record: &Record) -> Result<MissionState> {
    let code_text = record.field(0)?;
    let code = MissionCode::parse(code_text).ok_or(GameError::MalformedRecord {
        line: record.line,
        reason: format!("unknown mission code {code_text:?}"),
    })?;
    Ok(MissionState {
        code,
        step: record.u32_field(1)?,
        dialogue_cursor: record.usize_field(2)?,
        objective_cursor: record.usize_field(3)?,
        campaign_complete: record.bool_field(4)?,
    })
}

/// Comma-joined id list field; empty means no ids
fn parse_id_list(record: &Record, index: usize) -> Result<Vec<u32>> {
    let raw = record.field(index)?;
    if raw.is_empty() {
        return Ok(Vec::new());
    }
    raw.split(',')
        .map(|part| {
            part.parse().map_err(|_| GameError::MalformedRecord {
                line: record.line,
                reason: format!("bad id list entry {part:?}"),
            })
        })
        .collect()
}

/// "keyword [arg0 [arg1]] OK|ERROR"; empty field means an unused slot
fn parse_command_field(record: &Record, index: usize) -> Result<Option<CommandRecord>> {
    let raw = record.field(index)?;
    if raw.is_empty() {
        return Ok(None);
    }
    let tokens: Vec<&str> = raw.split_whitespace().collect();
    if tokens.len() < 2 || tokens.len() > 4 {
        return Err(GameError::MalformedRecord {
            line: record.line,
            reason: format!("bad command field {raw:?}"),
        });
    }
    let code = CommandCode::from_keyword(tokens[0]).ok_or(GameError::MalformedRecord {
        line: record.line,
        reason: format!("unknown command keyword {:?}", tokens[0]),
    })?;
    let success = match tokens[tokens.len() - 1] {
        "OK" => true,
        "ERROR" => false,
        other => {
            return Err(GameError::MalformedRecord {
                line: record.line,
                reason: format!("bad command outcome {other:?}"),
            })
        }
    };
    let args = &tokens[1..tokens.len() - 1];
    let command = match args {
        [] => Command::new(code),
        [a] => Command::with_arg(code, *a),
        [a, b] => Command::with_args(code, *a, *b),
        _ => unreachable!("token count bounded above"),
    };
    Ok(Some(CommandRecord { command, success }))
}

// === ASSEMBLY ===

fn assemble(staged: StagedGame, config: GameConfig) -> Result<GameState> {
    let mut world = WorldModel::new(config);
    world.lights_on = staged.lights_on;

    for space in staged.spaces {
        world.add_space(space)?;
    }
    for link in staged.links {
        world.add_link(link)?;
    }

    for entry in &staged.objects {
        world.add_object(entry.object.clone())?;
    }
    let mut carried: AHashSet<u32> = AHashSet::new();
    for entry in &staged.objects {
        if let Some(space) = entry.space {
            world.place_object_in_space(entry.object.id, SpaceId(space))?;
        }
    }

    for entry in &staged.characters {
        world.add_character(entry.character.clone(), SpaceId(entry.space))?;
    }

    if staged.players.is_empty() {
        return Err(GameError::NoPlayers);
    }
    for entry in &staged.players {
        world.add_player(entry.player.clone())?;
    }

    // Inventories: exclusive ownership against spaces and other players
    for entry in &staged.players {
        for &raw_id in &entry.inventory {
            let id = ObjectId(raw_id);
            if world.object(id).is_none() {
                return Err(GameError::DanglingReference(format!(
                    "player {} carries unknown object {raw_id}",
                    entry.player.id
                )));
            }
            if world.object_location(id).is_some() {
                return Err(GameError::DanglingReference(format!(
                    "object {raw_id} is both in a space and an inventory"
                )));
            }
            if !carried.insert(raw_id) {
                return Err(GameError::DanglingReference(format!(
                    "object {raw_id} is carried by two players"
                )));
            }
            let inserted = world
                .player_mut(entry.player.id)
                .map(|p| p.inventory.insert(id))
                .unwrap_or(false);
            if !inserted {
                return Err(GameError::CapacityExceeded {
                    kind: "inventory",
                    limit: entry.player.inventory.capacity(),
                });
            }
        }
    }

    // Every object must live somewhere
    for object in world.objects() {
        if world.object_location(object.id).is_none() && !carried.contains(&object.id.0) {
            return Err(GameError::DanglingReference(format!(
                "object {} has no location",
                object.id
            )));
        }
    }

    // Cross-references
    for object in world.objects() {
        if let Some(dependency) = object.depends_on {
            if world.object(dependency).is_none() {
                return Err(GameError::DanglingReference(format!(
                    "object {} depends on unknown object {dependency}",
                    object.id
                )));
            }
        }
        if let Some(link) = object.opens {
            if world.link(link).is_none() {
                return Err(GameError::DanglingReference(format!(
                    "object {} opens unknown link {link}",
                    object.id
                )));
            }
        }
    }
    for entry in &staged.characters {
        if let Some(raw_player) = entry.following {
            let pid = PlayerId(raw_player);
            if world.player(pid).is_none() {
                return Err(GameError::DanglingReference(format!(
                    "character {} follows unknown player {raw_player}",
                    entry.character.id
                )));
            }
            if let Some(character) = world.character_mut(entry.character.id) {
                character.following = Some(pid);
            }
        }
    }

    if staged.turn >= world.players().len() {
        return Err(GameError::DanglingReference(format!(
            "turn index {} out of range",
            staged.turn
        )));
    }

    let mut state = GameState::new(world);
    state.turn = staged.turn;
    if let Some(mission) = staged.mission {
        state.mission = mission;
    }

    for interface in staged.interfaces {
        if interface.player_index >= state.histories.len() {
            return Err(GameError::MalformedRecord {
                line: interface.line,
                reason: format!("interface for unknown player {}", interface.player_index),
            });
        }
        let mut history = CommandHistory::new();
        // Wire order is newest first; replay oldest first to rebuild the ring
        for record in interface.commands.into_iter().rev() {
            history.record(record.command, record.success);
        }
        history.display.message = interface.message;
        history.display.description = interface.description;
        history.display.objective = interface.objective;
        history.display.show_message = interface.show_message;
        state.histories[interface.player_index] = history;
    }

    Ok(state)
}
