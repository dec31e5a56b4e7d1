//! Save serialization
//!
//! Walks the game state in a fixed order (objects, players, turn,
//! spaces, characters, links, per-player interface, mission) and writes
//! one record per line. Re-serializing a freshly loaded state
//! reproduces the file byte for byte, because entity vectors preserve
//! record order.

use std::path::Path;

use crate::command::CommandRecord;
use crate::entity::Sprite;
use crate::game::GameState;
use crate::persist::record::{flag, Record, RecordTag};

/// Serialize the whole game state to the wire format
pub fn serialize_game(state: &GameState) -> String {
    let mut out = String::new();
    let world = &state.world;

    for object in world.objects() {
        let mut record = Record::new(RecordTag::Object);
        record.push(object.id.0.to_string());
        record.push(object.name.clone());
        record.push(match world.object_location(object.id) {
            Some(space) => space.0.to_string(),
            None => String::new(),
        });
        record.push(object.description.clone());
        record.push(object.sprite.first_row());
        record.push(object.health_delta.to_string());
        record.push(flag(object.movable));
        record.push(opt_id(object.depends_on.map(|d| d.0)));
        record.push(opt_id(object.opens.map(|l| l.0)));
        push_line(&mut out, &record);
    }

    for player in world.players() {
        let mut record = Record::new(RecordTag::Player);
        record.push(player.id.0.to_string());
        record.push(player.name.clone());
        record.push(player.sprite.first_row());
        record.push(player.location.0.to_string());
        record.push(player.health.to_string());
        record.push(player.inventory.capacity().to_string());
        record.push(player.team.0.to_string());
        record.push(
            player
                .inventory
                .ids()
                .iter()
                .map(|id| id.0.to_string())
                .collect::<Vec<_>>()
                .join(","),
        );
        push_line(&mut out, &record);
    }

    let mut record = Record::new(RecordTag::Turn);
    record.push(state.turn.to_string());
    record.push(flag(world.lights_on));
    push_line(&mut out, &record);

    for space in world.spaces() {
        let mut record = Record::new(RecordTag::Space);
        record.push(space.id.0.to_string());
        record.push(space.name.clone());
        for row in 0..Sprite::SPACE_ROWS {
            record.push(
                space
                    .sprite
                    .rows()
                    .get(row)
                    .map(String::as_str)
                    .unwrap_or(""),
            );
        }
        record.push(flag(space.discovered));
        push_line(&mut out, &record);
    }

    for character in world.characters() {
        let mut record = Record::new(RecordTag::Character);
        record.push(character.id.0.to_string());
        record.push(character.name.clone());
        record.push(character.sprite.first_row());
        record.push(character.dead_sprite.first_row());
        record.push(match world.character_location(character.id) {
            Some(space) => space.0.to_string(),
            None => String::new(),
        });
        record.push(character.health.to_string());
        record.push(flag(character.friendly));
        record.push(opt_id(character.following.map(|p| p.0)));
        record.push(character.message_cursor().to_string());
        for message in character.messages() {
            record.push(message.clone());
        }
        push_line(&mut out, &record);
    }

    for link in world.links() {
        let mut record = Record::new(RecordTag::Link);
        record.push(link.id.0.to_string());
        record.push(link.name.clone());
        record.push(link.origin.0.to_string());
        record.push(link.destination.0.to_string());
        record.push(link.direction.as_str());
        record.push(flag(link.is_open));
        push_line(&mut out, &record);
    }

    for (index, history) in state.histories.iter().enumerate() {
        let mut record = Record::new(RecordTag::Interface);
        record.push(index.to_string());
        let mut slots = history.entries();
        for _ in 0..crate::command::HISTORY_DEPTH {
            record.push(slots.next().map(format_command).unwrap_or_default());
        }
        record.push(history.display.message.clone());
        record.push(history.display.description.clone());
        record.push(history.display.objective.clone());
        record.push(flag(history.display.show_message));
        push_line(&mut out, &record);
    }

    let mut record = Record::new(RecordTag::Mission);
    record.push(state.mission.code.as_str());
    record.push(state.mission.step.to_string());
    record.push(state.mission.dialogue_cursor.to_string());
    record.push(state.mission.objective_cursor.to_string());
    record.push(flag(state.mission.campaign_complete));
    push_line(&mut out, &record);

    out
}

/// Write the game state to a file
pub fn save_game(state: &GameState, path: &Path) -> crate::core::error::Result<()> {
    std::fs::write(path, serialize_game(state))?;
    tracing::info!(path = %path.display(), "game saved");
    Ok(())
}

fn push_line(out: &mut String, record: &Record) {
    out.push_str(&record.to_line());
    out.push('\n');
}

fn opt_id(id: Option<u32>) -> String {
    id.map(|v| v.to_string()).unwrap_or_default()
}

/// "keyword [arg0 [arg1]] OK|ERROR"
fn format_command(record: &CommandRecord) -> String {
    let mut s = String::from(record.command.code.keyword());
    if !record.command.arg0.is_empty() {
        s.push(' ');
        s.push_str(&record.command.arg0);
    }
    if !record.command.arg1.is_empty() {
        s.push(' ');
        s.push_str(&record.command.arg1);
    }
    s.push(' ');
    s.push_str(if record.success { "OK" } else { "ERROR" });
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{Command, CommandCode};

    #[test]
    fn test_format_command_variants() {
        let with_two = CommandRecord {
            command: Command::with_args(CommandCode::Open, "cellardoor", "cellarkey"),
            success: true,
        };
        assert_eq!(format_command(&with_two), "open cellardoor cellarkey OK");

        let bare_failure = CommandRecord {
            command: Command::new(CommandCode::Turn),
            success: false,
        };
        assert_eq!(format_command(&bare_failure), "turn ERROR");
    }
}
