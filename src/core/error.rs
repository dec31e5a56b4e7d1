use crate::core::types::{Direction, SpaceId};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed record on line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    #[error("unknown record tag on line {line}: {tag}")]
    UnknownTag { line: usize, tag: String },

    #[error("{kind} capacity exceeded (limit {limit})")]
    CapacityExceeded { kind: &'static str, limit: usize },

    #[error("duplicate {kind} id {id}")]
    DuplicateId { kind: &'static str, id: u32 },

    #[error("duplicate {direction} link out of space {origin}")]
    DuplicateLink { origin: SpaceId, direction: Direction },

    #[error("dangling reference: {0}")]
    DanglingReference(String),

    #[error("world defines no players")]
    NoPlayers,

    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, GameError>;
