//! Persistence: the wire format, save writer and bulk loader

pub mod reader;
pub mod record;
pub mod writer;

pub use reader::{load_game, parse_game};
pub use writer::{save_game, serialize_game};
