//! Action resolution: command transitions and combat arithmetic

pub mod combat;
pub mod engine;

pub use combat::{resolve_attack, AttackOutcome};
pub use engine::{ActionEngine, TeamPrompt};
