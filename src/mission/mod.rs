//! The ten-stage campaign state machine

pub mod campaign;
pub mod engine;
pub mod script;

pub use campaign::{MissionCode, MissionState};
pub use engine::MissionEngine;
