//! World entities: spaces, links, objects, characters, players

pub mod character;
pub mod link;
pub mod object;
pub mod player;
pub mod space;
pub mod sprite;

pub use character::Character;
pub use link::Link;
pub use object::Object;
pub use player::Player;
pub use space::Space;
pub use sprite::Sprite;
