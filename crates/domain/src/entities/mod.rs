//! Domain entities

mod quest;
mod world;

pub use quest::Quest;
pub use world::World;
