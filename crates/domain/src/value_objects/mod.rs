//! Value objects - Immutable objects defined by their attributes

mod cache_version;
mod game;
mod selection;

pub use cache_version::CacheVersion;
pub use game::{RunningGameInfo, SupportedGames};
pub use selection::{QuestStep, SelectionState};
