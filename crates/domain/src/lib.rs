//! QuestLens domain types.
//!
//! Pure data model for the quest overlay: worlds, quests, the synchronized
//! snapshot, cache version tokens, selection state and supported games.
//! Nothing here performs I/O.

pub mod aggregates;
pub mod entities;
pub mod error;
pub mod ids;
pub mod value_objects;

pub use aggregates::QuestSnapshot;
pub use entities::{Quest, World};
pub use error::DomainError;
pub use ids::{GameClassId, QuestSlug, WorldSlug};
pub use value_objects::{CacheVersion, QuestStep, RunningGameInfo, SelectionState, SupportedGames};
