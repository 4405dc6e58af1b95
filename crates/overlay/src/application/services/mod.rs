//! Application services
//!
//! This module contains application services that implement use cases
//! for the overlay. Services depend on port traits, not concrete
//! infrastructure implementations.

pub mod data_sync_service;
pub mod game_state_monitor;
pub mod quest_navigator;
pub mod versioned_cache;
pub mod window_lifecycle;

pub use data_sync_service::{DataSyncService, SyncOutcome};
pub use game_state_monitor::{GameStateMonitor, GameTransition};
pub use quest_navigator::{QuestNavigator, QuestProgress};
pub use versioned_cache::{CacheError, VersionedCache};
pub use window_lifecycle::{Visibility, WindowLifecycleController, WindowRole};
