//! Platform abstraction ports
//!
//! These traits abstract platform-specific operations so that:
//! 1. Application code remains platform-agnostic
//! 2. Platform-specific code is isolated in infrastructure
//! 3. Code becomes easily testable with in-memory implementations

/// Persistent storage abstraction (flat string key/value store)
#[cfg_attr(test, mockall::automock)]
pub trait StorageProvider: Send + Sync {
    /// Save a string value with the given key
    fn save(&self, key: &str, value: &str);

    /// Load a string value by key, returns None if not found
    fn load(&self, key: &str) -> Option<String>;

    /// Remove a value by key
    fn remove(&self, key: &str);
}

/// Storage key constants
///
/// These are kept in the ports layer as they define the contract for
/// what keys are used across the application.
pub mod storage_keys {
    /// Version token of the materialized snapshot.
    pub const DATA_VERSION: &str = "overlay_data_version";
    /// Serialized world/quest snapshot envelope.
    pub const WORLDS: &str = "questlens_worlds";
    /// Last selected world slug.
    pub const SELECTED_WORLD: &str = "selectedWorld";
    /// Last selected zero-based quest index.
    pub const SELECTED_QUEST: &str = "selectedQuestNumber";
}
