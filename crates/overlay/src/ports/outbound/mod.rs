//! Outbound ports - Interfaces for external services
//!
//! These ports define the contracts that infrastructure adapters must implement,
//! allowing application services to interact with external systems without
//! depending on concrete implementations.

pub mod game_process_port;
pub mod platform;
pub mod quest_store_port;
pub mod window_port;

pub use game_process_port::{GameEventListener, GameProcessPort, ProcessQueryError, Subscription};
pub use platform::{storage_keys, StorageProvider};
pub use quest_store_port::{QuestStorePort, RemoteFetchError};
pub use window_port::{WindowError, WindowPort, WindowState};

#[cfg(test)]
pub use game_process_port::MockGameProcessPort;
#[cfg(test)]
pub use quest_store_port::MockQuestStorePort;
#[cfg(test)]
pub use window_port::MockWindowPort;
