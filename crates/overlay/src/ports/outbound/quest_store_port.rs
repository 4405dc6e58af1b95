//! Quest Store Port - read-only access to the remote reference dataset
//!
//! The remote store publishes three things: the list of worlds, the quests of
//! each world and a single metadata row holding the authoritative version
//! token. Adapters return rows already ordered by `story_order` ascending.

use async_trait::async_trait;
use questlens_domain::{CacheVersion, Quest, World, WorldSlug};

/// Remote store failures.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RemoteFetchError {
    /// The request never produced a response.
    #[error("Request to {operation} failed: {message}")]
    Transport {
        operation: &'static str,
        message: String,
    },

    /// The store answered with a non-success status.
    #[error("{operation} returned HTTP {status}: {body}")]
    Status {
        operation: &'static str,
        status: u16,
        body: String,
    },

    /// The response body did not match the expected row shape.
    #[error("Failed to decode {operation} response: {message}")]
    Decode {
        operation: &'static str,
        message: String,
    },

    /// The configured store URL cannot be used.
    #[error("Invalid store URL: {0}")]
    InvalidUrl(String),
}

impl RemoteFetchError {
    pub fn transport(operation: &'static str, message: impl ToString) -> Self {
        Self::Transport {
            operation,
            message: message.to_string(),
        }
    }

    pub fn decode(operation: &'static str, message: impl ToString) -> Self {
        Self::Decode {
            operation,
            message: message.to_string(),
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestStorePort: Send + Sync {
    /// Authoritative version token, or `None` when the metadata row is missing.
    async fn current_version(&self) -> Result<Option<CacheVersion>, RemoteFetchError>;

    /// All worlds ordered by `story_order` ascending, without quests attached.
    async fn list_worlds(&self) -> Result<Vec<World>, RemoteFetchError>;

    /// Quests whose `world_slug` equals `world`, ordered by `story_order` ascending.
    async fn list_quests(&self, world: &WorldSlug) -> Result<Vec<Quest>, RemoteFetchError>;
}
