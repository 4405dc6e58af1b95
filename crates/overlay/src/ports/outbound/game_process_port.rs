//! Game Process Port - host signal for running games
//!
//! Two shapes of the same signal:
//! - pull: ask once which game is currently running
//! - push: receive a `RunningGameInfo` whenever a game starts or stops
//!
//! Push listeners are registered through `subscribe`, which hands back a
//! [`Subscription`]. Dropping or disposing the subscription unregisters the
//! listener.

use std::fmt;

use async_trait::async_trait;
use questlens_domain::RunningGameInfo;

/// Callback invoked for every start/stop notification.
pub type GameEventListener = Box<dyn FnMut(RunningGameInfo) + Send + 'static>;

/// Failure to query the host for the running game.
#[derive(Debug, Clone, thiserror::Error)]
#[error("Running game query failed: {0}")]
pub struct ProcessQueryError(pub String);

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GameProcessPort: Send + Sync {
    /// The game currently known to the host, if any.
    async fn running_game_info(&self) -> Result<Option<RunningGameInfo>, ProcessQueryError>;

    /// Begin producing push notifications. Calling again does nothing.
    fn start_watching(&self);

    /// Register a listener for start/stop notifications.
    fn subscribe(&self, listener: GameEventListener) -> Subscription;
}

/// Handle for an active listener registration.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce() + Send + 'static>>,
}

impl Subscription {
    pub fn new(unsubscribe: impl FnOnce() + Send + 'static) -> Self {
        Self {
            unsubscribe: Some(Box::new(unsubscribe)),
        }
    }

    /// A subscription with nothing to release.
    pub fn empty() -> Self {
        Self { unsubscribe: None }
    }

    /// Unregister the listener now.
    pub fn dispose(mut self) {
        self.release();
    }

    pub fn is_active(&self) -> bool {
        self.unsubscribe.is_some()
    }

    fn release(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    #[test]
    fn dispose_runs_unsubscribe_once() {
        let calls = Arc::new(AtomicU32::new(0));
        let calls_clone = Arc::clone(&calls);
        let subscription = Subscription::new(move || {
            calls_clone.fetch_add(1, Ordering::SeqCst);
        });

        assert!(subscription.is_active());
        subscription.dispose();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn drop_unsubscribes() {
        let calls = Arc::new(AtomicU32::new(0));
        {
            let calls_clone = Arc::clone(&calls);
            let _subscription = Subscription::new(move || {
                calls_clone.fetch_add(1, Ordering::SeqCst);
            });
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
