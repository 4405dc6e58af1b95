//! Game Event Bus - In-process fan-out of running-game notifications
//!
//! Listeners are keyed by a monotonically increasing id so a [`Subscription`]
//! can remove exactly its own listener. Publishing happens on the caller's
//! thread.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use questlens_domain::RunningGameInfo;

use crate::ports::outbound::{GameEventListener, Subscription};

type ListenerMap = BTreeMap<u64, GameEventListener>;

#[derive(Clone, Default)]
pub struct GameEventBus {
    listeners: Arc<Mutex<ListenerMap>>,
    next_id: Arc<AtomicU64>,
}

impl GameEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, listener: GameEventListener) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.lock().insert(id, listener);
        tracing::trace!(listener_id = id, "Game event listener registered");

        let listeners = Arc::clone(&self.listeners);
        Subscription::new(move || {
            listeners
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .remove(&id);
            tracing::trace!(listener_id = id, "Game event listener removed");
        })
    }

    /// Deliver `info` to every listener in registration order.
    pub fn publish(&self, info: RunningGameInfo) {
        let mut listeners = self.lock();
        tracing::debug!(
            class_id = %info.class_id,
            is_running = info.is_running,
            listeners = listeners.len(),
            "Publishing game event"
        );
        for listener in listeners.values_mut() {
            listener(info.clone());
        }
    }

    pub fn listener_count(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ListenerMap> {
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
