//! Game State Monitor - supported-game filter over the host process signal
//!
//! Notifications for games outside the allow-list are dropped before they
//! reach subscribers, so unrelated process events never affect windows.

use std::sync::Arc;

use questlens_domain::{RunningGameInfo, SupportedGames};

use crate::ports::outbound::{GameProcessPort, Subscription};

/// A supported game started or stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameTransition {
    Started(RunningGameInfo),
    Stopped(RunningGameInfo),
}

impl GameTransition {
    pub fn info(&self) -> &RunningGameInfo {
        match self {
            Self::Started(info) | Self::Stopped(info) => info,
        }
    }

    pub fn is_started(&self) -> bool {
        matches!(self, Self::Started(_))
    }
}

impl From<RunningGameInfo> for GameTransition {
    fn from(info: RunningGameInfo) -> Self {
        if info.is_running {
            Self::Started(info)
        } else {
            Self::Stopped(info)
        }
    }
}

#[derive(Clone)]
pub struct GameStateMonitor {
    process: Arc<dyn GameProcessPort>,
    supported: Arc<SupportedGames>,
}

impl GameStateMonitor {
    pub fn new(process: Arc<dyn GameProcessPort>, supported: SupportedGames) -> Self {
        if supported.is_empty() {
            tracing::warn!("No supported games configured, the overlay will never show in-game");
        }
        Self {
            process,
            supported: Arc::new(supported),
        }
    }

    /// True iff `info` is present and names a supported game.
    pub fn is_supported_game(&self, info: Option<&RunningGameInfo>) -> bool {
        info.is_some_and(|info| self.supported.contains(info))
    }

    /// Ask the host once whether a supported game is running right now.
    /// Query failures count as "not running".
    pub async fn is_running_supported_game(&self) -> bool {
        match self.process.running_game_info().await {
            Ok(info) => {
                tracing::debug!(?info, "Queried running game");
                info.as_ref()
                    .is_some_and(|info| info.is_running && self.supported.contains(info))
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to query running game");
                false
            }
        }
    }

    /// Start the host's process watching so `subscribe` listeners get events.
    pub fn start_watching(&self) {
        self.process.start_watching();
    }

    /// Receive start/stop transitions of supported games.
    pub fn subscribe(
        &self,
        mut listener: impl FnMut(GameTransition) + Send + 'static,
    ) -> Subscription {
        let supported = Arc::clone(&self.supported);
        self.process.subscribe(Box::new(move |info: RunningGameInfo| {
            if !supported.contains(&info) {
                tracing::trace!(class_id = %info.class_id, "Ignoring unsupported game event");
                return;
            }
            listener(GameTransition::from(info));
        }))
    }
}
