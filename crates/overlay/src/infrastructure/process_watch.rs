//! Process watcher - detects supported games among running processes
//!
//! A catalog maps executable names to game class ids. A background task
//! rescans the process table on a fixed interval and publishes a
//! `RunningGameInfo` on the [`GameEventBus`] only when the detected game
//! changes. Switching straight from one game to another publishes a stop
//! for the old game before the start of the new one.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use sysinfo::{ProcessesToUpdate, System};
use tokio::task::{JoinError, JoinHandle};

use questlens_domain::{GameClassId, RunningGameInfo};

use super::messaging::GameEventBus;
use crate::ports::outbound::{GameEventListener, GameProcessPort, ProcessQueryError, Subscription};

pub const MIN_POLL_MS: u64 = 250;
pub const MAX_POLL_MS: u64 = 10_000;

/// One catalog entry: a game class and the executables that identify it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameDefinition {
    pub class_id: GameClassId,
    /// Lowercased executable names, e.g. `game.exe`.
    pub executables: Vec<String>,
}

impl GameDefinition {
    pub fn new<S: AsRef<str>>(class_id: GameClassId, executables: impl IntoIterator<Item = S>) -> Self {
        Self {
            class_id,
            executables: executables
                .into_iter()
                .map(|name| name.as_ref().trim().to_ascii_lowercase())
                .filter(|name| !name.is_empty())
                .collect(),
        }
    }

    fn matches(&self, process_name: &str, exe_name: Option<&str>) -> bool {
        self.executables
            .iter()
            .any(|candidate| candidate == process_name || exe_name == Some(candidate.as_str()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameCatalog {
    games: Vec<GameDefinition>,
}

impl GameCatalog {
    pub fn new(games: Vec<GameDefinition>) -> Self {
        Self { games }
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    pub fn class_ids(&self) -> impl Iterator<Item = GameClassId> + '_ {
        self.games.iter().map(|game| game.class_id)
    }

    /// First catalog game found among `(process name, exe file name)` pairs.
    /// Returns the class id and the process name as seen by the OS.
    pub fn detect<'a>(
        &self,
        processes: impl IntoIterator<Item = (&'a str, Option<&'a str>)>,
    ) -> Option<(GameClassId, String)> {
        for (name, exe) in processes {
            let name_lower = name.to_ascii_lowercase();
            let exe_lower = exe.map(str::to_ascii_lowercase);
            if let Some(game) = self
                .games
                .iter()
                .find(|game| game.matches(&name_lower, exe_lower.as_deref()))
            {
                return Some((game.class_id, name.to_string()));
            }
        }
        None
    }

    fn scan(&self, system: &mut System) -> Option<(GameClassId, String)> {
        system.refresh_processes(ProcessesToUpdate::All, true);

        let names: Vec<(String, Option<String>)> = system
            .processes()
            .values()
            .map(|process| {
                let exe = process
                    .exe()
                    .and_then(|path| path.file_name())
                    .map(|name| name.to_string_lossy().into_owned());
                (process.name().to_string_lossy().into_owned(), exe)
            })
            .collect();

        self.detect(
            names
                .iter()
                .map(|(name, exe)| (name.as_str(), exe.as_deref())),
        )
    }
}

/// Remembers the last detected game and turns scans into start/stop events.
#[derive(Debug, Default)]
pub struct GameTracker {
    current: Option<RunningGameInfo>,
}

impl GameTracker {
    pub fn current(&self) -> Option<&RunningGameInfo> {
        self.current.as_ref()
    }

    /// Feed one scan result; returns the events it implies, in order.
    pub fn observe(&mut self, detected: Option<(GameClassId, String)>) -> Vec<RunningGameInfo> {
        let unchanged = match (&self.current, &detected) {
            (Some(current), Some((class_id, _))) => current.class_id == *class_id,
            (None, None) => true,
            _ => false,
        };
        if unchanged {
            return Vec::new();
        }

        let mut events = Vec::with_capacity(2);
        if let Some(previous) = self.current.take() {
            events.push(RunningGameInfo::new(previous.class_id, false, previous.title));
        }
        if let Some((class_id, title)) = detected {
            let started = RunningGameInfo::new(class_id, true, title);
            self.current = Some(started.clone());
            events.push(started);
        }
        events
    }
}

/// Refreshing the process table blocks, so run it on the blocking pool and
/// hand the `System` back for the next scan.
async fn scan_blocking(
    catalog: Arc<GameCatalog>,
    mut system: System,
) -> Result<(System, Option<(GameClassId, String)>), JoinError> {
    tokio::task::spawn_blocking(move || {
        let detected = catalog.scan(&mut system);
        (system, detected)
    })
    .await
}

/// `GameProcessPort` backed by periodic `sysinfo` scans.
pub struct SysinfoGameWatcher {
    catalog: Arc<GameCatalog>,
    bus: GameEventBus,
    poll_interval: Duration,
    started: AtomicBool,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl SysinfoGameWatcher {
    pub fn new(catalog: GameCatalog, poll_ms: u64) -> Self {
        Self {
            catalog: Arc::new(catalog),
            bus: GameEventBus::new(),
            poll_interval: Duration::from_millis(poll_ms.clamp(MIN_POLL_MS, MAX_POLL_MS)),
            started: AtomicBool::new(false),
            task: Mutex::new(None),
        }
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    pub fn is_started(&self) -> bool {
        self.started.load(Ordering::SeqCst)
    }

    /// Spawn the polling task. Calling again while running does nothing.
    /// Must be called from within a tokio runtime.
    pub fn start(&self) {
        if self.started.swap(true, Ordering::SeqCst) {
            return;
        }
        if self.catalog.is_empty() {
            tracing::warn!("Game catalog is empty, process watcher will never detect a game");
        }

        let catalog = Arc::clone(&self.catalog);
        let bus = self.bus.clone();
        let interval = self.poll_interval;
        tracing::info!(poll_ms = interval.as_millis() as u64, "Starting process watcher");

        let handle = tokio::spawn(async move {
            let mut system = System::new();
            let mut tracker = GameTracker::default();
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                let detected = match scan_blocking(Arc::clone(&catalog), system).await {
                    Ok((returned, detected)) => {
                        system = returned;
                        detected
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Process scan task failed, skipping tick");
                        system = System::new();
                        continue;
                    }
                };
                for event in tracker.observe(detected) {
                    tracing::info!(
                        class_id = %event.class_id,
                        title = %event.title,
                        is_running = event.is_running,
                        "Detected game state change"
                    );
                    bus.publish(event);
                }
            }
        });

        *self.task.lock().unwrap_or_else(PoisonError::into_inner) = Some(handle);
    }

    /// Abort the polling task. A later `start` spawns a fresh one.
    pub fn stop(&self) {
        if let Some(handle) = self.task.lock().unwrap_or_else(PoisonError::into_inner).take() {
            handle.abort();
            tracing::info!("Stopped process watcher");
        }
        self.started.store(false, Ordering::SeqCst);
    }
}

impl Drop for SysinfoGameWatcher {
    fn drop(&mut self) {
        if let Some(handle) = self.task.get_mut().unwrap_or_else(PoisonError::into_inner).take() {
            handle.abort();
        }
    }
}

#[async_trait]
impl GameProcessPort for SysinfoGameWatcher {
    async fn running_game_info(&self) -> Result<Option<RunningGameInfo>, ProcessQueryError> {
        let (_, detected) = scan_blocking(Arc::clone(&self.catalog), System::new())
            .await
            .map_err(|e| ProcessQueryError(e.to_string()))?;

        Ok(detected.map(|(class_id, title)| RunningGameInfo::new(class_id, true, title)))
    }

    fn start_watching(&self) {
        self.start();
    }

    fn subscribe(&self, listener: GameEventListener) -> Subscription {
        self.bus.subscribe(listener)
    }
}
