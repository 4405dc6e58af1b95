//! Service providers for the presentation layer
//!
//! The composition root builds an [`OverlayServices`] bundle and hands it to
//! Dioxus as context. Components reach application services and ports through
//! the hooks below, never through infrastructure types.

use dioxus::prelude::*;
use std::rc::Rc;
use std::sync::Arc;

use crate::application::services::{DataSyncService, GameStateMonitor, VersionedCache};
use crate::ports::outbound::{QuestStorePort, StorageProvider, WindowPort};

/// Everything the UI needs from outside the Dioxus tree.
#[derive(Clone)]
pub struct OverlayServices {
    pub store: Arc<dyn QuestStorePort>,
    pub storage: Arc<dyn StorageProvider>,
    pub monitor: GameStateMonitor,
}

impl OverlayServices {
    pub fn new(
        store: Arc<dyn QuestStorePort>,
        storage: Arc<dyn StorageProvider>,
        monitor: GameStateMonitor,
    ) -> Self {
        Self {
            store,
            storage,
            monitor,
        }
    }

    /// A sync service over the shared store and storage.
    pub fn data_sync(&self) -> DataSyncService {
        DataSyncService::new(
            Arc::clone(&self.store),
            VersionedCache::new(Arc::clone(&self.storage)),
        )
    }
}

/// The window this UI is rendered into.
pub type OverlayWindow = Rc<dyn WindowPort>;

/// Builds the [`OverlayWindow`] once the desktop window exists.
#[derive(Clone, Copy)]
pub struct WindowFactory(pub fn() -> OverlayWindow);

/// Hook to access the service bundle from context
pub fn use_overlay_services() -> OverlayServices {
    use_context::<OverlayServices>()
}

/// Hook to access the overlay window from context
pub fn use_overlay_window() -> OverlayWindow {
    use_context::<OverlayWindow>()
}
