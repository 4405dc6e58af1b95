//! QuestLens overlay - composition root binary.

use std::rc::Rc;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use questlens_overlay::application::services::GameStateMonitor;
use questlens_overlay::infrastructure::config::OverlayConfig;
use questlens_overlay::infrastructure::platform::DesktopStorageProvider;
use questlens_overlay::infrastructure::process_watch::SysinfoGameWatcher;
use questlens_overlay::infrastructure::supabase::SupabaseQuestStore;
use questlens_overlay::infrastructure::window::DesktopOverlayWindow;
use questlens_overlay::ports::outbound::{GameProcessPort, QuestStorePort, StorageProvider};
use questlens_overlay::presentation::{OverlayServices, OverlayWindow, WindowFactory};

const IN_GAME_WINDOW: &str = "in_game";

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "questlens_overlay=debug,dioxus=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting QuestLens overlay");

    let config = OverlayConfig::from_env()?;

    // Storage
    let storage = match &config.storage_path {
        Some(path) => DesktopStorageProvider::at_path(path),
        None => DesktopStorageProvider::new(),
    };
    tracing::info!(path = %storage.path().display(), "Using local storage");
    let storage: Arc<dyn StorageProvider> = Arc::new(storage);

    // Remote store
    let store: Arc<dyn QuestStorePort> = Arc::new(SupabaseQuestStore::new(
        &config.supabase_url,
        config.supabase_anon_key.clone(),
        config.version_key.clone(),
    )?);

    // Game detection
    let watcher: Arc<dyn GameProcessPort> =
        Arc::new(SysinfoGameWatcher::new(config.games.clone(), config.poll_ms));
    let monitor = GameStateMonitor::new(watcher, config.supported_games.clone());

    // Launch Dioxus
    let css = load_overlay_css();
    let head = format!("<style>{}</style>", css);
    let window = dioxus_desktop::WindowBuilder::new()
        .with_title("QuestLens")
        .with_transparent(true)
        .with_decorations(false)
        .with_always_on_top(true)
        .with_visible(false)
        .with_inner_size(dioxus_desktop::LogicalSize::new(360.0, 540.0));
    let cfg = dioxus_desktop::Config::new()
        .with_window(window)
        .with_custom_head(head)
        .with_disable_context_menu(true);

    dioxus::LaunchBuilder::new()
        .with_cfg(cfg)
        .with_context(OverlayServices::new(store, storage, monitor))
        .with_context(WindowFactory(in_game_window))
        .launch(questlens_overlay::app);

    Ok(())
}

fn in_game_window() -> OverlayWindow {
    Rc::new(DesktopOverlayWindow::new(
        IN_GAME_WINDOW,
        dioxus_desktop::window(),
    ))
}

fn load_overlay_css() -> &'static str {
    include_str!("../assets/overlay.css")
}
