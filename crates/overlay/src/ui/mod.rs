use dioxus::prelude::*;
use futures_util::StreamExt;

use crate::application::services::{GameTransition, QuestNavigator, WindowLifecycleController};

pub mod presentation;

use presentation::components::{QuestPanel, WindowHeader, WorldSelector};
use presentation::services::{use_overlay_services, WindowFactory};
use presentation::state::QuestState;

pub fn app() -> Element {
    rsx! {
        AppRoot {}
    }
}

#[component]
fn AppRoot() -> Element {
    // Provided by the composition root (see `crates/overlay/src/main.rs`).
    let services = use_overlay_services();
    let factory = use_context::<WindowFactory>();

    // These must be created inside an active Dioxus runtime.
    let window = use_context_provider(|| (factory.0)());
    let mut state = use_context_provider(QuestState::new);
    let mut controller =
        use_signal(|| WindowLifecycleController::in_game_only(Box::new(window.clone())));

    // Sync the dataset once, then restore the last selection against it.
    {
        let services = services.clone();
        use_future(move || {
            let services = services.clone();
            async move {
                let mut sync = services.data_sync();
                let outcome = sync.sync().await;
                tracing::info!(?outcome, "Quest data ready");
                state.install(QuestNavigator::restore(
                    sync.snapshot(),
                    services.storage.clone(),
                ));
            }
        });
    }

    // Drive window visibility from supported-game transitions.
    use_future(move || {
        let monitor = services.monitor.clone();
        async move {
            let (tx, mut rx) = futures_channel::mpsc::unbounded::<GameTransition>();
            let _subscription = monitor.subscribe(move |transition| {
                if tx.unbounded_send(transition).is_err() {
                    tracing::debug!("Game transition dropped, UI is shutting down");
                }
            });
            monitor.start_watching();

            let running = monitor.is_running_supported_game().await;
            tracing::info!(running, "Initializing window visibility");
            controller.write().initialize(running);

            while let Some(transition) = rx.next().await {
                controller.write().on_transition(&transition);
            }
        }
    });

    rsx! {
        div {
            class: "overlay-root",
            onclick: move |_| state.outside_click(),

            WindowHeader { title: "QuestLens".to_string() }
            main { class: "overlay-body",
                WorldSelector {}
                QuestPanel {}
            }
        }
    }
}
