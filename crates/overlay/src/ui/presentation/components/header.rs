//! Window header - drag handle with minimize and close buttons

use dioxus::prelude::*;

use crate::ui::presentation::services::use_overlay_window;

#[component]
pub fn WindowHeader(title: String) -> Element {
    let window = use_overlay_window();
    let drag_window = window.clone();
    let minimize_window = window.clone();

    rsx! {
        header {
            id: "header",
            class: "overlay-header",
            onmousedown: move |_| drag_window.drag_move(),

            span { class: "overlay-title", "{title}" }

            div {
                class: "overlay-window-controls",
                // Buttons must not start a drag.
                onmousedown: move |evt: MouseEvent| evt.stop_propagation(),

                button {
                    id: "minimizeButton",
                    class: "window-control",
                    title: "Minimize",
                    onclick: move |_| {
                        if let Err(e) = minimize_window.minimize() {
                            tracing::warn!(error = %e, "Failed to minimize overlay");
                        }
                    },
                    "–"
                }
                button {
                    id: "closeButton",
                    class: "window-control window-control-close",
                    title: "Close",
                    onclick: move |_| window.exit(),
                    "×"
                }
            }
        }
    }
}
