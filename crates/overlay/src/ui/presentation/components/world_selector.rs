//! World Selector Component
//!
//! The selected-world button toggles an arc of the other worlds around it.
//! Clicks inside the selector stop propagating so the overlay root can treat
//! any click that reaches it as an outside click.

use dioxus::prelude::*;

use crate::ui::presentation::state::quest_state::{selector_view, SelectorView};
use crate::ui::presentation::state::QuestState;

#[component]
pub fn WorldSelector() -> Element {
    let mut state = use_context::<QuestState>();

    let view = match &*state.navigator.read() {
        Some(navigator) => selector_view(navigator),
        None => SelectorView {
            selected: None,
            is_open: false,
            options: Vec::new(),
        },
    };

    let container_class = if view.is_open {
        "world-selector open"
    } else {
        "world-selector"
    };
    let button_class = if view.is_open {
        "world-card selected-world active"
    } else {
        "world-card selected-world"
    };

    rsx! {
        div {
            id: "world_selector_container",
            class: "{container_class}",
            onclick: move |evt: MouseEvent| evt.stop_propagation(),

            button {
                id: "selected_world",
                class: "{button_class}",
                onclick: move |evt: MouseEvent| {
                    evt.stop_propagation();
                    state.toggle_picker();
                },
                if let Some(selected) = view.selected.as_ref() {
                    img { src: "{selected.icon}", alt: "{selected.display_name}" }
                    p { class: "world-name", "{selected.display_name}" }
                }
            }

            div {
                id: "world_options",
                class: "world-options",
                for (card, placement) in view.options.into_iter() {
                    button {
                        key: "{card.slug}",
                        class: "world-card world-option",
                        style: "{placement.style()}",
                        onclick: {
                            let slug = card.slug.clone();
                            move |evt: MouseEvent| {
                                evt.stop_propagation();
                                state.select_world(&slug);
                            }
                        },
                        img { src: "{card.icon}", alt: "{card.display_name}" }
                        p { "{card.display_name}" }
                    }
                }
            }
        }
    }
}
