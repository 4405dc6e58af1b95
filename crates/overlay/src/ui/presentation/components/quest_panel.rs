//! Quest panel - current quest, its details and step buttons

use dioxus::prelude::*;

use questlens_domain::QuestStep;

use crate::ui::presentation::state::quest_state::{quest_panel_view, QuestPanelView};
use crate::ui::presentation::state::{LoadStatus, QuestState};

#[component]
pub fn QuestPanel() -> Element {
    let mut state = use_context::<QuestState>();
    let status = *state.status.read();

    let view = match &*state.navigator.read() {
        Some(navigator) => quest_panel_view(navigator),
        None => QuestPanelView::empty(),
    };

    rsx! {
        section {
            id: "quest_overlay",
            class: "quest-panel",

            if status == LoadStatus::Loading {
                p { class: "quest-loading", "Loading quests…" }
            }

            h2 {
                id: "quest_name",
                class: "quest-name",
                {view.quest_name.clone().unwrap_or_default()}
            }

            if !view.details.is_empty() {
                dl { class: "quest-details",
                    for line in view.details.iter() {
                        div { key: "{line.label}", class: "quest-detail",
                            dt { "{line.label}" }
                            dd { "{line.value}" }
                        }
                    }
                }
            }

            if !view.goals.is_empty() {
                ul { class: "quest-goals",
                    for (i, goal) in view.goals.iter().enumerate() {
                        li { key: "{i}", "{goal}" }
                    }
                }
            }

            nav {
                id: "nav",
                class: "quest-nav",

                button {
                    id: "previous_quest_button",
                    class: "quest-step",
                    disabled: !view.can_previous,
                    onclick: move |_| state.step(QuestStep::Previous),
                    "‹"
                }

                div { class: "quest-progress",
                    progress {
                        id: "world_quest_progress",
                        value: "{view.progress_value}",
                        max: "{view.progress_max}",
                    }
                    span { class: "quest-count",
                        span { id: "current_quest_number", "{view.position}" }
                        " / "
                        span { id: "total_quest_number", "{view.total}" }
                    }
                }

                button {
                    id: "next_quest_button",
                    class: "quest-step",
                    disabled: !view.can_next,
                    onclick: move |_| state.step(QuestStep::Next),
                    "›"
                }
            }
        }
    }
}
