//! UI state held in Dioxus signals

pub mod quest_state;

pub use quest_state::{LoadStatus, QuestState};
