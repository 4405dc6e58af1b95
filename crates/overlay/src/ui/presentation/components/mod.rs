//! Overlay components

pub mod header;
pub mod quest_panel;
pub mod world_selector;

pub use header::WindowHeader;
pub use quest_panel::QuestPanel;
pub use world_selector::WorldSelector;
