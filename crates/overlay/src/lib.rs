//! QuestLens overlay crate.
//!
//! Contains the Dioxus desktop UI, application services and the
//! infrastructure adapters for the remote quest store, local storage, the
//! process watcher and the native window.

pub mod application;
pub mod infrastructure;
pub mod ports;
pub mod ui;

pub use ui::app;
pub use ui::presentation;
