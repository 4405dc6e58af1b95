//! In-process messaging

pub mod event_bus;

pub use event_bus::GameEventBus;
