//! Overlay port definitions.

pub mod outbound;
