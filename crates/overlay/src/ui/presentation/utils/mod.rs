//! Presentation utilities - pure layout and formatting helpers for components

pub mod arc_layout;

pub use arc_layout::{layout, picker_placements, ArcPosition, PickerPlacement};
