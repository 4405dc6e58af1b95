//! Native window adapters

mod desktop;

pub use desktop::DesktopOverlayWindow;
