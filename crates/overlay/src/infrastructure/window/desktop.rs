//! Dioxus desktop window adapter
//!
//! Hiding uses `set_visible(false)` rather than closing the native window, so
//! the webview and its state survive until the game starts again.

use dioxus_desktop::DesktopContext;

use crate::ports::outbound::{WindowError, WindowPort, WindowState};

#[derive(Clone)]
pub struct DesktopOverlayWindow {
    name: String,
    context: DesktopContext,
}

impl DesktopOverlayWindow {
    pub fn new(name: impl Into<String>, context: DesktopContext) -> Self {
        Self {
            name: name.into(),
            context,
        }
    }
}

impl WindowPort for DesktopOverlayWindow {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn restore(&self) -> Result<(), WindowError> {
        let window = &self.context.window;
        if window.is_minimized() {
            window.set_minimized(false);
        }
        window.set_visible(true);
        window.set_focus();
        Ok(())
    }

    fn close(&self) -> Result<(), WindowError> {
        self.context.window.set_visible(false);
        Ok(())
    }

    fn minimize(&self) -> Result<(), WindowError> {
        self.context.window.set_minimized(true);
        Ok(())
    }

    fn state(&self) -> WindowState {
        let window = &self.context.window;
        if !window.is_visible() {
            WindowState::Closed
        } else if window.is_minimized() {
            WindowState::Minimized
        } else {
            WindowState::Normal
        }
    }

    fn drag_move(&self) {
        self.context.drag();
    }

    fn exit(&self) {
        tracing::info!(window = %self.name, "Closing overlay");
        self.context.close();
    }
}
