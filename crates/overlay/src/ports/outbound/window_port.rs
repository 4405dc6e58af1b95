//! Window Port - native overlay window primitives
//!
//! Implementations live on the UI thread, so the trait does not require
//! `Send + Sync`. Every operation must be safe to repeat: closing an already
//! closed window is not an error.

use std::rc::Rc;

/// Observable state of a native window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowState {
    Normal,
    Minimized,
    Closed,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum WindowError {
    #[error("Window operation {operation} failed: {message}")]
    Operation {
        operation: &'static str,
        message: String,
    },
}

#[cfg_attr(test, mockall::automock)]
pub trait WindowPort {
    /// Window name used in logs.
    fn name(&self) -> String;

    /// Show the window (un-hide and un-minimize).
    fn restore(&self) -> Result<(), WindowError>;

    /// Hide the window.
    fn close(&self) -> Result<(), WindowError>;

    fn minimize(&self) -> Result<(), WindowError>;

    fn state(&self) -> WindowState;

    /// Begin an OS drag of the window; call from the drag handle's mouse-down.
    fn drag_move(&self);

    /// Close the window for good and end the application.
    fn exit(&self);
}

impl<T: WindowPort + ?Sized> WindowPort for Rc<T> {
    fn name(&self) -> String {
        (**self).name()
    }

    fn restore(&self) -> Result<(), WindowError> {
        (**self).restore()
    }

    fn close(&self) -> Result<(), WindowError> {
        (**self).close()
    }

    fn minimize(&self) -> Result<(), WindowError> {
        (**self).minimize()
    }

    fn state(&self) -> WindowState {
        (**self).state()
    }

    fn drag_move(&self) {
        (**self).drag_move()
    }

    fn exit(&self) {
        (**self).exit()
    }
}
