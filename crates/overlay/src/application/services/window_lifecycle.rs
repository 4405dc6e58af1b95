//! Window Lifecycle Controller - drives window visibility from game state
//!
//! Two windows are managed: the in-game overlay and an optional desktop
//! window. While a supported game runs the overlay is visible and the desktop
//! window hidden; otherwise the reverse. With both windows present exactly one
//! is visible after every transition.
//!
//! Re-applying a window's current visibility is a no-op: no port call is made.

use std::fmt;

use super::game_state_monitor::{GameStateMonitor, GameTransition};
use crate::ports::outbound::WindowPort;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowRole {
    Desktop,
    InGame,
}

impl fmt::Display for WindowRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Desktop => write!(f, "desktop"),
            Self::InGame => write!(f, "in_game"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    Hidden,
}

struct ManagedWindow {
    role: WindowRole,
    port: Box<dyn WindowPort>,
    visibility: Option<Visibility>,
}

impl ManagedWindow {
    fn new(role: WindowRole, port: Box<dyn WindowPort>) -> Self {
        Self {
            role,
            port,
            visibility: None,
        }
    }

    fn apply(&mut self, target: Visibility) {
        if self.visibility == Some(target) {
            return;
        }

        let result = match target {
            Visibility::Visible => self.port.restore(),
            Visibility::Hidden => self.port.close(),
        };

        match result {
            Ok(()) => {
                tracing::debug!(role = %self.role, window = %self.port.name(), ?target, "Window visibility changed");
                self.visibility = Some(target);
            }
            Err(e) => {
                tracing::error!(role = %self.role, error = %e, ?target, "Failed to change window visibility");
            }
        }
    }
}

pub struct WindowLifecycleController {
    in_game: ManagedWindow,
    desktop: Option<ManagedWindow>,
}

impl WindowLifecycleController {
    pub fn new(in_game: Box<dyn WindowPort>, desktop: Option<Box<dyn WindowPort>>) -> Self {
        Self {
            in_game: ManagedWindow::new(WindowRole::InGame, in_game),
            desktop: desktop.map(|port| ManagedWindow::new(WindowRole::Desktop, port)),
        }
    }

    /// Topology with the overlay window only.
    pub fn in_game_only(in_game: Box<dyn WindowPort>) -> Self {
        Self::new(in_game, None)
    }

    /// Set the initial visibility from a one-time running-game query.
    pub async fn start(&mut self, monitor: &GameStateMonitor) {
        let running = monitor.is_running_supported_game().await;
        tracing::info!(running, "Initializing window visibility");
        self.initialize(running);
    }

    pub fn initialize(&mut self, game_running: bool) {
        self.show_for(game_running);
    }

    pub fn on_transition(&mut self, transition: &GameTransition) {
        tracing::info!(
            class_id = %transition.info().class_id,
            started = transition.is_started(),
            "Game state changed"
        );
        self.show_for(transition.is_started());
    }

    pub fn visibility(&self, role: WindowRole) -> Option<Visibility> {
        match role {
            WindowRole::InGame => self.in_game.visibility,
            WindowRole::Desktop => self.desktop.as_ref().and_then(|w| w.visibility),
        }
    }

    pub fn has_desktop_window(&self) -> bool {
        self.desktop.is_some()
    }

    fn show_for(&mut self, game_running: bool) {
        // Hide before show so both windows are never visible at once.
        if game_running {
            if let Some(desktop) = self.desktop.as_mut() {
                desktop.apply(Visibility::Hidden);
            }
            self.in_game.apply(Visibility::Visible);
        } else {
            self.in_game.apply(Visibility::Hidden);
            if let Some(desktop) = self.desktop.as_mut() {
                desktop.apply(Visibility::Visible);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::outbound::{MockWindowPort, WindowError, WindowState};
    use questlens_domain::{GameClassId, RunningGameInfo};
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Window double that records calls and answers like a real window.
    #[derive(Clone, Default)]
    struct FakeWindow {
        calls: Rc<RefCell<Vec<&'static str>>>,
        visible: Rc<RefCell<bool>>,
    }

    impl WindowPort for FakeWindow {
        fn name(&self) -> String {
            "fake".into()
        }

        fn restore(&self) -> Result<(), WindowError> {
            self.calls.borrow_mut().push("restore");
            *self.visible.borrow_mut() = true;
            Ok(())
        }

        fn close(&self) -> Result<(), WindowError> {
            self.calls.borrow_mut().push("close");
            *self.visible.borrow_mut() = false;
            Ok(())
        }

        fn minimize(&self) -> Result<(), WindowError> {
            Ok(())
        }

        fn state(&self) -> WindowState {
            if *self.visible.borrow() {
                WindowState::Normal
            } else {
                WindowState::Closed
            }
        }

        fn drag_move(&self) {}

        fn exit(&self) {}
    }

    fn transition(is_running: bool) -> GameTransition {
        GameTransition::from(RunningGameInfo::new(GameClassId::new(1), is_running, "Game"))
    }

    fn visible_count(controller: &WindowLifecycleController) -> usize {
        [WindowRole::InGame, WindowRole::Desktop]
            .into_iter()
            .filter(|role| controller.visibility(*role) == Some(Visibility::Visible))
            .count()
    }

    #[test]
    fn initializes_overlay_when_game_running() {
        let in_game = FakeWindow::default();
        let desktop = FakeWindow::default();
        let mut controller =
            WindowLifecycleController::new(Box::new(in_game.clone()), Some(Box::new(desktop.clone())));

        controller.initialize(true);

        assert_eq!(controller.visibility(WindowRole::InGame), Some(Visibility::Visible));
        assert_eq!(controller.visibility(WindowRole::Desktop), Some(Visibility::Hidden));
        assert_eq!(in_game.state(), WindowState::Normal);
        assert_eq!(desktop.state(), WindowState::Closed);
    }

    #[test]
    fn initializes_desktop_when_no_game() {
        let mut controller = WindowLifecycleController::new(
            Box::new(FakeWindow::default()),
            Some(Box::new(FakeWindow::default())),
        );

        controller.initialize(false);

        assert_eq!(controller.visibility(WindowRole::InGame), Some(Visibility::Hidden));
        assert_eq!(controller.visibility(WindowRole::Desktop), Some(Visibility::Visible));
    }

    #[test]
    fn exactly_one_window_visible_after_every_event() {
        let mut controller = WindowLifecycleController::new(
            Box::new(FakeWindow::default()),
            Some(Box::new(FakeWindow::default())),
        );
        controller.initialize(false);

        for is_running in [true, true, false, true, false, false, true] {
            controller.on_transition(&transition(is_running));
            assert_eq!(visible_count(&controller), 1);
            let expected = if is_running {
                Visibility::Visible
            } else {
                Visibility::Hidden
            };
            assert_eq!(controller.visibility(WindowRole::InGame), Some(expected));
        }
    }

    #[test]
    fn repeated_transition_is_a_no_op() {
        let in_game = FakeWindow::default();
        let mut controller = WindowLifecycleController::in_game_only(Box::new(in_game.clone()));

        controller.on_transition(&transition(false));
        controller.on_transition(&transition(false));
        controller.on_transition(&transition(true));
        controller.on_transition(&transition(true));

        assert_eq!(*in_game.calls.borrow(), vec!["close", "restore"]);
        assert!(!controller.has_desktop_window());
        assert_eq!(controller.visibility(WindowRole::Desktop), None);
    }

    #[test]
    fn failed_restore_keeps_previous_state() {
        let mut port = MockWindowPort::new();
        port.expect_name().return_const("overlay".to_string());
        port.expect_close().times(1).returning(|| Ok(()));
        port.expect_restore().times(2).returning(|| {
            Err(WindowError::Operation {
                operation: "restore",
                message: "no display".into(),
            })
        });

        let mut controller = WindowLifecycleController::in_game_only(Box::new(port));
        controller.initialize(false);
        controller.on_transition(&transition(true));
        assert_eq!(controller.visibility(WindowRole::InGame), Some(Visibility::Hidden));

        // Still out of sync, so the next start retries.
        controller.on_transition(&transition(true));
    }
}
