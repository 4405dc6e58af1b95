//! Quest state management
//!
//! Holds the restored [`QuestNavigator`] in a signal and derives the plain
//! view data that components render. The view builders are pure so they can
//! be tested without a Dioxus runtime.

use dioxus::prelude::*;

use questlens_domain::{QuestStep, WorldSlug};

use crate::application::services::QuestNavigator;
use crate::ui::presentation::utils::{picker_placements, PickerPlacement};

/// Where the startup sync stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadStatus {
    Loading,
    Ready,
}

/// Quest state shared by the overlay components
#[derive(Clone, Copy)]
pub struct QuestState {
    /// `None` until the startup sync has finished
    pub navigator: Signal<Option<QuestNavigator>>,
    pub status: Signal<LoadStatus>,
}

impl QuestState {
    pub fn new() -> Self {
        Self {
            navigator: Signal::new(None),
            status: Signal::new(LoadStatus::Loading),
        }
    }

    pub fn install(&mut self, navigator: QuestNavigator) {
        self.navigator.set(Some(navigator));
        self.status.set(LoadStatus::Ready);
    }

    pub fn select_world(&mut self, slug: &WorldSlug) {
        if let Some(navigator) = &mut *self.navigator.write() {
            if let Err(e) = navigator.select_world(slug) {
                tracing::warn!(world = %slug, error = %e, "Ignoring world selection");
            }
        }
    }

    pub fn step(&mut self, step: QuestStep) {
        if let Some(navigator) = &mut *self.navigator.write() {
            navigator.step_quest(step);
        }
    }

    pub fn toggle_picker(&mut self) {
        if let Some(navigator) = &mut *self.navigator.write() {
            navigator.toggle_picker();
        }
    }

    /// Close the picker after a click outside it. Only writes when it was open.
    pub fn outside_click(&mut self) {
        let is_open = matches!(&*self.navigator.peek(), Some(nav) if nav.is_picker_open());
        if is_open {
            if let Some(navigator) = &mut *self.navigator.write() {
                navigator.handle_outside_click();
            }
        }
    }
}

impl Default for QuestState {
    fn default() -> Self {
        Self::new()
    }
}

/// A world as shown in the selector.
#[derive(Clone, Debug, PartialEq)]
pub struct WorldCard {
    pub slug: WorldSlug,
    pub display_name: String,
    pub icon: String,
}

/// Selected-world control plus the arc picker.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectorView {
    pub selected: Option<WorldCard>,
    pub is_open: bool,
    /// Other worlds paired with their current placement.
    pub options: Vec<(WorldCard, PickerPlacement)>,
}

/// One narrative line under the quest name.
#[derive(Clone, Debug, PartialEq)]
pub struct DetailLine {
    pub label: &'static str,
    pub value: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct QuestPanelView {
    pub quest_name: Option<String>,
    pub details: Vec<DetailLine>,
    pub goals: Vec<String>,
    /// One-based position of the selected quest, 0 when the world has none.
    pub position: usize,
    pub total: usize,
    /// Progress bar value and maximum (`total - 1`, at least 0).
    pub progress_value: usize,
    pub progress_max: usize,
    pub can_previous: bool,
    pub can_next: bool,
}

impl QuestPanelView {
    pub fn empty() -> Self {
        Self {
            quest_name: None,
            details: Vec::new(),
            goals: Vec::new(),
            position: 0,
            total: 0,
            progress_value: 0,
            progress_max: 0,
            can_previous: false,
            can_next: false,
        }
    }
}

pub fn selector_view(navigator: &QuestNavigator) -> SelectorView {
    let card = |world: &questlens_domain::World| WorldCard {
        slug: world.slug.clone(),
        display_name: world.display_name.clone(),
        icon: world.icon_path(),
    };

    let others = navigator.other_worlds();
    let placements = picker_placements(navigator.is_picker_open(), others.len());

    SelectorView {
        selected: navigator.selected_world().map(card),
        is_open: navigator.is_picker_open(),
        options: others.into_iter().map(card).zip(placements).collect(),
    }
}

pub fn quest_panel_view(navigator: &QuestNavigator) -> QuestPanelView {
    let progress = navigator.progress();
    let Some(quest) = navigator.current_quest() else {
        return QuestPanelView {
            total: progress.total,
            ..QuestPanelView::empty()
        };
    };

    let details = [
        ("Given by", &quest.given_by),
        ("Location", &quest.location),
        ("Hand in", &quest.hand_in),
    ]
    .into_iter()
    .filter_map(|(label, value)| {
        value.as_ref().map(|value| DetailLine {
            label,
            value: value.clone(),
        })
    })
    .collect();

    QuestPanelView {
        quest_name: Some(quest.display_name.clone()),
        details,
        goals: quest.goal_lines(),
        position: progress.current + 1,
        total: progress.total,
        progress_value: progress.current,
        progress_max: progress.total.saturating_sub(1),
        can_previous: navigator.can_step_previous(),
        can_next: navigator.can_step_next(),
    }
}
