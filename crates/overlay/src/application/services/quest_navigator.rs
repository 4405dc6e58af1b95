//! Quest Navigator - selected world, selected quest and the world picker
//!
//! Holds a read-only view of the synchronized snapshot plus the selection.
//! Every selection change is written back to storage immediately so the next
//! session resumes where this one stopped.

use std::sync::Arc;

use questlens_domain::{
    DomainError, Quest, QuestSnapshot, QuestStep, SelectionState, World, WorldSlug,
};

use crate::ports::outbound::{storage_keys, StorageProvider};

/// Position within the selected world's quest sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestProgress {
    /// Zero-based index of the selected quest.
    pub current: usize,
    /// Number of quests in the selected world.
    pub total: usize,
}

pub struct QuestNavigator {
    snapshot: Arc<QuestSnapshot>,
    storage: Arc<dyn StorageProvider>,
    selection: SelectionState,
    other_worlds: Vec<WorldSlug>,
    picker_open: bool,
}

impl QuestNavigator {
    /// Restore the last session's selection against `snapshot`.
    ///
    /// A persisted world that no longer exists falls back to the first world
    /// at its first quest; a persisted quest index beyond the world's quests
    /// is clamped.
    pub fn restore(snapshot: Arc<QuestSnapshot>, storage: Arc<dyn StorageProvider>) -> Self {
        let saved_world = storage
            .load(storage_keys::SELECTED_WORLD)
            .and_then(|raw| WorldSlug::new(raw).ok())
            .filter(|slug| snapshot.world(slug).is_some());

        let saved_quest = storage
            .load(storage_keys::SELECTED_QUEST)
            .and_then(|raw| raw.trim().parse::<usize>().ok())
            .unwrap_or(0);

        // The saved index belongs to the saved world only.
        let (selected_world, wanted_quest) = match saved_world {
            Some(slug) => (Some(slug), saved_quest),
            None => (snapshot.first_world().map(|w| w.slug.clone()), 0),
        };

        let quest_count = selected_world
            .as_ref()
            .and_then(|slug| snapshot.world(slug))
            .map_or(0, World::quest_count);
        let selection = SelectionState::new(selected_world, wanted_quest).clamped_to(quest_count);

        if selection.selected_quest != saved_quest {
            tracing::debug!(
                saved = saved_quest,
                restored = selection.selected_quest,
                "Reset stale quest selection"
            );
            storage.save(
                storage_keys::SELECTED_QUEST,
                &selection.selected_quest.to_string(),
            );
        }

        let mut navigator = Self {
            snapshot,
            storage,
            selection,
            other_worlds: Vec::new(),
            picker_open: false,
        };
        navigator.rebuild_other_worlds();
        navigator
    }

    pub fn snapshot(&self) -> &QuestSnapshot {
        &self.snapshot
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn selected_world(&self) -> Option<&World> {
        self.selection
            .selected_world
            .as_ref()
            .and_then(|slug| self.snapshot.world(slug))
    }

    pub fn quest_count(&self) -> usize {
        self.selected_world().map_or(0, World::quest_count)
    }

    pub fn current_quest(&self) -> Option<&Quest> {
        self.selected_world()
            .and_then(|world| world.quest(self.selection.selected_quest))
    }

    pub fn progress(&self) -> QuestProgress {
        QuestProgress {
            current: self.selection.selected_quest,
            total: self.quest_count(),
        }
    }

    /// Previous button enabled state.
    pub fn can_step_previous(&self) -> bool {
        !self.selection.is_at_first()
    }

    /// Next button enabled state.
    pub fn can_step_next(&self) -> bool {
        !self.selection.is_at_last(self.quest_count())
    }

    /// Select `slug`, reset to its first quest and close the picker.
    pub fn select_world(&mut self, slug: &WorldSlug) -> Result<(), DomainError> {
        if self.snapshot.world(slug).is_none() {
            return Err(DomainError::not_found("World", slug.as_str()));
        }

        self.picker_open = false;
        self.selection = SelectionState::new(Some(slug.clone()), 0);
        self.storage.save(storage_keys::SELECTED_WORLD, slug.as_str());
        self.storage.save(storage_keys::SELECTED_QUEST, "0");
        self.rebuild_other_worlds();

        tracing::debug!(world = %slug, "Selected world");
        Ok(())
    }

    /// Move one quest forward or back. Stepping past either end does nothing.
    /// Returns whether the selection changed.
    pub fn step_quest(&mut self, step: QuestStep) -> bool {
        let changed = self.selection.step(step, self.quest_count());
        if changed {
            self.storage.save(
                storage_keys::SELECTED_QUEST,
                &self.selection.selected_quest.to_string(),
            );
        }
        changed
    }

    /// Worlds offered by the picker: every world but the selected one.
    pub fn other_worlds(&self) -> Vec<&World> {
        self.other_worlds
            .iter()
            .filter_map(|slug| self.snapshot.world(slug))
            .collect()
    }

    pub fn is_picker_open(&self) -> bool {
        self.picker_open
    }

    pub fn open_picker(&mut self) {
        self.picker_open = true;
    }

    pub fn close_picker(&mut self) {
        self.picker_open = false;
    }

    pub fn toggle_picker(&mut self) {
        self.picker_open = !self.picker_open;
    }

    /// A click landed outside the picker. Returns whether it closed.
    pub fn handle_outside_click(&mut self) -> bool {
        let was_open = self.picker_open;
        self.close_picker();
        was_open
    }

    fn rebuild_other_worlds(&mut self) {
        self.other_worlds = match self.selection.selected_world.as_ref() {
            Some(selected) => self
                .snapshot
                .other_worlds(selected)
                .into_iter()
                .map(|w| w.slug.clone())
                .collect(),
            None => self.snapshot.worlds().iter().map(|w| w.slug.clone()).collect(),
        };
    }
}
