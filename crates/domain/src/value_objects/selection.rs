//! Selection state for the quest browser
//!
//! Holds the selected world and a zero-based quest index into that world's
//! quest sequence. The index is kept within `[0, quest_count - 1]`; a world
//! without quests pins it to 0.

use serde::{Deserialize, Serialize};

use crate::WorldSlug;

/// Direction of a single quest step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestStep {
    Previous,
    Next,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    pub selected_world: Option<WorldSlug>,
    pub selected_quest: usize,
}

impl SelectionState {
    pub fn new(selected_world: Option<WorldSlug>, selected_quest: usize) -> Self {
        Self {
            selected_world,
            selected_quest,
        }
    }

    /// Highest valid index for a world with `quest_count` quests.
    pub fn last_index(quest_count: usize) -> usize {
        quest_count.saturating_sub(1)
    }

    /// Return a copy whose quest index fits a world with `quest_count` quests.
    pub fn clamped_to(&self, quest_count: usize) -> Self {
        Self {
            selected_world: self.selected_world.clone(),
            selected_quest: self.selected_quest.min(Self::last_index(quest_count)),
        }
    }

    /// Move one quest in `step` direction. Stepping past either bound is a
    /// no-op. Returns whether the index changed.
    pub fn step(&mut self, step: QuestStep, quest_count: usize) -> bool {
        let last = Self::last_index(quest_count);
        let next = match step {
            QuestStep::Previous => self.selected_quest.saturating_sub(1),
            QuestStep::Next => (self.selected_quest + 1).min(last),
        };
        let next = next.min(last);
        let changed = next != self.selected_quest;
        self.selected_quest = next;
        changed
    }

    pub fn is_at_first(&self) -> bool {
        self.selected_quest == 0
    }

    pub fn is_at_last(&self, quest_count: usize) -> bool {
        self.selected_quest >= Self::last_index(quest_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stepping_forward_never_exceeds_last_index() {
        let mut state = SelectionState::default();
        for _ in 0..10 {
            state.step(QuestStep::Next, 4);
        }
        assert_eq!(state.selected_quest, 3);
        assert!(state.is_at_last(4));
        assert!(!state.step(QuestStep::Next, 4));
    }

    #[test]
    fn stepping_back_never_goes_below_zero() {
        let mut state = SelectionState::new(None, 2);
        for _ in 0..10 {
            state.step(QuestStep::Previous, 4);
        }
        assert_eq!(state.selected_quest, 0);
        assert!(state.is_at_first());
        assert!(!state.step(QuestStep::Previous, 4));
    }

    #[test]
    fn clamps_stale_index() {
        let state = SelectionState::new(None, 12);
        assert_eq!(state.clamped_to(5).selected_quest, 4);
        assert_eq!(state.clamped_to(0).selected_quest, 0);
    }

    #[test]
    fn empty_world_pins_index_to_zero() {
        let mut state = SelectionState::default();
        assert!(!state.step(QuestStep::Next, 0));
        assert_eq!(state.selected_quest, 0);
        assert!(state.is_at_first());
        assert!(state.is_at_last(0));
    }
}
