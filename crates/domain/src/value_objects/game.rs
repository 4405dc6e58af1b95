//! Running game information and the supported-game allow-list

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::GameClassId;

/// Snapshot of a game process as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunningGameInfo {
    pub class_id: GameClassId,
    pub is_running: bool,
    #[serde(default)]
    pub title: String,
}

impl RunningGameInfo {
    pub fn new(class_id: GameClassId, is_running: bool, title: impl Into<String>) -> Self {
        Self {
            class_id,
            is_running,
            title: title.into(),
        }
    }
}

/// Fixed set of game class ids the overlay reacts to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SupportedGames {
    class_ids: HashSet<GameClassId>,
}

impl SupportedGames {
    pub fn new(class_ids: impl IntoIterator<Item = GameClassId>) -> Self {
        Self {
            class_ids: class_ids.into_iter().collect(),
        }
    }

    /// Whether `info` names a supported game. Running state is not considered.
    pub fn contains(&self, info: &RunningGameInfo) -> bool {
        self.class_ids.contains(&info.class_id)
    }

    pub fn contains_id(&self, class_id: GameClassId) -> bool {
        self.class_ids.contains(&class_id)
    }

    pub fn is_empty(&self) -> bool {
        self.class_ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.class_ids.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn membership_ignores_insertion_order() {
        let a = SupportedGames::new([GameClassId::new(1), GameClassId::new(2)]);
        let b = SupportedGames::new([GameClassId::new(2), GameClassId::new(1)]);
        assert_eq!(a, b);

        let info = RunningGameInfo::new(GameClassId::new(2), false, "Two");
        assert!(a.contains(&info));
        assert!(!a.contains_id(GameClassId::new(3)));
    }
}
