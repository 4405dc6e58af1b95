//! World entity - A playable region and its ordered storyline

use serde::{Deserialize, Serialize};

use crate::{Quest, WorldSlug};

/// A world together with the quests that belong to it.
///
/// Rows read from the remote worlds table carry no quests; the sync service
/// attaches them afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct World {
    pub slug: WorldSlug,
    pub display_name: String,
    pub story_order: i32,
    #[serde(default)]
    pub quests: Vec<Quest>,
}

impl World {
    pub fn new(slug: WorldSlug, display_name: impl Into<String>, story_order: i32) -> Self {
        Self {
            slug,
            display_name: display_name.into(),
            story_order,
            quests: Vec::new(),
        }
    }

    pub fn with_quests(mut self, quests: Vec<Quest>) -> Self {
        self.quests = quests;
        self
    }

    pub fn quest_count(&self) -> usize {
        self.quests.len()
    }

    pub fn quest(&self, index: usize) -> Option<&Quest> {
        self.quests.get(index)
    }

    /// Icon asset path used by the world selector.
    pub fn icon_path(&self) -> String {
        format!("./img/world/{}.png", self.slug)
    }
}
