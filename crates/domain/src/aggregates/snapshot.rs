//! QuestSnapshot aggregate - the denormalized World -> Quest collection
//!
//! # Invariants
//!
//! - Worlds are ordered by `story_order` ascending
//! - Each world's quests are ordered by `story_order` ascending
//!
//! Sorting is stable, so rows that arrive already ordered from the store keep
//! their relative order.

use serde::{Deserialize, Serialize};

use crate::{World, WorldSlug};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<World>", into = "Vec<World>")]
pub struct QuestSnapshot {
    worlds: Vec<World>,
}

impl QuestSnapshot {
    pub fn new(mut worlds: Vec<World>) -> Self {
        worlds.sort_by_key(|w| w.story_order);
        for world in &mut worlds {
            world.quests.sort_by_key(|q| q.story_order);
        }
        Self { worlds }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn worlds(&self) -> &[World] {
        &self.worlds
    }

    pub fn world(&self, slug: &WorldSlug) -> Option<&World> {
        self.worlds.iter().find(|w| &w.slug == slug)
    }

    pub fn first_world(&self) -> Option<&World> {
        self.worlds.first()
    }

    /// Every world except `selected`, in snapshot order.
    pub fn other_worlds(&self, selected: &WorldSlug) -> Vec<&World> {
        self.worlds.iter().filter(|w| &w.slug != selected).collect()
    }

    pub fn len(&self) -> usize {
        self.worlds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.worlds.is_empty()
    }

    /// Total quests across all worlds.
    pub fn quest_count(&self) -> usize {
        self.worlds.iter().map(World::quest_count).sum()
    }

    pub fn into_worlds(self) -> Vec<World> {
        self.worlds
    }
}

impl From<Vec<World>> for QuestSnapshot {
    fn from(worlds: Vec<World>) -> Self {
        Self::new(worlds)
    }
}

impl From<QuestSnapshot> for Vec<World> {
    fn from(snapshot: QuestSnapshot) -> Self {
        snapshot.worlds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Quest, QuestSlug};

    fn world(slug: &str, order: i32) -> World {
        World::new(WorldSlug::new(slug).expect("slug"), slug.to_uppercase(), order)
    }

    fn quest(world: &str, slug: &str, order: i32) -> Quest {
        Quest::new(
            QuestSlug::new(slug).expect("slug"),
            slug,
            WorldSlug::new(world).expect("slug"),
            order,
        )
    }

    #[test]
    fn sorts_worlds_and_quests_by_story_order() {
        let snapshot = QuestSnapshot::new(vec![
            world("c", 3),
            world("a", 1).with_quests(vec![quest("a", "a2", 2), quest("a", "a1", 1)]),
            world("b", 2),
        ]);

        let slugs: Vec<_> = snapshot.worlds().iter().map(|w| w.slug.as_str()).collect();
        assert_eq!(slugs, vec!["a", "b", "c"]);

        let quests: Vec<_> = snapshot.worlds()[0]
            .quests
            .iter()
            .map(|q| q.slug.as_str())
            .collect();
        assert_eq!(quests, vec!["a1", "a2"]);
    }

    #[test]
    fn other_worlds_excludes_selection_and_keeps_order() {
        let snapshot = QuestSnapshot::new(vec![world("a", 1), world("b", 2), world("c", 3)]);
        let selected = WorldSlug::new("b").expect("slug");

        let others: Vec<_> = snapshot
            .other_worlds(&selected)
            .iter()
            .map(|w| w.slug.as_str())
            .collect();
        assert_eq!(others, vec!["a", "c"]);
    }

    #[test]
    fn deserializing_restores_order_invariant() {
        let raw = r#"[
            {"slug": "late", "display_name": "Late", "story_order": 9},
            {"slug": "early", "display_name": "Early", "story_order": 0}
        ]"#;
        let snapshot: QuestSnapshot = serde_json::from_str(raw).expect("snapshot");
        assert_eq!(snapshot.first_world().map(|w| w.slug.as_str()), Some("early"));
        assert_eq!(snapshot.quest_count(), 0);
    }
}
