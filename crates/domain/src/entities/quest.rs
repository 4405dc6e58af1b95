//! Quest entity - A single step of a world's storyline

use serde::{Deserialize, Deserializer, Serialize};

use crate::{QuestSlug, WorldSlug};

/// A quest as published by the remote store.
///
/// Only `world_slug` and `story_order` carry meaning for ordering and merging.
/// The narrative fields are displayed as-is and never interpreted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quest {
    pub slug: QuestSlug,
    pub display_name: String,
    pub world_slug: WorldSlug,
    pub story_order: i32,
    #[serde(default, deserialize_with = "blank_slug_as_none")]
    pub prequest: Option<QuestSlug>,
    #[serde(default)]
    pub given_by: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub hand_in: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub goals: Vec<serde_json::Value>,
    #[serde(default)]
    pub reward: Option<serde_json::Value>,
}

impl Quest {
    pub fn new(
        slug: QuestSlug,
        display_name: impl Into<String>,
        world_slug: WorldSlug,
        story_order: i32,
    ) -> Self {
        Self {
            slug,
            display_name: display_name.into(),
            world_slug,
            story_order,
            prequest: None,
            given_by: None,
            location: None,
            hand_in: None,
            goals: Vec::new(),
            reward: None,
        }
    }

    pub fn with_given_by(mut self, given_by: impl Into<String>) -> Self {
        self.given_by = Some(given_by.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_hand_in(mut self, hand_in: impl Into<String>) -> Self {
        self.hand_in = Some(hand_in.into());
        self
    }

    /// Goals rendered as display lines. Plain strings are kept verbatim;
    /// structured goals fall back to their `description` field or raw JSON.
    pub fn goal_lines(&self) -> Vec<String> {
        self.goals
            .iter()
            .map(|goal| match goal {
                serde_json::Value::String(text) => text.clone(),
                serde_json::Value::Object(map) => map
                    .get("description")
                    .and_then(|d| d.as_str())
                    .map(str::to_string)
                    .unwrap_or_else(|| goal.to_string()),
                other => other.to_string(),
            })
            .collect()
    }
}

/// Nullable columns come back as `null`; treat that like a missing key.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<serde_json::Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<serde_json::Value>>::deserialize(deserializer)?.unwrap_or_default())
}

/// An empty or blank prequest reference means the quest has none.
fn blank_slug_as_none<'de, D>(deserializer: D) -> Result<Option<QuestSlug>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) if !raw.trim().is_empty() => QuestSlug::new(raw)
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_row_without_metadata() {
        let raw = r#"{
            "slug": "a-stranger-arrives",
            "display_name": "A Stranger Arrives",
            "world_slug": "ember-coast",
            "story_order": 1
        }"#;
        let quest: Quest = serde_json::from_str(raw).expect("quest row");
        assert_eq!(quest.story_order, 1);
        assert!(quest.given_by.is_none());
        assert!(quest.goals.is_empty());
    }

    #[test]
    fn goal_lines_accepts_mixed_shapes() {
        let raw = r#"{
            "slug": "q",
            "display_name": "Q",
            "world_slug": "w",
            "story_order": 0,
            "goals": ["Talk to the warden", {"description": "Find the key"}, 3]
        }"#;
        let quest: Quest = serde_json::from_str(raw).expect("quest row");
        assert_eq!(
            quest.goal_lines(),
            vec!["Talk to the warden", "Find the key", "3"]
        );
    }

    #[test]
    fn null_goals_decode_as_empty() {
        let raw = r#"[
            {"slug": "q1", "display_name": "One", "world_slug": "w", "story_order": 1,
             "goals": null, "reward": null, "given_by": null},
            {"slug": "q2", "display_name": "Two", "world_slug": "w", "story_order": 2,
             "goals": ["Light the beacon"]}
        ]"#;
        let quests: Vec<Quest> = serde_json::from_str(raw).expect("quest rows");
        assert_eq!(quests.len(), 2);
        assert!(quests[0].goals.is_empty());
        assert_eq!(quests[1].goal_lines(), vec!["Light the beacon"]);
    }

    #[test]
    fn blank_or_null_prequest_means_none() {
        for prequest in [r#""""#, r#""  ""#, "null"] {
            let raw = format!(
                r#"{{"slug": "q", "display_name": "Q", "world_slug": "w",
                    "story_order": 0, "prequest": {prequest}}}"#
            );
            let quest: Quest = serde_json::from_str(&raw).expect("quest row");
            assert_eq!(quest.prequest, None, "prequest {prequest}");
        }

        let raw = r#"{"slug": "q", "display_name": "Q", "world_slug": "w",
                      "story_order": 0, "prequest": "intro"}"#;
        let quest: Quest = serde_json::from_str(raw).expect("quest row");
        assert_eq!(quest.prequest.as_ref().map(|s| s.as_str()), Some("intro"));
    }
}
