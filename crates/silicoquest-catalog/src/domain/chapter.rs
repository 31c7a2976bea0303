//! Chapter definitions.

use serde::{Deserialize, Serialize};
use silicoquest_core::game::GameSpec;

/// One beat of narration within a chapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrationStage {
    /// Text spoken by the narrator.
    pub text: String,
    /// Opaque key resolved by the visual renderer.
    #[serde(rename = "visual")]
    pub visual_id: String,
    /// Cosmetic auto-timeout. Never blocks advancement.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
}

/// One top-level unit of the narrative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    /// 1-based position in the catalog.
    pub number: u32,
    /// Chapter title.
    pub title: String,
    /// One-line summary shown in the chapter list.
    #[serde(default)]
    pub description: String,
    /// Ordered narration stages. Never empty in a validated catalog.
    #[serde(rename = "narration")]
    pub narration_stages: Vec<NarrationStage>,
    /// Gating mini-game, if the chapter has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game: Option<GameSpec>,
    /// Contextual hints for the learner.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hints: Vec<String>,
}

impl Chapter {
    /// Number of narration stages.
    #[must_use]
    pub fn stage_count(&self) -> usize {
        self.narration_stages.len()
    }

    /// Index of the final narration stage.
    #[must_use]
    pub fn last_stage_index(&self) -> usize {
        self.narration_stages.len().saturating_sub(1)
    }

    /// Returns the stage at `index`, if any.
    #[must_use]
    pub fn stage(&self, index: usize) -> Option<&NarrationStage> {
        self.narration_stages.get(index)
    }

    /// Whether leaving this chapter requires completing a mini-game.
    #[must_use]
    pub fn has_game(&self) -> bool {
        self.game.is_some()
    }
}
