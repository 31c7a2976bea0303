//! Progress store abstraction and the persisted progress blob.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::QuestError;

/// Persisted progress of a single chapter.
///
/// Missing fields fall back to their zero values so partially written
/// entries still merge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersistedChapterProgress {
    /// Index of the narration stage the learner was on.
    pub narration_stage_index: usize,
    /// Whether the chapter's mini-game was completed.
    pub game_completed: bool,
    /// Accumulated time spent in the chapter, in milliseconds.
    pub time_spent_ms: u64,
}

/// Serialized form of the whole quest, as written to the backing medium.
///
/// Chapter-keyed maps use string keys, matching the JSON object layout, so a
/// malformed key is dropped during the merge instead of failing the load.
/// Unknown top-level fields are ignored on read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProgressSnapshot {
    /// The chapter the learner is on.
    pub current_chapter: u32,
    /// Chapters the learner has completed.
    pub completed_chapters: Vec<u32>,
    /// Per-chapter progress keyed by chapter number.
    pub chapter_progress: BTreeMap<String, PersistedChapterProgress>,
    /// Recorded mini-game scores keyed by chapter number.
    pub chapter_scores: BTreeMap<String, u32>,
    /// Learner analytics, stored opaquely.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analytics: Option<serde_json::Value>,
    /// When the snapshot was written, in epoch milliseconds.
    pub last_saved: i64,
}

impl Default for ProgressSnapshot {
    fn default() -> Self {
        Self {
            current_chapter: 1,
            completed_chapters: Vec::new(),
            chapter_progress: BTreeMap::new(),
            chapter_scores: BTreeMap::new(),
            analytics: None,
            last_saved: 0,
        }
    }
}

impl ProgressSnapshot {
    /// Serializes the snapshot to its JSON blob.
    ///
    /// # Errors
    ///
    /// Returns `QuestError::Persistence` if serialization fails.
    pub fn to_json(&self) -> Result<String, QuestError> {
        serde_json::to_string(self)
            .map_err(|e| QuestError::Persistence(format!("snapshot serialization failed: {e}")))
    }

    /// Parses a snapshot from its JSON blob.
    ///
    /// # Errors
    ///
    /// Returns `QuestError::Persistence` if the blob is not valid JSON or has
    /// fields of the wrong shape.
    pub fn from_json(blob: &str) -> Result<Self, QuestError> {
        serde_json::from_str(blob)
            .map_err(|e| QuestError::Persistence(format!("snapshot is corrupt: {e}")))
    }
}

/// Storage backend for the learner's progress.
///
/// Implementations report failures as `QuestError::Persistence`; callers
/// decide whether a failure is fatal. The progression layer treats every
/// store failure as best-effort.
pub trait ProgressStore: Send + Sync {
    /// Loads the persisted snapshot, or `None` if nothing has been saved.
    ///
    /// # Errors
    ///
    /// Returns `QuestError::Persistence` if the medium is unavailable or the
    /// stored blob is corrupt.
    fn load(&self) -> Result<Option<ProgressSnapshot>, QuestError>;

    /// Replaces the persisted snapshot.
    ///
    /// # Errors
    ///
    /// Returns `QuestError::Persistence` if the medium is unavailable.
    fn save(&self, snapshot: &ProgressSnapshot) -> Result<(), QuestError>;

    /// Removes the persisted snapshot. Removing nothing is not an error.
    ///
    /// # Errors
    ///
    /// Returns `QuestError::Persistence` if the medium is unavailable.
    fn reset(&self) -> Result<(), QuestError>;
}
