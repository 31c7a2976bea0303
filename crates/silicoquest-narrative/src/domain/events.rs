//! Domain events emitted by the progression controller.

use serde::{Deserialize, Serialize};
use silicoquest_core::event::{DomainEvent, EventMetadata};
use silicoquest_core::game::Difficulty;
use uuid::Uuid;

use silicoquest_progress::domain::analytics::PerformanceTier;

pub const CHAPTER_ENTERED: &str = "quest.chapter_entered";
pub const STAGE_ADVANCED: &str = "quest.stage_advanced";
pub const GAME_STARTED: &str = "quest.game_started";
pub const GAME_COMPLETED: &str = "quest.game_completed";
pub const GAME_SKIPPED: &str = "quest.game_skipped";
pub const CHAPTER_COMPLETED: &str = "quest.chapter_completed";
pub const QUEST_COMPLETED: &str = "quest.quest_completed";
pub const PROGRESS_RESET: &str = "quest.progress_reset";
pub const PROGRESS_IMPORTED: &str = "quest.progress_imported";

/// A chapter became current.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterEntered {
    pub chapter: u32,
    pub stage_index: usize,
}

/// Narration moved to the next stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageAdvanced {
    pub chapter: u32,
    pub stage_index: usize,
}

/// A mini-game session was loaded into the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStarted {
    pub chapter: u32,
    pub session_id: Uuid,
    pub game: String,
    pub difficulty: Difficulty,
    pub attempt: u32,
}

/// A mini-game reported terminal completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameCompleted {
    pub chapter: u32,
    pub session_id: Uuid,
    /// Reported score after clamping.
    pub score: u32,
    pub max_score: u32,
    /// Score held by the ledger, which keeps the first recorded value.
    pub recorded_score: u32,
    pub tier: PerformanceTier,
}

/// The learner skipped a chapter's mini-game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSkipped {
    pub chapter: u32,
}

/// A chapter was added to the completed set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterCompleted {
    pub chapter: u32,
}

/// The final chapter was completed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestCompleted {
    pub total_score: u64,
    pub max_total_score: u32,
}

/// Progress was reset to the initial state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressReset {}

/// Progress was replaced from an export document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressImported {
    pub current_chapter: u32,
    pub chapters_completed: usize,
}

/// Event payload variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestEventKind {
    ChapterEntered(ChapterEntered),
    StageAdvanced(StageAdvanced),
    GameStarted(GameStarted),
    GameCompleted(GameCompleted),
    GameSkipped(GameSkipped),
    ChapterCompleted(ChapterCompleted),
    QuestCompleted(QuestCompleted),
    ProgressReset(ProgressReset),
    ProgressImported(ProgressImported),
}

impl QuestEventKind {
    /// Dotted event type name.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::ChapterEntered(_) => CHAPTER_ENTERED,
            Self::StageAdvanced(_) => STAGE_ADVANCED,
            Self::GameStarted(_) => GAME_STARTED,
            Self::GameCompleted(_) => GAME_COMPLETED,
            Self::GameSkipped(_) => GAME_SKIPPED,
            Self::ChapterCompleted(_) => CHAPTER_COMPLETED,
            Self::QuestCompleted(_) => QUEST_COMPLETED,
            Self::ProgressReset(_) => PROGRESS_RESET,
            Self::ProgressImported(_) => PROGRESS_IMPORTED,
        }
    }
}

/// Domain event envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestEvent {
    pub metadata: EventMetadata,
    pub kind: QuestEventKind,
}

impl DomainEvent for QuestEvent {
    fn event_type(&self) -> &'static str {
        self.kind.event_type()
    }

    fn to_payload(&self) -> serde_json::Value {
        serde_json::to_value(&self.kind).unwrap_or(serde_json::Value::Null)
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}
