//! SilicoQuest: Quest State & Progress.
//!
//! Responsible for the learner's progress snapshot: per-chapter narration
//! position, completion and time, the score ledger, learner analytics,
//! best-effort persistence with defensive merge-on-load, statistics, and
//! progress export/import.

pub mod application;
pub mod domain;

pub use domain::analytics::PlayAnalytics;
pub use domain::ledger::ScoreLedger;
pub use domain::state::{ChapterProgress, QuestState};
