//! Read-only summaries of quest progress.

use serde::Serialize;
use silicoquest_catalog::ChapterCatalog;

use super::state::QuestState;

/// Whole-quest statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestStats {
    pub chapters_completed: usize,
    pub total_chapters: usize,
    pub completion_percentage: f64,
    pub total_time_ms: u64,
    pub total_time: String,
    pub current_chapter: u32,
    pub quest_completed: bool,
    pub total_score: u64,
    pub max_total_score: u32,
}

impl QuestStats {
    /// Computes statistics for `state` at `now_ms`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn compute(catalog: &ChapterCatalog, state: &QuestState, now_ms: i64) -> Self {
        let chapters_completed = state.completed_chapters().len();
        let total_chapters = catalog.len();
        let completion_percentage = if total_chapters == 0 {
            0.0
        } else {
            chapters_completed as f64 / total_chapters as f64 * 100.0
        };
        let total_time_ms = state.total_time_spent_ms(now_ms);

        Self {
            chapters_completed,
            total_chapters,
            completion_percentage,
            total_time_ms,
            total_time: format_duration(total_time_ms),
            current_chapter: state.current_chapter(),
            quest_completed: state.is_quest_complete(catalog),
            total_score: state.total_score(),
            max_total_score: catalog.max_total_score(),
        }
    }
}

/// One row of the chapter overview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterSummary {
    pub number: u32,
    pub title: String,
    pub completed: bool,
    /// Chapter 1 is always unlocked; later chapters once their predecessor
    /// is completed.
    pub unlocked: bool,
    pub current: bool,
    /// 1-based stage the learner is on.
    pub stage: usize,
    pub stage_count: usize,
    pub has_game: bool,
    pub game_completed: bool,
    pub time_spent_ms: u64,
    pub time_spent: String,
    pub score: Option<u32>,
}

/// Summaries of every chapter in catalog order.
#[must_use]
pub fn chapter_summaries(
    catalog: &ChapterCatalog,
    state: &QuestState,
    now_ms: i64,
) -> Vec<ChapterSummary> {
    catalog
        .chapters()
        .iter()
        .map(|chapter| {
            let progress = state.progress(chapter.number).cloned().unwrap_or_default();
            let time_spent_ms = progress.time_spent_at(now_ms);
            ChapterSummary {
                number: chapter.number,
                title: chapter.title.clone(),
                completed: state.is_completed(chapter.number),
                unlocked: chapter.number == 1 || state.is_completed(chapter.number - 1),
                current: chapter.number == state.current_chapter(),
                stage: progress.narration_stage_index + 1,
                stage_count: chapter.stage_count(),
                has_game: chapter.has_game(),
                game_completed: progress.game_completed,
                time_spent_ms,
                time_spent: format_duration(time_spent_ms),
                score: state.ledger().score(chapter.number),
            }
        })
        .collect()
}

/// Renders a duration as `1h 5m`, `3m 12s` or `45s`.
#[must_use]
pub fn format_duration(ms: u64) -> String {
    let seconds = ms / 1000;
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{hours}h {minutes}m")
    } else if minutes > 0 {
        format!("{minutes}m {secs}s")
    } else {
        format!("{secs}s")
    }
}
