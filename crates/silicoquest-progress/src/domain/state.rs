//! The learner's quest state.

use std::collections::{BTreeMap, BTreeSet};

use silicoquest_catalog::ChapterCatalog;
use silicoquest_core::store::{PersistedChapterProgress, ProgressSnapshot};
use tracing::warn;

use super::analytics::PlayAnalytics;
use super::ledger::ScoreLedger;

/// Mutable progress of one chapter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChapterProgress {
    /// Narration stage the learner is on.
    pub narration_stage_index: usize,
    /// Whether the chapter's mini-game has been completed.
    pub game_completed: bool,
    /// Time accrued in earlier visits, in milliseconds.
    pub time_spent_ms: u64,
    /// Set while this chapter is the current one. Never persisted.
    pub active_since_ms: Option<i64>,
}

impl ChapterProgress {
    /// Accrued time including the running visit, if any.
    #[must_use]
    pub fn time_spent_at(&self, now_ms: i64) -> u64 {
        let running = self
            .active_since_ms
            .map_or(0, |since| u64::try_from(now_ms.saturating_sub(since)).unwrap_or(0));
        self.time_spent_ms.saturating_add(running)
    }
}

/// The complete progress snapshot of a learner session.
///
/// Only the current chapter ever has a running clock, and the completed set
/// only grows until the state is replaced by a fresh one.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestState {
    current_chapter: u32,
    completed: BTreeSet<u32>,
    progress: BTreeMap<u32, ChapterProgress>,
    ledger: ScoreLedger,
    analytics: PlayAnalytics,
}

impl QuestState {
    /// Initial state: chapter 1 current, everything zeroed.
    #[must_use]
    pub fn new(catalog: &ChapterCatalog) -> Self {
        Self {
            current_chapter: 1,
            completed: BTreeSet::new(),
            progress: catalog
                .chapters()
                .iter()
                .map(|c| (c.number, ChapterProgress::default()))
                .collect(),
            ledger: ScoreLedger::new(),
            analytics: PlayAnalytics::default(),
        }
    }

    /// Rebuilds state from a persisted snapshot on top of catalog defaults.
    ///
    /// Entries for chapters the catalog does not know are dropped, missing
    /// entries keep their defaults, stage indices are clamped into range, and
    /// a current chapter outside the catalog falls back to chapter 1.
    #[must_use]
    pub fn restore(catalog: &ChapterCatalog, snapshot: &ProgressSnapshot) -> Self {
        let mut state = Self::new(catalog);

        if catalog.contains(snapshot.current_chapter) {
            state.current_chapter = snapshot.current_chapter;
        } else {
            warn!(
                chapter = snapshot.current_chapter,
                "persisted current chapter is not in the catalog; starting at chapter 1"
            );
        }

        state.completed = snapshot
            .completed_chapters
            .iter()
            .copied()
            .filter(|n| catalog.contains(*n))
            .collect();

        for (key, persisted) in &snapshot.chapter_progress {
            let Some(chapter) = key.parse::<u32>().ok().and_then(|n| catalog.get(n)) else {
                continue;
            };
            if let Some(progress) = state.progress.get_mut(&chapter.number) {
                progress.narration_stage_index =
                    persisted.narration_stage_index.min(chapter.last_stage_index());
                progress.game_completed = persisted.game_completed;
                progress.time_spent_ms = persisted.time_spent_ms;
            }
        }

        for (key, score) in &snapshot.chapter_scores {
            let Some(chapter) = key.parse::<u32>().ok().and_then(|n| catalog.get(n)) else {
                continue;
            };
            // Only gated chapters score, and never above their game's ceiling.
            match &chapter.game {
                Some(game) => state.ledger.record(chapter.number, (*score).min(game.max_score)),
                None => warn!(
                    chapter = chapter.number,
                    "dropping score for a chapter without a game"
                ),
            }
        }

        if let Some(value) = &snapshot.analytics {
            match serde_json::from_value::<PlayAnalytics>(value.clone()) {
                Ok(analytics) => state.analytics = analytics,
                Err(e) => warn!(error = %e, "discarding unreadable learner analytics"),
            }
        }

        state
    }

    /// Serializable form of this state. Running clocks are folded into the
    /// reported time without being stopped.
    #[must_use]
    pub fn snapshot(&self, now_ms: i64) -> ProgressSnapshot {
        ProgressSnapshot {
            current_chapter: self.current_chapter,
            completed_chapters: self.completed.iter().copied().collect(),
            chapter_progress: self
                .progress
                .iter()
                .map(|(number, p)| {
                    (
                        number.to_string(),
                        PersistedChapterProgress {
                            narration_stage_index: p.narration_stage_index,
                            game_completed: p.game_completed,
                            time_spent_ms: p.time_spent_at(now_ms),
                        },
                    )
                })
                .collect(),
            chapter_scores: self
                .ledger
                .per_chapter()
                .iter()
                .map(|(number, score)| (number.to_string(), *score))
                .collect(),
            analytics: serde_json::to_value(&self.analytics).ok(),
            last_saved: now_ms,
        }
    }

    /// The chapter the learner is on.
    #[must_use]
    pub fn current_chapter(&self) -> u32 {
        self.current_chapter
    }

    /// Completed chapter numbers.
    #[must_use]
    pub fn completed_chapters(&self) -> &BTreeSet<u32> {
        &self.completed
    }

    /// Whether `chapter` has been completed.
    #[must_use]
    pub fn is_completed(&self, chapter: u32) -> bool {
        self.completed.contains(&chapter)
    }

    /// Whether every chapter of `catalog` has been completed.
    #[must_use]
    pub fn is_quest_complete(&self, catalog: &ChapterCatalog) -> bool {
        catalog
            .chapters()
            .iter()
            .all(|c| self.completed.contains(&c.number))
    }

    /// Progress of `chapter`.
    #[must_use]
    pub fn progress(&self, chapter: u32) -> Option<&ChapterProgress> {
        self.progress.get(&chapter)
    }

    /// Progress of the current chapter.
    #[must_use]
    pub fn current_progress(&self) -> ChapterProgress {
        self.progress
            .get(&self.current_chapter)
            .cloned()
            .unwrap_or_default()
    }

    /// Every chapter's progress.
    #[must_use]
    pub fn chapter_progress(&self) -> &BTreeMap<u32, ChapterProgress> {
        &self.progress
    }

    /// Score ledger.
    #[must_use]
    pub fn ledger(&self) -> &ScoreLedger {
        &self.ledger
    }

    /// Sum of recorded scores.
    #[must_use]
    pub fn total_score(&self) -> u64 {
        self.ledger.total()
    }

    /// Learner analytics.
    #[must_use]
    pub fn analytics(&self) -> &PlayAnalytics {
        &self.analytics
    }

    /// Mutable learner analytics.
    pub fn analytics_mut(&mut self) -> &mut PlayAnalytics {
        &mut self.analytics
    }

    /// Total time spent across all chapters, including the running visit.
    #[must_use]
    pub fn total_time_spent_ms(&self, now_ms: i64) -> u64 {
        self.progress.values().map(|p| p.time_spent_at(now_ms)).sum()
    }

    /// Makes `chapter` current, folding the previous chapter's running time
    /// into its total and starting the clock on the new one.
    ///
    /// Returns `false` and changes nothing if `chapter` has no progress entry.
    pub fn set_current_chapter(&mut self, chapter: u32, now_ms: i64) -> bool {
        if !self.progress.contains_key(&chapter) {
            return false;
        }
        self.stop_clock(now_ms);
        self.current_chapter = chapter;
        self.start_clock(now_ms);
        true
    }

    /// Starts accruing time on the current chapter.
    pub fn start_clock(&mut self, now_ms: i64) {
        for (number, progress) in &mut self.progress {
            if *number == self.current_chapter {
                progress.active_since_ms.get_or_insert(now_ms);
            } else if let Some(since) = progress.active_since_ms.take() {
                let elapsed = u64::try_from(now_ms.saturating_sub(since)).unwrap_or(0);
                progress.time_spent_ms = progress.time_spent_ms.saturating_add(elapsed);
            }
        }
    }

    /// Stops every running clock, folding elapsed time into the totals.
    pub fn stop_clock(&mut self, now_ms: i64) {
        for progress in self.progress.values_mut() {
            if let Some(since) = progress.active_since_ms.take() {
                let elapsed = u64::try_from(now_ms.saturating_sub(since)).unwrap_or(0);
                progress.time_spent_ms = progress.time_spent_ms.saturating_add(elapsed);
            }
        }
    }

    /// Moves the current chapter's narration to `index`.
    pub fn set_stage(&mut self, index: usize) {
        if let Some(progress) = self.progress.get_mut(&self.current_chapter) {
            progress.narration_stage_index = index;
        }
    }

    /// Sets the current chapter's game completion flag.
    pub fn set_game_completed(&mut self, completed: bool) {
        if let Some(progress) = self.progress.get_mut(&self.current_chapter) {
            progress.game_completed = completed;
        }
    }

    /// Adds `chapter` to the completed set.
    pub fn mark_completed(&mut self, chapter: u32) {
        self.completed.insert(chapter);
    }

    /// Records `score` for `chapter`, replacing any earlier score.
    pub fn record_score(&mut self, chapter: u32, score: u32) {
        self.ledger.record(chapter, score);
    }
}
