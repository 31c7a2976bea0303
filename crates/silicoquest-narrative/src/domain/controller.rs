//! The chapter/stage progression controller.
//!
//! Owns the learner's `QuestState` and is its only writer. Every public
//! method runs one synchronous turn: it mutates state, drives the narration
//! renderer and the mini-game host, queues domain events, and saves progress
//! when the current chapter, the completion set or a score changed.
//!
//! The central guarantee: no chapter transition happens while the chapter has
//! a mini-game that is not completed.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use silicoquest_catalog::{Chapter, ChapterCatalog, GameSpec};
use silicoquest_core::clock::Clock;
use silicoquest_core::error::QuestError;
use silicoquest_core::event::EventMetadata;
use silicoquest_core::game::{GameSession, MiniGameHost};
use silicoquest_core::render::{NarrationRenderer, StageView};
use silicoquest_core::store::ProgressStore;
use silicoquest_progress::QuestState;
use silicoquest_progress::application::persistence::{load_quietly, reset_quietly, save_quietly};
use silicoquest_progress::application::transfer::{ProgressExport, export_progress, import_progress};
use silicoquest_progress::domain::analytics::{GameFeedback, GameResult};
use silicoquest_progress::domain::stats::{ChapterSummary, QuestStats, chapter_summaries};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use super::certificate::CertificateData;
use super::events::{
    ChapterCompleted, ChapterEntered, GameCompleted, GameSkipped, GameStarted, ProgressImported,
    ProgressReset, QuestCompleted, QuestEvent, QuestEventKind, StageAdvanced,
};
use super::navigation::{ChapterIndicator, IndicatorState, Navigation, NextAction};
use super::notice::{DEFAULT_NOTICE_TTL_MS, Notice};

/// Tunables for the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerConfig {
    /// How long a task-incomplete notice stays visible.
    pub notice_ttl_ms: i64,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            notice_ttl_ms: DEFAULT_NOTICE_TTL_MS,
        }
    }
}

/// Where the learner is in the quest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum Phase {
    /// Reading narration in a chapter.
    Narrating { chapter: u32, stage_index: usize },
    /// The chapter's mini-game is loaded and has not reported completion.
    AwaitingGame { chapter: u32, session_id: Uuid },
    /// Every chapter is completed.
    QuestComplete,
}

/// Result of a successful `advance()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AdvanceOutcome {
    StageAdvanced { chapter: u32, stage_index: usize },
    GameStarted { session: GameSession },
    ChapterEntered { chapter: u32 },
    QuestCompleted { total_score: u64 },
    /// The quest was already complete; nothing changed.
    AlreadyComplete,
}

/// Result of a mini-game completion report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CompletionOutcome {
    /// The game was marked complete.
    Recorded {
        chapter: u32,
        /// Reported score after clamping.
        score: u32,
        /// Score the ledger holds for the chapter.
        recorded_score: u32,
        feedback: GameFeedback,
    },
    /// A non-terminal report; the game keeps running.
    Progress,
    /// The ticket is stale, torn down or already completed.
    Ignored,
}

#[derive(Debug, Clone, Copy)]
struct Attempts {
    count: u32,
    first_started_ms: i64,
}

/// Drives a learner through the chapter catalog.
pub struct ProgressionController {
    catalog: Arc<ChapterCatalog>,
    store: Arc<dyn ProgressStore>,
    host: Box<dyn MiniGameHost>,
    renderer: Box<dyn NarrationRenderer>,
    clock: Arc<dyn Clock>,
    config: ControllerConfig,
    state: QuestState,
    quest_complete: bool,
    active_game: Option<GameSession>,
    attempts: BTreeMap<u32, Attempts>,
    notice: Option<Notice>,
    events: Vec<QuestEvent>,
    sequence: i64,
    correlation_id: Option<Uuid>,
}

impl fmt::Debug for ProgressionController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressionController")
            .field("current_chapter", &self.state.current_chapter())
            .field("quest_complete", &self.quest_complete)
            .field("active_game", &self.active_game)
            .field("pending_events", &self.events.len())
            .finish_non_exhaustive()
    }
}

impl ProgressionController {
    /// Creates a controller, resuming from `store` when it holds usable
    /// progress.
    ///
    /// A restored chapter resumes at its persisted narration stage. When every
    /// chapter is complete and the last one is current, the controller starts
    /// in `Phase::QuestComplete`.
    #[must_use]
    pub fn new(
        catalog: Arc<ChapterCatalog>,
        store: Arc<dyn ProgressStore>,
        host: Box<dyn MiniGameHost>,
        renderer: Box<dyn NarrationRenderer>,
        clock: Arc<dyn Clock>,
        config: ControllerConfig,
    ) -> Self {
        let restored = load_quietly(store.as_ref(), &catalog);
        let resumed = restored.is_some();
        let state = restored.unwrap_or_else(|| QuestState::new(&catalog));

        let mut controller = Self {
            catalog,
            store,
            host,
            renderer,
            clock,
            config,
            state,
            quest_complete: false,
            active_game: None,
            attempts: BTreeMap::new(),
            notice: None,
            events: Vec::new(),
            sequence: 0,
            correlation_id: None,
        };
        controller.resume();
        info!(
            resumed,
            chapter = controller.state.current_chapter(),
            quest_complete = controller.quest_complete,
            "progression controller ready"
        );
        controller
    }

    fn resume(&mut self) {
        self.quest_complete = self.state.is_quest_complete(&self.catalog)
            && self.state.current_chapter() == self.catalog.last_number();
        if !self.quest_complete {
            self.state.start_clock(self.clock.now_millis());
            self.render_current();
        }
    }

    // --- transitions ---

    /// The single "go forward" action.
    ///
    /// Moves to the next narration stage; at the last stage loads the
    /// chapter's pending mini-game; once the game is done (or the chapter
    /// has none) completes the chapter and enters the next one, or finishes
    /// the quest on the last chapter.
    ///
    /// # Errors
    ///
    /// Returns `QuestError::GatingViolation` if the chapter's game is loaded
    /// and still incomplete; a task-incomplete notice is raised and nothing
    /// else changes. Returns `QuestError::UnknownChapter` if the current
    /// chapter is missing from the catalog.
    pub fn advance(&mut self) -> Result<AdvanceOutcome, QuestError> {
        if self.quest_complete {
            debug!("advance ignored: quest already complete");
            return Ok(AdvanceOutcome::AlreadyComplete);
        }

        let catalog = Arc::clone(&self.catalog);
        let number = self.state.current_chapter();
        let chapter = catalog.chapter(number).inspect_err(|e| {
            error!(error = %e, "current chapter is missing from the catalog");
        })?;
        let progress = self.state.current_progress();

        if progress.narration_stage_index < chapter.last_stage_index() {
            let stage_index = progress.narration_stage_index + 1;
            self.state.set_stage(stage_index);
            self.render_current();
            self.emit(QuestEventKind::StageAdvanced(StageAdvanced {
                chapter: number,
                stage_index,
            }));
            self.persist();
            return Ok(AdvanceOutcome::StageAdvanced {
                chapter: number,
                stage_index,
            });
        }

        if let Some(game) = chapter.game.as_ref().filter(|_| !progress.game_completed) {
            if self.active_game.is_some() {
                self.notice = Some(Notice::task_incomplete(
                    number,
                    &game.name,
                    self.clock.now(),
                    self.config.notice_ttl_ms,
                ));
                warn!(chapter = number, game = %game.name, "advance blocked: task incomplete");
                return Err(QuestError::GatingViolation { chapter: number });
            }
            let session = self.start_game(number, game.clone());
            return Ok(AdvanceOutcome::GameStarted { session });
        }

        Ok(self.complete_chapter(number))
    }

    /// Returns to the previous chapter at stage 0, keeping its completion
    /// flags. Returns the chapter entered.
    ///
    /// # Errors
    ///
    /// Returns `QuestError::NoPreviousChapter` on chapter 1.
    pub fn go_back(&mut self) -> Result<u32, QuestError> {
        let current = self.state.current_chapter();
        if current <= 1 {
            return Err(QuestError::NoPreviousChapter);
        }
        let target = current - 1;
        self.enter_chapter(target);
        Ok(target)
    }

    /// Revisits chapter `n`, which must not be ahead of the current one.
    /// The chapter is loaded at stage 0.
    ///
    /// # Errors
    ///
    /// Returns `QuestError::UnknownChapter` if `n` is not in the catalog and
    /// `QuestError::ChapterLocked` if `n` is ahead of the current chapter.
    /// State is unchanged on error.
    pub fn jump_to(&mut self, n: u32) -> Result<u32, QuestError> {
        if !self.catalog.contains(n) {
            error!(chapter = n, "jump rejected: unknown chapter");
            return Err(QuestError::UnknownChapter(n));
        }
        let current = self.state.current_chapter();
        if n > current {
            return Err(QuestError::ChapterLocked {
                requested: n,
                current,
            });
        }
        self.enter_chapter(n);
        Ok(n)
    }

    /// Completion callback for the mini-game session `session_id`.
    ///
    /// Only the ticket of the currently loaded session is honoured. The first
    /// terminal report marks the game complete and records the clamped score
    /// unless the chapter already has one; later reports on the same ticket
    /// are ignored. Completion does not advance the chapter.
    pub fn on_game_complete(
        &mut self,
        session_id: Uuid,
        completed: bool,
        score: i64,
    ) -> CompletionOutcome {
        if !self
            .active_game
            .as_ref()
            .is_some_and(|s| s.session_id == session_id)
        {
            debug!(%session_id, "ignoring report for inactive game session");
            return CompletionOutcome::Ignored;
        }
        if !completed {
            return CompletionOutcome::Progress;
        }
        let Some(session) = self.stop_game() else {
            return CompletionOutcome::Ignored;
        };

        let now = self.clock.now_millis();
        let chapter = session.chapter;
        let max_score = session.game.max_score;
        let clamped = u32::try_from(score.clamp(0, i64::from(max_score))).unwrap_or(0);

        self.state.set_game_completed(true);
        if !self.state.ledger().has_score(chapter) {
            self.state.record_score(chapter, clamped);
        }
        let recorded_score = self.state.ledger().score(chapter).unwrap_or(clamped);

        let attempts = self.attempts.remove(&chapter).unwrap_or(Attempts {
            count: session.attempt,
            first_started_ms: now,
        });
        let feedback = self.state.analytics_mut().record(
            &GameResult {
                kind: session.game.kind,
                score: clamped,
                max_score,
                time_spent_ms: u64::try_from(now - attempts.first_started_ms).unwrap_or(0),
                attempts: attempts.count,
            },
            now,
        );

        self.notice = None;
        self.emit(QuestEventKind::GameCompleted(GameCompleted {
            chapter,
            session_id,
            score: clamped,
            max_score,
            recorded_score,
            tier: feedback.tier,
        }));
        info!(chapter, score = clamped, recorded_score, "mini-game completed");
        self.persist();

        CompletionOutcome::Recorded {
            chapter,
            score: clamped,
            recorded_score,
            feedback,
        }
    }

    /// Force-completes the current chapter's game with a score of 0.
    ///
    /// # Errors
    ///
    /// Returns `QuestError::NoActiveGame` if the current chapter has no game
    /// or its game is already completed.
    pub fn skip_current_game(&mut self) -> Result<(), QuestError> {
        if self.quest_complete {
            return Err(QuestError::NoActiveGame);
        }
        let number = self.state.current_chapter();
        let has_game = self.catalog.chapter(number)?.has_game();
        if !has_game || self.state.current_progress().game_completed {
            return Err(QuestError::NoActiveGame);
        }

        self.stop_game();
        self.attempts.remove(&number);
        self.state.set_game_completed(true);
        if !self.state.ledger().has_score(number) {
            self.state.record_score(number, 0);
        }
        self.notice = None;
        self.emit(QuestEventKind::GameSkipped(GameSkipped { chapter: number }));
        info!(chapter = number, "mini-game skipped");
        self.persist();
        Ok(())
    }

    /// Tears down the loaded game and loads it again as a new attempt with
    /// a fresh ticket. The narration position is kept.
    ///
    /// # Errors
    ///
    /// Returns `QuestError::NoActiveGame` unless a game is loaded.
    pub fn restart_current_game(&mut self) -> Result<GameSession, QuestError> {
        let Some(previous) = self.stop_game() else {
            return Err(QuestError::NoActiveGame);
        };
        self.notice = None;
        info!(
            chapter = previous.chapter,
            previous_attempt = previous.attempt,
            "restarting mini-game"
        );
        Ok(self.start_game(previous.chapter, previous.game))
    }

    /// Dismisses the current notice. Returns whether one was showing.
    pub fn acknowledge_notice(&mut self) -> bool {
        self.notice.take().is_some()
    }

    /// Clears all progress, including analytics, and returns to chapter 1.
    pub fn reset(&mut self) {
        self.stop_game();
        self.attempts.clear();
        self.notice = None;
        self.quest_complete = false;
        self.state = QuestState::new(&self.catalog);
        reset_quietly(self.store.as_ref());
        self.state.start_clock(self.clock.now_millis());
        self.render_current();
        self.emit(QuestEventKind::ProgressReset(ProgressReset {}));
        info!("quest progress reset");
    }

    /// Replaces progress with an exported document.
    ///
    /// # Errors
    ///
    /// Returns `QuestError::InvalidImport` if the document cannot be read;
    /// state is unchanged in that case.
    pub fn import(&mut self, document: &str) -> Result<(), QuestError> {
        let imported = import_progress(&self.catalog, document)?;

        self.stop_game();
        self.attempts.clear();
        self.notice = None;
        self.state = imported;
        self.resume();
        self.emit(QuestEventKind::ProgressImported(ProgressImported {
            current_chapter: self.state.current_chapter(),
            chapters_completed: self.state.completed_chapters().len(),
        }));
        self.persist();
        Ok(())
    }

    /// Best-effort save of the current state. Returns whether it succeeded.
    pub fn persist(&self) -> bool {
        save_quietly(self.store.as_ref(), &self.state, self.clock.now_millis())
    }

    // --- queries ---

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        if self.quest_complete {
            return Phase::QuestComplete;
        }
        match &self.active_game {
            Some(session) => Phase::AwaitingGame {
                chapter: session.chapter,
                session_id: session.session_id,
            },
            None => Phase::Narrating {
                chapter: self.state.current_chapter(),
                stage_index: self.state.current_progress().narration_stage_index,
            },
        }
    }

    /// The learner's quest state.
    #[must_use]
    pub fn state(&self) -> &QuestState {
        &self.state
    }

    /// The chapter catalog.
    #[must_use]
    pub fn catalog(&self) -> &ChapterCatalog {
        &self.catalog
    }

    /// The currently loaded mini-game session.
    #[must_use]
    pub fn active_game(&self) -> Option<&GameSession> {
        self.active_game.as_ref()
    }

    /// Whether the quest is in its terminal phase.
    #[must_use]
    pub fn is_quest_complete(&self) -> bool {
        self.quest_complete
    }

    /// The notice currently visible, if it has not expired.
    #[must_use]
    pub fn active_notice(&self) -> Option<&Notice> {
        let now = self.clock.now();
        self.notice.as_ref().filter(|n| n.is_active_at(now))
    }

    /// The stage the learner is reading, or `None` once the quest is complete.
    #[must_use]
    pub fn current_stage(&self) -> Option<StageView> {
        if self.quest_complete {
            return None;
        }
        stage_view(
            &self.catalog,
            self.state.current_chapter(),
            self.state.current_progress().narration_stage_index,
        )
    }

    /// Navigation affordances for the binding layer.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn navigation(&self) -> Navigation {
        let current = self.state.current_chapter();
        let next_action = if self.quest_complete {
            NextAction::None
        } else {
            match self.catalog.get(current) {
                None => NextAction::None,
                Some(chapter) => self.next_action_in(chapter),
            }
        };

        let indicators = self
            .catalog
            .chapters()
            .iter()
            .map(|chapter| {
                let state = if chapter.number == current && !self.quest_complete {
                    IndicatorState::Active
                } else if self.state.is_completed(chapter.number) {
                    IndicatorState::Completed
                } else {
                    IndicatorState::Upcoming
                };
                ChapterIndicator {
                    number: chapter.number,
                    title: chapter.title.clone(),
                    state,
                    // Once the quest is finished the last chapter is a revisit target too.
                    clickable: chapter.number < current
                        || (self.quest_complete && chapter.number == current),
                }
            })
            .collect();

        Navigation {
            next_action,
            can_go_back: current > 1,
            progress_percent: f64::from(current) / self.catalog.len() as f64 * 100.0,
            indicators,
        }
    }

    fn next_action_in(&self, chapter: &Chapter) -> NextAction {
        let progress = self.state.current_progress();
        if progress.narration_stage_index < chapter.last_stage_index() {
            NextAction::NextStage
        } else if chapter.has_game() && !progress.game_completed {
            if self.active_game.is_some() {
                NextAction::FinishGame
            } else {
                NextAction::StartGame
            }
        } else if chapter.number == self.catalog.last_number() {
            NextAction::CompleteQuest
        } else {
            NextAction::NextChapter
        }
    }

    /// Whole-quest statistics.
    #[must_use]
    pub fn stats(&self) -> QuestStats {
        QuestStats::compute(&self.catalog, &self.state, self.clock.now_millis())
    }

    /// Per-chapter overview.
    #[must_use]
    pub fn chapter_summaries(&self) -> Vec<ChapterSummary> {
        chapter_summaries(&self.catalog, &self.state, self.clock.now_millis())
    }

    /// Portable export of the current progress.
    #[must_use]
    pub fn export(&self) -> ProgressExport {
        export_progress(&self.catalog, &self.state, self.clock.now())
    }

    /// Certificate data for a finished quest.
    ///
    /// # Errors
    ///
    /// Returns `QuestError::QuestIncomplete` unless every chapter is completed
    /// and `QuestError::MissingStudentName` if the name is blank.
    pub fn certificate(&self, student_name: &str) -> Result<CertificateData, QuestError> {
        if !self.state.is_quest_complete(&self.catalog) {
            return Err(QuestError::QuestIncomplete);
        }
        let certificate = CertificateData::issue(
            student_name,
            self.state.total_score(),
            self.catalog.max_total_score(),
            self.state.completed_chapters().len(),
            self.clock.now(),
        )?;
        info!(certificate_id = %certificate.certificate_id, "certificate issued");
        Ok(certificate)
    }

    /// Current time according to the controller's clock.
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Drains queued domain events, oldest first.
    pub fn take_events(&mut self) -> Vec<QuestEvent> {
        std::mem::take(&mut self.events)
    }

    /// Sets the correlation ID stamped on subsequently queued events.
    pub(crate) fn correlate(&mut self, correlation_id: Option<Uuid>) {
        self.correlation_id = correlation_id;
    }

    // --- internals ---

    fn start_game(&mut self, chapter: u32, game: GameSpec) -> GameSession {
        let now = self.clock.now_millis();
        let attempts = self.attempts.entry(chapter).or_insert(Attempts {
            count: 0,
            first_started_ms: now,
        });
        attempts.count += 1;

        let session = GameSession {
            session_id: Uuid::new_v4(),
            chapter,
            game,
            difficulty: self.state.analytics().difficulty,
            attempt: attempts.count,
        };
        self.host.load(&session);
        self.active_game = Some(session.clone());

        self.emit(QuestEventKind::GameStarted(GameStarted {
            chapter,
            session_id: session.session_id,
            game: session.game.name.clone(),
            difficulty: session.difficulty,
            attempt: session.attempt,
        }));
        info!(
            chapter,
            session_id = %session.session_id,
            game = %session.game.name,
            attempt = session.attempt,
            "mini-game loaded"
        );
        session
    }

    /// Tears down the loaded game, invalidating its ticket.
    fn stop_game(&mut self) -> Option<GameSession> {
        let session = self.active_game.take()?;
        self.host.teardown();
        debug!(session_id = %session.session_id, "mini-game torn down");
        Some(session)
    }

    fn complete_chapter(&mut self, number: u32) -> AdvanceOutcome {
        let now = self.clock.now_millis();
        self.state.mark_completed(number);
        self.notice = None;
        self.emit(QuestEventKind::ChapterCompleted(ChapterCompleted { chapter: number }));

        if number < self.catalog.last_number() {
            let next = number + 1;
            self.state.set_current_chapter(next, now);
            self.state.set_stage(0);
            self.state.set_game_completed(false);
            self.render_current();
            self.emit(QuestEventKind::ChapterEntered(ChapterEntered {
                chapter: next,
                stage_index: 0,
            }));
            info!(completed = number, entered = next, "chapter completed");
            self.persist();
            return AdvanceOutcome::ChapterEntered { chapter: next };
        }

        self.state.stop_clock(now);
        self.quest_complete = true;
        let total_score = self.state.total_score();
        self.emit(QuestEventKind::QuestCompleted(QuestCompleted {
            total_score,
            max_total_score: self.catalog.max_total_score(),
        }));
        info!(total_score, "quest completed");
        self.persist();
        AdvanceOutcome::QuestCompleted { total_score }
    }

    fn enter_chapter(&mut self, number: u32) {
        self.stop_game();
        self.quest_complete = false;
        self.notice = None;
        self.state.set_current_chapter(number, self.clock.now_millis());
        self.state.set_stage(0);
        self.render_current();
        self.emit(QuestEventKind::ChapterEntered(ChapterEntered {
            chapter: number,
            stage_index: 0,
        }));
        debug!(chapter = number, "chapter entered");
        self.persist();
    }

    fn render_current(&mut self) {
        let view = stage_view(
            &self.catalog,
            self.state.current_chapter(),
            self.state.current_progress().narration_stage_index,
        );
        if let Some(view) = view {
            self.renderer.render(&view);
        }
    }

    fn emit(&mut self, kind: QuestEventKind) {
        self.sequence += 1;
        self.events.push(QuestEvent {
            metadata: EventMetadata {
                event_id: Uuid::new_v4(),
                event_type: kind.event_type().to_owned(),
                sequence_number: self.sequence,
                correlation_id: self.correlation_id,
                occurred_at: self.clock.now(),
            },
            kind,
        });
    }
}

fn stage_view(catalog: &ChapterCatalog, chapter: u32, stage_index: usize) -> Option<StageView> {
    let chapter = catalog.get(chapter)?;
    let stage = chapter.stage(stage_index)?;
    Some(StageView {
        chapter: chapter.number,
        chapter_title: chapter.title.clone(),
        stage_index,
        stage_count: chapter.stage_count(),
        text: stage.text.clone(),
        visual_id: stage.visual_id.clone(),
        duration_ms: stage.duration_ms,
    })
}
