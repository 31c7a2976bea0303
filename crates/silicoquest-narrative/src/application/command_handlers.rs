//! Command handlers for the progression controller.
//!
//! Each handler runs one controller turn inside a span carrying the command's
//! correlation ID, stamps that ID on the events produced, and returns the
//! outcome together with the drained events.

use silicoquest_core::command::Command;
use silicoquest_core::error::QuestError;
use silicoquest_core::game::GameSession;
use tracing::info_span;

use crate::domain::commands::{
    AcknowledgeNotice, Advance, CompleteGame, GoBack, ImportProgress, JumpToChapter, ResetProgress,
    RestartGame, SkipGame,
};
use crate::domain::controller::{AdvanceOutcome, CompletionOutcome, ProgressionController};
use crate::domain::events::QuestEvent;

/// Outcome of a handled command and the events it produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Handled<T> {
    pub outcome: T,
    pub events: Vec<QuestEvent>,
}

fn within<C, T>(
    controller: &mut ProgressionController,
    command: &C,
    turn: impl FnOnce(&mut ProgressionController) -> T,
) -> Handled<T>
where
    C: Command,
{
    let span = info_span!(
        "quest_command",
        command_type = command.command_type(),
        correlation_id = %command.correlation_id()
    );
    let _entered = span.enter();

    controller.correlate(Some(command.correlation_id()));
    let outcome = turn(controller);
    controller.correlate(None);

    Handled {
        outcome,
        events: controller.take_events(),
    }
}

fn lift<T>(handled: Handled<Result<T, QuestError>>) -> Result<Handled<T>, QuestError> {
    let outcome = handled.outcome?;
    Ok(Handled {
        outcome,
        events: handled.events,
    })
}

/// Handles `Advance`.
///
/// # Errors
///
/// Returns `QuestError::GatingViolation` while the chapter's game is
/// incomplete.
pub fn handle_advance(
    command: &Advance,
    controller: &mut ProgressionController,
) -> Result<Handled<AdvanceOutcome>, QuestError> {
    lift(within(controller, command, ProgressionController::advance))
}

/// Handles `GoBack`.
///
/// # Errors
///
/// Returns `QuestError::NoPreviousChapter` on chapter 1.
pub fn handle_go_back(
    command: &GoBack,
    controller: &mut ProgressionController,
) -> Result<Handled<u32>, QuestError> {
    lift(within(controller, command, ProgressionController::go_back))
}

/// Handles `JumpToChapter`.
///
/// # Errors
///
/// Returns `QuestError::UnknownChapter` or `QuestError::ChapterLocked`.
pub fn handle_jump_to(
    command: &JumpToChapter,
    controller: &mut ProgressionController,
) -> Result<Handled<u32>, QuestError> {
    lift(within(controller, command, |c| c.jump_to(command.chapter)))
}

/// Handles `CompleteGame`.
pub fn handle_complete_game(
    command: &CompleteGame,
    controller: &mut ProgressionController,
) -> Handled<CompletionOutcome> {
    within(controller, command, |c| {
        c.on_game_complete(command.session_id, command.completed, command.score)
    })
}

/// Handles `SkipGame`.
///
/// # Errors
///
/// Returns `QuestError::NoActiveGame` if there is no incomplete game.
pub fn handle_skip_game(
    command: &SkipGame,
    controller: &mut ProgressionController,
) -> Result<Handled<()>, QuestError> {
    lift(within(controller, command, ProgressionController::skip_current_game))
}

/// Handles `RestartGame`. The outcome is the new session.
///
/// # Errors
///
/// Returns `QuestError::NoActiveGame` if no game is loaded.
pub fn handle_restart_game(
    command: &RestartGame,
    controller: &mut ProgressionController,
) -> Result<Handled<GameSession>, QuestError> {
    lift(within(controller, command, ProgressionController::restart_current_game))
}

/// Handles `AcknowledgeNotice`. The outcome tells whether a notice was
/// dismissed.
pub fn handle_acknowledge_notice(
    command: &AcknowledgeNotice,
    controller: &mut ProgressionController,
) -> Handled<bool> {
    within(controller, command, ProgressionController::acknowledge_notice)
}

/// Handles `ResetProgress`.
pub fn handle_reset(
    command: &ResetProgress,
    controller: &mut ProgressionController,
) -> Handled<()> {
    within(controller, command, ProgressionController::reset)
}

/// Handles `ImportProgress`.
///
/// # Errors
///
/// Returns `QuestError::InvalidImport` if the document is unreadable.
pub fn handle_import(
    command: &ImportProgress,
    controller: &mut ProgressionController,
) -> Result<Handled<()>, QuestError> {
    lift(within(controller, command, |c| c.import(&command.document)))
}
