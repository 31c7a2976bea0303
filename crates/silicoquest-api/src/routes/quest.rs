//! Routes for driving the learner through the quest.

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use silicoquest_core::event::DomainEvent;
use silicoquest_core::game::GameSession;
use silicoquest_narrative::application::command_handlers::{self, Handled};
use silicoquest_narrative::application::query_handlers::{self, QuestView};
use silicoquest_narrative::domain::certificate::CertificateData;
use silicoquest_narrative::domain::commands;
use silicoquest_narrative::domain::controller::{
    AdvanceOutcome, CompletionOutcome, ProgressionController,
};
use silicoquest_progress::application::transfer::ProgressExport;
use silicoquest_progress::domain::stats::{ChapterSummary, QuestStats};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /jump.
#[derive(Debug, Deserialize)]
pub struct JumpRequest {
    /// Target chapter number.
    pub chapter: u32,
}

/// Request body for POST /game-complete.
#[derive(Debug, Deserialize)]
pub struct GameCompleteRequest {
    /// Ticket of the session reporting.
    pub session_id: Uuid,
    /// Whether this is the terminal report.
    pub completed: bool,
    /// Raw score; clamped by the controller.
    #[serde(default)]
    pub score: i64,
}

/// Request body for POST /certificate.
#[derive(Debug, Deserialize)]
pub struct CertificateRequest {
    pub student_name: String,
}

/// Response body returned after a command is handled.
#[derive(Debug, Serialize)]
pub struct CommandResponse<T> {
    /// What the command did.
    pub outcome: T,
    /// IDs of the domain events produced.
    pub event_ids: Vec<Uuid>,
    /// The quest after the command.
    pub quest: QuestView,
}

fn respond<T>(controller: &ProgressionController, handled: Handled<T>) -> Json<CommandResponse<T>> {
    let event_ids = handled
        .events
        .iter()
        .map(|e| e.metadata().event_id)
        .collect();
    Json(CommandResponse {
        outcome: handled.outcome,
        event_ids,
        quest: query_handlers::get_quest_view(controller),
    })
}

/// GET /
#[instrument(skip(state))]
async fn get_quest(State(state): State<AppState>) -> Json<QuestView> {
    let controller = state.controller();
    Json(query_handlers::get_quest_view(&controller))
}

/// POST /advance
#[instrument(skip(state))]
async fn advance(
    State(state): State<AppState>,
) -> Result<Json<CommandResponse<AdvanceOutcome>>, ApiError> {
    let command = commands::Advance {
        correlation_id: Uuid::new_v4(),
    };
    info!(correlation_id = %command.correlation_id, "handling advance command");

    let mut controller = state.controller();
    let handled = command_handlers::handle_advance(&command, &mut controller)?;
    Ok(respond(&controller, handled))
}

/// POST /back
#[instrument(skip(state))]
async fn go_back(
    State(state): State<AppState>,
) -> Result<Json<CommandResponse<u32>>, ApiError> {
    let command = commands::GoBack {
        correlation_id: Uuid::new_v4(),
    };
    info!(correlation_id = %command.correlation_id, "handling go_back command");

    let mut controller = state.controller();
    let handled = command_handlers::handle_go_back(&command, &mut controller)?;
    Ok(respond(&controller, handled))
}

/// POST /jump
#[instrument(skip(state, request), fields(chapter = request.chapter))]
async fn jump_to(
    State(state): State<AppState>,
    Json(request): Json<JumpRequest>,
) -> Result<Json<CommandResponse<u32>>, ApiError> {
    let command = commands::JumpToChapter {
        correlation_id: Uuid::new_v4(),
        chapter: request.chapter,
    };
    info!(correlation_id = %command.correlation_id, "handling jump_to_chapter command");

    let mut controller = state.controller();
    let handled = command_handlers::handle_jump_to(&command, &mut controller)?;
    Ok(respond(&controller, handled))
}

/// POST /game-complete
#[instrument(skip(state, request), fields(session_id = %request.session_id))]
async fn game_complete(
    State(state): State<AppState>,
    Json(request): Json<GameCompleteRequest>,
) -> Json<CommandResponse<CompletionOutcome>> {
    let command = commands::CompleteGame {
        correlation_id: Uuid::new_v4(),
        session_id: request.session_id,
        completed: request.completed,
        score: request.score,
    };
    info!(correlation_id = %command.correlation_id, "handling complete_game command");

    let mut controller = state.controller();
    let handled = command_handlers::handle_complete_game(&command, &mut controller);
    respond(&controller, handled)
}

/// POST /skip-game
#[instrument(skip(state))]
async fn skip_game(
    State(state): State<AppState>,
) -> Result<Json<CommandResponse<()>>, ApiError> {
    let command = commands::SkipGame {
        correlation_id: Uuid::new_v4(),
    };
    info!(correlation_id = %command.correlation_id, "handling skip_game command");

    let mut controller = state.controller();
    let handled = command_handlers::handle_skip_game(&command, &mut controller)?;
    Ok(respond(&controller, handled))
}

/// POST /restart-game
#[instrument(skip(state))]
async fn restart_game(
    State(state): State<AppState>,
) -> Result<Json<CommandResponse<GameSession>>, ApiError> {
    let command = commands::RestartGame {
        correlation_id: Uuid::new_v4(),
    };
    info!(correlation_id = %command.correlation_id, "handling restart_game command");

    let mut controller = state.controller();
    let handled = command_handlers::handle_restart_game(&command, &mut controller)?;
    Ok(respond(&controller, handled))
}

/// POST /acknowledge-notice
#[instrument(skip(state))]
async fn acknowledge_notice(State(state): State<AppState>) -> Json<CommandResponse<bool>> {
    let command = commands::AcknowledgeNotice {
        correlation_id: Uuid::new_v4(),
    };

    let mut controller = state.controller();
    let handled = command_handlers::handle_acknowledge_notice(&command, &mut controller);
    respond(&controller, handled)
}

/// POST /reset
#[instrument(skip(state))]
async fn reset(State(state): State<AppState>) -> Json<CommandResponse<()>> {
    let command = commands::ResetProgress {
        correlation_id: Uuid::new_v4(),
    };
    info!(correlation_id = %command.correlation_id, "handling reset_progress command");

    let mut controller = state.controller();
    let handled = command_handlers::handle_reset(&command, &mut controller);
    respond(&controller, handled)
}

/// POST /import
///
/// The body is a document previously returned by GET /export.
#[instrument(skip(state, document))]
async fn import(
    State(state): State<AppState>,
    Json(document): Json<serde_json::Value>,
) -> Result<Json<CommandResponse<()>>, ApiError> {
    let command = commands::ImportProgress {
        correlation_id: Uuid::new_v4(),
        document: document.to_string(),
    };
    info!(correlation_id = %command.correlation_id, "handling import_progress command");

    let mut controller = state.controller();
    let handled = command_handlers::handle_import(&command, &mut controller)?;
    Ok(respond(&controller, handled))
}

/// GET /stats
async fn stats(State(state): State<AppState>) -> Json<QuestStats> {
    Json(state.controller().stats())
}

/// GET /chapters
async fn chapters(State(state): State<AppState>) -> Json<Vec<ChapterSummary>> {
    Json(state.controller().chapter_summaries())
}

/// GET /export
#[instrument(skip(state))]
async fn export(State(state): State<AppState>) -> Json<ProgressExport> {
    Json(state.controller().export())
}

/// POST /certificate
#[instrument(skip(state, request))]
async fn certificate(
    State(state): State<AppState>,
    Json(request): Json<CertificateRequest>,
) -> Result<Json<CertificateData>, ApiError> {
    let certificate = state.controller().certificate(&request.student_name)?;
    Ok(Json(certificate))
}

/// Returns the router for the quest.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_quest))
        .route("/advance", post(advance))
        .route("/back", post(go_back))
        .route("/jump", post(jump_to))
        .route("/game-complete", post(game_complete))
        .route("/skip-game", post(skip_game))
        .route("/restart-game", post(restart_game))
        .route("/acknowledge-notice", post(acknowledge_notice))
        .route("/reset", post(reset))
        .route("/import", post(import))
        .route("/stats", get(stats))
        .route("/chapters", get(chapters))
        .route("/export", get(export))
        .route("/certificate", post(certificate))
}
