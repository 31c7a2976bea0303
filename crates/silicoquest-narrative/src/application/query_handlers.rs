//! Query handlers for the progression controller.
//!
//! Builds read-only view DTOs from controller state.

use serde::Serialize;
use silicoquest_core::game::{Difficulty, GameSession};
use silicoquest_core::render::StageView;

use crate::domain::controller::{Phase, ProgressionController};
use crate::domain::navigation::Navigation;
use crate::domain::notice::Notice;

/// Read-only view of the current chapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterView {
    pub number: u32,
    pub title: String,
    pub description: String,
    pub hints: Vec<String>,
    pub game: Option<String>,
    pub game_completed: bool,
}

/// Everything a client needs to draw the quest screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestView {
    pub phase: Phase,
    pub chapter: Option<ChapterView>,
    pub stage: Option<StageView>,
    pub active_game: Option<GameSession>,
    pub navigation: Navigation,
    pub notice: Option<Notice>,
    pub completed_chapters: Vec<u32>,
    pub total_score: u64,
    pub max_total_score: u32,
    pub difficulty: Difficulty,
}

/// Snapshot view of the controller.
#[must_use]
pub fn get_quest_view(controller: &ProgressionController) -> QuestView {
    let state = controller.state();
    let chapter = controller
        .catalog()
        .get(state.current_chapter())
        .map(|chapter| ChapterView {
            number: chapter.number,
            title: chapter.title.clone(),
            description: chapter.description.clone(),
            hints: chapter.hints.clone(),
            game: chapter.game.as_ref().map(|g| g.name.clone()),
            game_completed: state.current_progress().game_completed,
        });

    QuestView {
        phase: controller.phase(),
        chapter,
        stage: controller.current_stage(),
        active_game: controller.active_game().cloned(),
        navigation: controller.navigation(),
        notice: controller.active_notice().cloned(),
        completed_chapters: state.completed_chapters().iter().copied().collect(),
        total_score: state.total_score(),
        max_total_score: controller.catalog().max_total_score(),
        difficulty: state.analytics().difficulty,
    }
}
