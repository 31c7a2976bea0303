//! Navigation affordances derived from controller state.

use serde::Serialize;

/// What the "go forward" control would do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NextAction {
    NextStage,
    StartGame,
    /// A game is running; forward is blocked until it reports completion.
    FinishGame,
    NextChapter,
    CompleteQuest,
    None,
}

/// Display state of a chapter indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorState {
    Active,
    Completed,
    Upcoming,
}

/// One dot in the chapter indicator strip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterIndicator {
    pub number: u32,
    pub title: String,
    pub state: IndicatorState,
    /// Earlier chapters are jump targets.
    pub clickable: bool,
}

/// Everything a binding layer needs to draw the navigation controls.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Navigation {
    pub next_action: NextAction,
    pub can_go_back: bool,
    /// `current / N × 100`.
    pub progress_percent: f64,
    pub indicators: Vec<ChapterIndicator>,
}
