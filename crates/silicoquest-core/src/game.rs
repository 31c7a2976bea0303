//! Mini-game contract shared by the catalog, the controller and game hosts.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Score ceiling used when a game spec does not declare one.
pub const DEFAULT_MAX_SCORE: u32 = 100;

fn default_max_score() -> u32 {
    DEFAULT_MAX_SCORE
}

/// The family of a mini-game. The controller never inspects it; hosts use it
/// to pick an implementation and analytics use it to group results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameKind {
    /// Drag-and-drop sorting.
    Sorting,
    /// Slider-driven control loop.
    Control,
    /// Timing or precision task.
    Precision,
    /// Logic puzzle.
    Puzzle,
    /// Wire-up/connection task.
    Connection,
    /// Block programming.
    Programming,
    /// Multiple-choice quiz.
    Quiz,
    /// Any kind this build does not know about.
    #[serde(other)]
    Other,
}

/// The mini-game that gates leaving a chapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSpec {
    /// Display name.
    pub name: String,
    /// Game family.
    pub kind: GameKind,
    /// Short instructions for the learner.
    #[serde(default)]
    pub description: String,
    /// Scores reported by the game are clamped to `[0, max_score]`.
    #[serde(default = "default_max_score")]
    pub max_score: u32,
}

/// Adaptive difficulty handed to each new game session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Gentler targets for a struggling learner.
    Easy,
    /// Default difficulty.
    #[default]
    Normal,
    /// Tighter targets for a learner who finds things too easy.
    Hard,
}

/// One run of a mini-game, identified by a ticket.
///
/// The ticket is the only way to report completion back to the controller,
/// so a session that has been torn down can never complete a chapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSession {
    /// Ticket for this run.
    pub session_id: Uuid,
    /// Chapter the game gates.
    pub chapter: u32,
    /// The game to run.
    pub game: GameSpec,
    /// Difficulty the host should apply.
    pub difficulty: Difficulty,
    /// How many times the game has been started in this chapter visit,
    /// including this one.
    pub attempt: u32,
}

/// Runs at most one mini-game at a time.
///
/// The host reports completion by calling the controller with the session
/// ticket; it never holds a reference to the controller itself.
pub trait MiniGameHost: Send {
    /// Starts `session`. The controller always calls `teardown` first, but
    /// hosts must also tolerate back-to-back loads.
    fn load(&mut self, session: &GameSession);

    /// Stops the running game and releases its timers and listeners.
    /// Calling it with nothing loaded is a no-op.
    fn teardown(&mut self);
}
