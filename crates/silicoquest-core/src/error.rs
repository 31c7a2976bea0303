//! Domain error types.

use thiserror::Error;

/// Top-level error type for quest progression.
///
/// Every variant is recoverable in place: the controller leaves its state
/// untouched when it returns one of these.
#[derive(Debug, Error)]
pub enum QuestError {
    /// The learner tried to leave a chapter whose mini-game is incomplete.
    #[error("chapter {chapter} has an incomplete task")]
    GatingViolation {
        /// The gated chapter.
        chapter: u32,
    },

    /// A chapter number that is not part of the catalog.
    #[error("chapter {0} does not exist")]
    UnknownChapter(u32),

    /// A jump ahead of the current chapter.
    #[error("chapter {requested} is locked (current chapter is {current})")]
    ChapterLocked {
        /// The chapter that was requested.
        requested: u32,
        /// The chapter the learner is on.
        current: u32,
    },

    /// Going back from the first chapter.
    #[error("already at the first chapter")]
    NoPreviousChapter,

    /// The current chapter has no incomplete mini-game to act on.
    #[error("no mini-game is pending in the current chapter")]
    NoActiveGame,

    /// A certificate was requested before every chapter was completed.
    #[error("quest is not complete yet")]
    QuestIncomplete,

    /// The chapter catalog failed validation.
    #[error("invalid chapter catalog: {0}")]
    InvalidCatalog(String),

    /// The backing storage medium is unavailable or corrupt.
    #[error("persistence failure: {0}")]
    Persistence(String),

    /// An exported progress document could not be imported.
    #[error("invalid progress import: {0}")]
    InvalidImport(String),

    /// A certificate was requested without a student name.
    #[error("a student name is required for the certificate")]
    MissingStudentName,
}
