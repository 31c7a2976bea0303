//! SilicoQuest: Chapter Catalog.
//!
//! Responsible for the immutable, ordered list of chapters the learner walks
//! through: narration stages, gating mini-game specs, hints, YAML loading,
//! validation and fingerprinting.

pub mod application;
pub mod domain;

pub use domain::catalog::ChapterCatalog;
pub use domain::chapter::{Chapter, NarrationStage};
pub use silicoquest_core::game::{DEFAULT_MAX_SCORE, GameKind, GameSpec};
