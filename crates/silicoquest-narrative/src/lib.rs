//! SilicoQuest: Chapter/Stage Progression.
//!
//! Responsible for sequencing narration stages, gating chapter transitions
//! on mini-game completion, recording scores, navigation between chapters,
//! task-incomplete notices, and the completion certificate.

pub mod application;
pub mod domain;

pub use domain::controller::{ControllerConfig, ProgressionController};
