//! Narration renderer contract.

use serde::Serialize;

/// Everything a renderer needs to present one narration stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageView {
    /// Chapter being narrated.
    pub chapter: u32,
    /// Chapter title.
    pub chapter_title: String,
    /// Zero-based stage index.
    pub stage_index: usize,
    /// Number of stages in the chapter.
    pub stage_count: usize,
    /// Narration text.
    pub text: String,
    /// Opaque visual key.
    pub visual_id: String,
    /// Cosmetic auto-timeout.
    pub duration_ms: Option<u64>,
}

/// Presents narration stages. The controller does not wait on it.
pub trait NarrationRenderer: Send {
    /// Presents `stage`.
    fn render(&mut self, stage: &StageView);
}
