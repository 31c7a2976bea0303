//! Best-effort persistence of quest state.
//!
//! Storage failures never reach the learner: saves and resets log and carry
//! on, and a load that fails for any reason behaves like a first launch.

use silicoquest_catalog::ChapterCatalog;
use silicoquest_core::store::ProgressStore;
use tracing::{debug, warn};

use crate::domain::state::QuestState;

/// Saves `state`, logging instead of failing. Returns whether the write
/// succeeded.
pub fn save_quietly(store: &dyn ProgressStore, state: &QuestState, now_ms: i64) -> bool {
    match store.save(&state.snapshot(now_ms)) {
        Ok(()) => {
            debug!(chapter = state.current_chapter(), "quest progress saved");
            true
        }
        Err(e) => {
            warn!(error = %e, "failed to save quest progress; continuing in memory");
            false
        }
    }
}

/// Loads and merges persisted state, or `None` when nothing usable exists.
#[must_use]
pub fn load_quietly(store: &dyn ProgressStore, catalog: &ChapterCatalog) -> Option<QuestState> {
    match store.load() {
        Ok(Some(snapshot)) => Some(QuestState::restore(catalog, &snapshot)),
        Ok(None) => None,
        Err(e) => {
            warn!(error = %e, "ignoring unreadable quest progress");
            None
        }
    }
}

/// Clears persisted state, logging instead of failing.
pub fn reset_quietly(store: &dyn ProgressStore) {
    if let Err(e) = store.reset() {
        warn!(error = %e, "failed to clear persisted quest progress");
    }
}
