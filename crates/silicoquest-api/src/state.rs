//! Shared application state.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use silicoquest_catalog::ChapterCatalog;
use silicoquest_narrative::ProgressionController;

/// Application state shared across all request handlers.
///
/// Requests are serialized through the controller lock; each handler runs
/// one synchronous controller turn and never holds the lock across an await.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The learner's progression controller.
    pub controller: Arc<Mutex<ProgressionController>>,
    /// The chapter catalog.
    pub catalog: Arc<ChapterCatalog>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(controller: ProgressionController, catalog: Arc<ChapterCatalog>) -> Self {
        Self {
            controller: Arc::new(Mutex::new(controller)),
            catalog,
        }
    }

    /// Locks the controller. A panic in an earlier turn does not make the
    /// quest unusable.
    pub fn controller(&self) -> MutexGuard<'_, ProgressionController> {
        self.controller
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
