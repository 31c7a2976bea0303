//! Test progress stores: mock `ProgressStore` implementations for tests.

use std::sync::{Arc, Mutex};

use silicoquest_core::error::QuestError;
use silicoquest_core::store::{ProgressSnapshot, ProgressStore};

#[derive(Debug, Default)]
struct Recorded {
    current: Option<ProgressSnapshot>,
    saves: usize,
    resets: usize,
}

/// A progress store that keeps the latest snapshot in memory and counts
/// calls. Clones share the same contents.
#[derive(Debug, Clone, Default)]
pub struct RecordingProgressStore {
    inner: Arc<Mutex<Recorded>>,
}

impl RecordingProgressStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `snapshot`.
    #[must_use]
    pub fn with_snapshot(snapshot: ProgressSnapshot) -> Self {
        let store = Self::new();
        store.inner.lock().unwrap().current = Some(snapshot);
        store
    }

    /// Returns the most recently saved snapshot.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn last_saved(&self) -> Option<ProgressSnapshot> {
        self.inner.lock().unwrap().current.clone()
    }

    /// Number of `save` calls.
    pub fn save_count(&self) -> usize {
        self.inner.lock().unwrap().saves
    }

    /// Number of `reset` calls.
    pub fn reset_count(&self) -> usize {
        self.inner.lock().unwrap().resets
    }
}

impl ProgressStore for RecordingProgressStore {
    fn load(&self) -> Result<Option<ProgressSnapshot>, QuestError> {
        Ok(self.inner.lock().unwrap().current.clone())
    }

    fn save(&self, snapshot: &ProgressSnapshot) -> Result<(), QuestError> {
        let mut inner = self.inner.lock().unwrap();
        inner.current = Some(snapshot.clone());
        inner.saves += 1;
        Ok(())
    }

    fn reset(&self) -> Result<(), QuestError> {
        let mut inner = self.inner.lock().unwrap();
        inner.current = None;
        inner.resets += 1;
        Ok(())
    }
}

/// A progress store whose every operation fails, standing in for storage
/// that is unavailable.
#[derive(Debug, Clone, Copy)]
pub struct FailingProgressStore;

impl ProgressStore for FailingProgressStore {
    fn load(&self) -> Result<Option<ProgressSnapshot>, QuestError> {
        Err(QuestError::Persistence("storage unavailable".into()))
    }

    fn save(&self, _snapshot: &ProgressSnapshot) -> Result<(), QuestError> {
        Err(QuestError::Persistence("storage unavailable".into()))
    }

    fn reset(&self) -> Result<(), QuestError> {
        Err(QuestError::Persistence("storage unavailable".into()))
    }
}
