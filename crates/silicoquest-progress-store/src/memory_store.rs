//! In-memory implementation of the `ProgressStore` trait.

use std::sync::Mutex;

use silicoquest_core::error::QuestError;
use silicoquest_core::store::{ProgressSnapshot, ProgressStore};

/// Keeps the serialized blob in memory for the lifetime of the process.
///
/// The snapshot is stored in its JSON form so loads go through the same
/// parsing path as durable stores.
#[derive(Debug, Default)]
pub struct InMemoryProgressStore {
    blob: Mutex<Option<String>>,
}

impl InMemoryProgressStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-filled with a raw blob.
    #[must_use]
    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            blob: Mutex::new(Some(blob.into())),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Option<String>>, QuestError> {
        self.blob
            .lock()
            .map_err(|_| QuestError::Persistence("progress store lock poisoned".to_owned()))
    }
}

impl ProgressStore for InMemoryProgressStore {
    fn load(&self) -> Result<Option<ProgressSnapshot>, QuestError> {
        self.lock()?
            .as_deref()
            .map(ProgressSnapshot::from_json)
            .transpose()
    }

    fn save(&self, snapshot: &ProgressSnapshot) -> Result<(), QuestError> {
        let blob = snapshot.to_json()?;
        *self.lock()? = Some(blob);
        Ok(())
    }

    fn reset(&self) -> Result<(), QuestError> {
        *self.lock()? = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_store_loads_none() {
        let store = InMemoryProgressStore::new();

        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_save_then_load_returns_snapshot() {
        // Arrange
        let store = InMemoryProgressStore::new();
        let snapshot = ProgressSnapshot {
            current_chapter: 4,
            completed_chapters: vec![1, 2, 3],
            last_saved: 1_700_000_000_000,
            ..ProgressSnapshot::default()
        };

        // Act
        store.save(&snapshot).unwrap();

        // Assert
        assert_eq!(store.load().unwrap(), Some(snapshot));
    }

    #[test]
    fn test_corrupt_blob_is_a_persistence_error() {
        let store = InMemoryProgressStore::with_blob("{not json");

        assert!(matches!(store.load(), Err(QuestError::Persistence(_))));
    }

    #[test]
    fn test_reset_is_idempotent() {
        let store = InMemoryProgressStore::new();
        store.save(&ProgressSnapshot::default()).unwrap();

        store.reset().unwrap();
        store.reset().unwrap();

        assert!(store.load().unwrap().is_none());
    }
}
