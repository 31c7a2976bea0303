//! Integration tests for `JsonFileProgressStore`.

use std::collections::BTreeMap;
use std::path::PathBuf;

use silicoquest_core::error::QuestError;
use silicoquest_core::store::{PersistedChapterProgress, ProgressSnapshot, ProgressStore};
use silicoquest_progress_store::JsonFileProgressStore;
use uuid::Uuid;

/// A fresh path under the system temp directory.
fn scratch_path() -> PathBuf {
    std::env::temp_dir()
        .join(format!("silicoquest-{}", Uuid::new_v4()))
        .join("progress.json")
}

fn sample_snapshot() -> ProgressSnapshot {
    let mut chapter_progress = BTreeMap::new();
    chapter_progress.insert(
        "2".to_owned(),
        PersistedChapterProgress {
            narration_stage_index: 3,
            game_completed: true,
            time_spent_ms: 42_000,
        },
    );
    let mut chapter_scores = BTreeMap::new();
    chapter_scores.insert("1".to_owned(), 90);
    chapter_scores.insert("2".to_owned(), 75);
    ProgressSnapshot {
        current_chapter: 2,
        completed_chapters: vec![1],
        chapter_progress,
        chapter_scores,
        analytics: None,
        last_saved: 1_760_000_000_000,
    }
}

// --- load ---

#[test]
fn test_load_returns_none_when_file_is_missing() {
    let store = JsonFileProgressStore::new(scratch_path());

    let loaded = store.load().unwrap();

    assert!(loaded.is_none());
}

#[test]
fn test_load_reports_corrupt_file() {
    // Arrange
    let path = scratch_path();
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "{\"currentChapter\": \"three\"}").unwrap();
    let store = JsonFileProgressStore::new(&path);

    // Act
    let result = store.load();

    // Assert
    assert!(matches!(result, Err(QuestError::Persistence(_))));
}

#[test]
fn test_load_ignores_unknown_fields_and_fills_missing_ones() {
    // Arrange
    let path = scratch_path();
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(
        &path,
        r#"{"currentChapter": 3, "theme": "dark", "chapterProgress": {"3": {"gameCompleted": true}}}"#,
    )
    .unwrap();
    let store = JsonFileProgressStore::new(&path);

    // Act
    let snapshot = store.load().unwrap().unwrap();

    // Assert
    assert_eq!(snapshot.current_chapter, 3);
    assert!(snapshot.completed_chapters.is_empty());
    assert!(snapshot.chapter_progress["3"].game_completed);
    assert_eq!(snapshot.chapter_progress["3"].narration_stage_index, 0);
}

// --- save + load round-trip ---

#[test]
fn test_save_and_load_round_trip() {
    // Arrange
    let store = JsonFileProgressStore::new(scratch_path());
    let snapshot = sample_snapshot();

    // Act
    store.save(&snapshot).unwrap();
    let loaded = store.load().unwrap();

    // Assert
    assert_eq!(loaded, Some(snapshot));
}

#[test]
fn test_save_overwrites_previous_blob_and_leaves_no_temp_file() {
    // Arrange
    let path = scratch_path();
    let store = JsonFileProgressStore::new(&path);
    store.save(&ProgressSnapshot::default()).unwrap();

    // Act
    store.save(&sample_snapshot()).unwrap();

    // Assert
    assert_eq!(store.load().unwrap().unwrap().current_chapter, 2);
    let leftovers: Vec<_> = std::fs::read_dir(path.parent().unwrap())
        .unwrap()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty());
}

#[test]
fn test_saved_blob_uses_camel_case_fields() {
    let path = scratch_path();
    let store = JsonFileProgressStore::new(&path);

    store.save(&sample_snapshot()).unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.contains("\"currentChapter\":2"));
    assert!(raw.contains("\"narrationStageIndex\":3"));
    assert!(raw.contains("\"lastSaved\""));
}

// --- reset ---

#[test]
fn test_reset_removes_blob_and_is_idempotent() {
    // Arrange
    let store = JsonFileProgressStore::new(scratch_path());
    store.save(&sample_snapshot()).unwrap();

    // Act
    store.reset().unwrap();
    store.reset().unwrap();

    // Assert
    assert!(store.load().unwrap().is_none());
}
