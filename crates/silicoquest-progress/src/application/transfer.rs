//! Export and import of quest progress as a portable JSON document.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use silicoquest_catalog::ChapterCatalog;
use silicoquest_core::error::QuestError;
use silicoquest_core::store::ProgressSnapshot;
use tracing::info;

use crate::domain::state::QuestState;
use crate::domain::stats::QuestStats;

/// Format version written into every export.
pub const EXPORT_VERSION: &str = "1.0";

/// A progress export as handed to the learner.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressExport {
    pub version: String,
    pub export_date: String,
    pub progress: ProgressSnapshot,
    pub stats: QuestStats,
}

#[derive(Debug, Deserialize)]
struct ImportDocument {
    version: String,
    progress: ProgressSnapshot,
}

/// Builds an export document for `state` at `now`.
#[must_use]
pub fn export_progress(
    catalog: &ChapterCatalog,
    state: &QuestState,
    now: DateTime<Utc>,
) -> ProgressExport {
    let now_ms = now.timestamp_millis();
    ProgressExport {
        version: EXPORT_VERSION.to_owned(),
        export_date: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        progress: state.snapshot(now_ms),
        stats: QuestStats::compute(catalog, state, now_ms),
    }
}

/// Parses an export document and merges its progress against `catalog`.
///
/// # Errors
///
/// Returns `QuestError::InvalidImport` if the document is not JSON, lacks
/// `version` or `progress`, or its progress has fields of the wrong shape.
pub fn import_progress(catalog: &ChapterCatalog, document: &str) -> Result<QuestState, QuestError> {
    let parsed: ImportDocument = serde_json::from_str(document)
        .map_err(|e| QuestError::InvalidImport(format!("not a progress export: {e}")))?;
    info!(version = %parsed.version, "importing quest progress");
    Ok(QuestState::restore(catalog, &parsed.progress))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use silicoquest_catalog::application::loader::builtin_catalog;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_export_carries_version_date_and_stats() {
        // Arrange
        let catalog = builtin_catalog().unwrap();
        let mut state = QuestState::new(&catalog);
        state.mark_completed(1);
        state.record_score(1, 95);

        // Act
        let export = export_progress(&catalog, &state, now());

        // Assert
        assert_eq!(export.version, "1.0");
        assert_eq!(export.export_date, "2026-03-14T09:30:00.000Z");
        assert_eq!(export.progress.completed_chapters, vec![1]);
        assert_eq!(export.stats.total_score, 95);
        let json = serde_json::to_value(&export).unwrap();
        assert!(json.get("exportDate").is_some());
        assert_eq!(json["progress"]["chapterScores"]["1"], 95);
    }

    #[test]
    fn test_import_restores_exported_progress() {
        // Arrange
        let catalog = builtin_catalog().unwrap();
        let mut state = QuestState::new(&catalog);
        state.mark_completed(1);
        state.set_current_chapter(2, 0);
        state.record_score(1, 60);
        state.stop_clock(0);
        let document = serde_json::to_string(&export_progress(&catalog, &state, now())).unwrap();

        // Act
        let imported = import_progress(&catalog, &document).unwrap();

        // Assert
        assert_eq!(imported.current_chapter(), 2);
        assert!(imported.is_completed(1));
        assert_eq!(imported.total_score(), 60);
    }

    #[test]
    fn test_import_requires_version() {
        let catalog = builtin_catalog().unwrap();

        let result = import_progress(&catalog, r#"{"progress": {"currentChapter": 2}}"#);

        assert!(matches!(result, Err(QuestError::InvalidImport(_))));
    }

    #[test]
    fn test_import_requires_progress() {
        let catalog = builtin_catalog().unwrap();

        let result = import_progress(&catalog, r#"{"version": "1.0"}"#);

        assert!(matches!(result, Err(QuestError::InvalidImport(_))));
    }

    #[test]
    fn test_import_rejects_non_json() {
        let catalog = builtin_catalog().unwrap();

        let result = import_progress(&catalog, "progress.txt");

        assert!(matches!(result, Err(QuestError::InvalidImport(_))));
    }
}
