//! SilicoQuest: API error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use silicoquest_core::error::QuestError;
use thiserror::Error;

/// Startup and runtime errors for the API server.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// The chapter catalog could not be loaded.
    #[error("quest setup error: {0}")]
    Quest(#[from] QuestError),

    /// Network binding or I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable error message.
    pub message: String,
}

/// HTTP-layer wrapper around `QuestError` that implements `IntoResponse`.
#[derive(Debug)]
pub struct ApiError(pub QuestError);

impl From<QuestError> for ApiError {
    fn from(err: QuestError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = match &self.0 {
            QuestError::GatingViolation { .. } => (StatusCode::CONFLICT, "gating_violation"),
            QuestError::ChapterLocked { .. } => (StatusCode::CONFLICT, "chapter_locked"),
            QuestError::NoPreviousChapter => (StatusCode::CONFLICT, "no_previous_chapter"),
            QuestError::NoActiveGame => (StatusCode::CONFLICT, "no_active_game"),
            QuestError::QuestIncomplete => (StatusCode::CONFLICT, "quest_incomplete"),
            QuestError::UnknownChapter(_) => (StatusCode::NOT_FOUND, "unknown_chapter"),
            QuestError::InvalidImport(_) => (StatusCode::BAD_REQUEST, "invalid_import"),
            QuestError::InvalidCatalog(_) => (StatusCode::BAD_REQUEST, "invalid_catalog"),
            QuestError::MissingStudentName => (StatusCode::BAD_REQUEST, "missing_student_name"),
            QuestError::Persistence(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "persistence_error")
            }
        };

        let body = ErrorBody {
            error: error_code,
            message: self.0.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn status_of(err: QuestError) -> StatusCode {
        let response = ApiError(err).into_response();
        response.status()
    }

    #[test]
    fn test_gating_violation_maps_to_409() {
        assert_eq!(
            status_of(QuestError::GatingViolation { chapter: 2 }),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_navigation_conflicts_map_to_409() {
        assert_eq!(
            status_of(QuestError::ChapterLocked {
                requested: 5,
                current: 2
            }),
            StatusCode::CONFLICT
        );
        assert_eq!(status_of(QuestError::NoPreviousChapter), StatusCode::CONFLICT);
        assert_eq!(status_of(QuestError::NoActiveGame), StatusCode::CONFLICT);
        assert_eq!(status_of(QuestError::QuestIncomplete), StatusCode::CONFLICT);
    }

    #[test]
    fn test_unknown_chapter_maps_to_404() {
        assert_eq!(status_of(QuestError::UnknownChapter(9)), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_bad_input_maps_to_400() {
        assert_eq!(
            status_of(QuestError::InvalidImport("missing version".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(status_of(QuestError::MissingStudentName), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_persistence_maps_to_500() {
        assert_eq!(
            status_of(QuestError::Persistence("disk full".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_startup_failures_convert_into_app_error() {
        fn load_catalog() -> Result<(), AppError> {
            Err::<(), _>(QuestError::InvalidCatalog("no chapters".into()))?;
            Ok(())
        }
        fn bind() -> Result<(), AppError> {
            Err::<(), _>(std::io::Error::from(std::io::ErrorKind::AddrInUse))?;
            Ok(())
        }

        assert!(matches!(load_catalog(), Err(AppError::Quest(_))));
        assert!(matches!(bind(), Err(AppError::Server(_))));
    }
}
