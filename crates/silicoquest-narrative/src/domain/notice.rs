//! Dismissible, auto-expiring notices shown to the learner.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// Default time a notice stays visible.
pub const DEFAULT_NOTICE_TTL_MS: i64 = 8_000;

/// What the notice is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    /// The learner tried to move on while the chapter's game is unfinished.
    TaskIncomplete,
}

/// A notice raised by the controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub kind: NoticeKind,
    pub chapter: u32,
    pub message: String,
    pub raised_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Notice {
    /// Raises a task-incomplete notice for `chapter`. A lifetime too large
    /// to represent keeps the notice up until dismissed.
    #[must_use]
    pub fn task_incomplete(chapter: u32, game: &str, now: DateTime<Utc>, ttl_ms: i64) -> Self {
        Self {
            kind: NoticeKind::TaskIncomplete,
            chapter,
            message: format!(
                "Finish {game} to continue, or skip it to move on with a score of 0."
            ),
            raised_at: now,
            expires_at: Duration::try_milliseconds(ttl_ms)
                .and_then(|ttl| now.checked_add_signed(ttl))
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        }
    }

    /// Whether the notice is still visible at `now`.
    #[must_use]
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_notice_expires_after_ttl() {
        let now = Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap();

        let notice = Notice::task_incomplete(2, "Furnace Control", now, 8_000);

        assert!(notice.is_active_at(now));
        assert!(notice.is_active_at(now + Duration::milliseconds(7_999)));
        assert!(!notice.is_active_at(now + Duration::milliseconds(8_000)));
        assert!(notice.message.contains("Furnace Control"));
    }

    #[test]
    fn test_huge_ttl_saturates_instead_of_overflowing() {
        // Arrange
        let now = Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap();

        // Act
        let notice = Notice::task_incomplete(2, "Furnace Control", now, 9_000_000_000_000_000);

        // Assert
        assert_eq!(notice.expires_at, DateTime::<Utc>::MAX_UTC);
        assert!(notice.is_active_at(now));
    }
}
