//! Completion certificate data handed to the export collaborator.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use silicoquest_core::error::QuestError;
use uuid::Uuid;

/// Program title printed on every certificate.
pub const PROGRAM: &str = "SilicoQuest: The Rock That Became a Brain";

/// Achievement every finisher receives.
pub const EXPLORER_ACHIEVEMENT: &str = "Silicon Science Explorer";

/// Input contract of the certificate artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateData {
    pub student_name: String,
    pub total_score: u64,
    pub max_total_score: u32,
    pub completion_date_iso: String,
    pub chapters_completed: usize,
    pub program: String,
    pub achievements: Vec<String>,
    pub certificate_id: Uuid,
    pub suggested_filename: String,
}

impl CertificateData {
    /// Assembles certificate data for a finished quest.
    ///
    /// # Errors
    ///
    /// Returns `QuestError::MissingStudentName` if `student_name` is blank.
    pub fn issue(
        student_name: &str,
        total_score: u64,
        max_total_score: u32,
        chapters_completed: usize,
        completed_at: DateTime<Utc>,
    ) -> Result<Self, QuestError> {
        let name = student_name.split_whitespace().collect::<Vec<_>>();
        if name.is_empty() {
            return Err(QuestError::MissingStudentName);
        }

        let mut achievements = vec![EXPLORER_ACHIEVEMENT.to_owned()];
        let max = u64::from(max_total_score);
        if max > 0 && total_score * 100 >= max * 90 {
            achievements.push("Outstanding Engineer".to_owned());
        }
        if max > 0 && total_score >= max {
            achievements.push("Perfect Score".to_owned());
        }

        Ok(Self {
            student_name: name.join(" "),
            total_score,
            max_total_score,
            completion_date_iso: completed_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            chapters_completed,
            program: PROGRAM.to_owned(),
            achievements,
            certificate_id: Uuid::new_v4(),
            suggested_filename: format!(
                "SilicoQuest_Certificate_{}_{}.pdf",
                name.join("_"),
                completed_at.format("%Y-%m-%d")
            ),
        })
    }
}
