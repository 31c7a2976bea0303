//! The validated, immutable chapter catalog.

use sha2::{Digest, Sha256};
use silicoquest_core::error::QuestError;

use super::chapter::Chapter;

/// Ordered list of chapters, numbered contiguously from 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterCatalog {
    chapters: Vec<Chapter>,
    fingerprint: String,
}

impl ChapterCatalog {
    /// Builds a catalog from chapter definitions, sorting them by number.
    ///
    /// # Errors
    ///
    /// Returns `QuestError::InvalidCatalog` if the list is empty, numbers are
    /// not unique and contiguous from 1, a chapter has no narration stages,
    /// or a game declares a zero `max_score`.
    pub fn new(mut chapters: Vec<Chapter>) -> Result<Self, QuestError> {
        if chapters.is_empty() {
            return Err(QuestError::InvalidCatalog(
                "catalog must contain at least one chapter".to_owned(),
            ));
        }

        chapters.sort_by_key(|c| c.number);

        for (position, chapter) in (1_u32..).zip(&chapters) {
            if chapter.number != position {
                return Err(QuestError::InvalidCatalog(format!(
                    "chapter numbers must be unique and contiguous from 1: expected {position}, found {}",
                    chapter.number
                )));
            }
            if chapter.narration_stages.is_empty() {
                return Err(QuestError::InvalidCatalog(format!(
                    "chapter {} has no narration stages",
                    chapter.number
                )));
            }
            if chapter.game.as_ref().is_some_and(|g| g.max_score == 0) {
                return Err(QuestError::InvalidCatalog(format!(
                    "chapter {} declares a game with max_score 0",
                    chapter.number
                )));
            }
        }

        let canonical = serde_json::to_vec(&chapters)
            .map_err(|e| QuestError::InvalidCatalog(format!("catalog serialization failed: {e}")))?;
        let fingerprint = format!("{:x}", Sha256::digest(&canonical));

        Ok(Self {
            chapters,
            fingerprint,
        })
    }

    /// All chapters in order.
    #[must_use]
    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    /// Number of chapters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.chapters.len()
    }

    /// Always `false` for a validated catalog.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chapters.is_empty()
    }

    /// The number of the final chapter.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn last_number(&self) -> u32 {
        self.chapters.len() as u32
    }

    /// Whether `number` names a chapter in this catalog.
    #[must_use]
    pub fn contains(&self, number: u32) -> bool {
        number >= 1 && number <= self.last_number()
    }

    /// Returns the chapter with the given number, if any.
    #[must_use]
    pub fn get(&self, number: u32) -> Option<&Chapter> {
        let index = usize::try_from(number).ok()?.checked_sub(1)?;
        self.chapters.get(index)
    }

    /// Returns the chapter with the given number.
    ///
    /// # Errors
    ///
    /// Returns `QuestError::UnknownChapter` if the number is not in the catalog.
    pub fn chapter(&self, number: u32) -> Result<&Chapter, QuestError> {
        self.get(number).ok_or(QuestError::UnknownChapter(number))
    }

    /// Sum of every gating game's `max_score`.
    #[must_use]
    pub fn max_total_score(&self) -> u32 {
        self.chapters
            .iter()
            .filter_map(|c| c.game.as_ref())
            .map(|g| g.max_score)
            .sum()
    }

    /// Hex SHA-256 of the canonical catalog content.
    #[must_use]
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chapter::NarrationStage;
    use silicoquest_core::game::{GameKind, GameSpec};

    fn chapter(number: u32, game: bool) -> Chapter {
        Chapter {
            number,
            title: format!("Chapter {number}"),
            description: String::new(),
            narration_stages: vec![NarrationStage {
                text: "text".to_owned(),
                visual_id: "visual".to_owned(),
                duration_ms: None,
            }],
            game: game.then(|| GameSpec {
                name: "Game".to_owned(),
                kind: GameKind::Quiz,
                description: String::new(),
                max_score: 100,
            }),
            hints: Vec::new(),
        }
    }

    #[test]
    fn test_new_sorts_chapters_by_number() {
        let catalog = ChapterCatalog::new(vec![chapter(2, false), chapter(1, true)]).unwrap();

        assert_eq!(catalog.chapters()[0].number, 1);
        assert_eq!(catalog.last_number(), 2);
        assert_eq!(catalog.chapter(2).unwrap().number, 2);
    }

    #[test]
    fn test_new_rejects_empty_catalog() {
        let result = ChapterCatalog::new(Vec::new());

        assert!(matches!(result, Err(QuestError::InvalidCatalog(_))));
    }

    #[test]
    fn test_new_rejects_gap_in_numbering() {
        let result = ChapterCatalog::new(vec![chapter(1, false), chapter(3, false)]);

        match result {
            Err(QuestError::InvalidCatalog(msg)) => assert!(msg.contains("expected 2")),
            other => panic!("expected InvalidCatalog, got {other:?}"),
        }
    }

    #[test]
    fn test_new_rejects_duplicate_numbers() {
        let result = ChapterCatalog::new(vec![chapter(1, false), chapter(1, true)]);

        assert!(matches!(result, Err(QuestError::InvalidCatalog(_))));
    }

    #[test]
    fn test_new_rejects_chapter_without_stages() {
        let mut empty = chapter(1, false);
        empty.narration_stages.clear();

        let result = ChapterCatalog::new(vec![empty]);

        match result {
            Err(QuestError::InvalidCatalog(msg)) => assert!(msg.contains("no narration stages")),
            other => panic!("expected InvalidCatalog, got {other:?}"),
        }
    }

    #[test]
    fn test_new_rejects_zero_max_score() {
        let mut gated = chapter(1, true);
        if let Some(game) = gated.game.as_mut() {
            game.max_score = 0;
        }

        let result = ChapterCatalog::new(vec![gated]);

        assert!(matches!(result, Err(QuestError::InvalidCatalog(_))));
    }

    #[test]
    fn test_chapter_returns_unknown_chapter_outside_range() {
        let catalog = ChapterCatalog::new(vec![chapter(1, false)]).unwrap();

        assert!(matches!(catalog.chapter(0), Err(QuestError::UnknownChapter(0))));
        assert!(matches!(catalog.chapter(2), Err(QuestError::UnknownChapter(2))));
        assert!(!catalog.contains(0));
        assert!(catalog.contains(1));
    }

    #[test]
    fn test_max_total_score_sums_only_gated_chapters() {
        let catalog =
            ChapterCatalog::new(vec![chapter(1, false), chapter(2, true), chapter(3, true)])
                .unwrap();

        assert_eq!(catalog.max_total_score(), 200);
    }

    #[test]
    fn test_fingerprint_changes_with_content() {
        let a = ChapterCatalog::new(vec![chapter(1, false)]).unwrap();
        let b = ChapterCatalog::new(vec![chapter(1, true)]).unwrap();

        assert_eq!(a.fingerprint().len(), 64);
        assert_ne!(a.fingerprint(), b.fingerprint());
    }
}
