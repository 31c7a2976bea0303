//! Per-chapter score ledger.

use std::collections::BTreeMap;

/// Recorded mini-game scores, one per chapter.
///
/// `total()` is always the sum of `per_chapter()`; chapters never played
/// contribute nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreLedger {
    scores: BTreeMap<u32, u32>,
    total: u64,
}

impl ScoreLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `score` for `chapter`, replacing any earlier score.
    pub fn record(&mut self, chapter: u32, score: u32) {
        self.scores.insert(chapter, score);
        self.total = self.scores.values().copied().map(u64::from).sum();
    }

    /// Sum of every recorded score.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Recorded scores keyed by chapter number.
    #[must_use]
    pub fn per_chapter(&self) -> &BTreeMap<u32, u32> {
        &self.scores
    }

    /// The score recorded for `chapter`, if any.
    #[must_use]
    pub fn score(&self, chapter: u32) -> Option<u32> {
        self.scores.get(&chapter).copied()
    }

    /// Whether a score has been recorded for `chapter`.
    #[must_use]
    pub fn has_score(&self, chapter: u32) -> bool {
        self.scores.contains_key(&chapter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_overwrites_instead_of_adding() {
        // Arrange
        let mut ledger = ScoreLedger::new();

        // Act
        ledger.record(2, 40);
        ledger.record(2, 85);

        // Assert
        assert_eq!(ledger.score(2), Some(85));
        assert_eq!(ledger.total(), 85);
    }

    #[test]
    fn test_total_equals_sum_of_per_chapter_after_mixed_records() {
        let mut ledger = ScoreLedger::new();
        for (chapter, score) in [(1, 90), (3, 10), (1, 70), (8, 100), (3, 0)] {
            ledger.record(chapter, score);
            let sum: u64 = ledger.per_chapter().values().copied().map(u64::from).sum();
            assert_eq!(ledger.total(), sum);
        }
        assert_eq!(ledger.total(), 170);
    }

    #[test]
    fn test_unplayed_chapters_have_no_score() {
        let ledger = ScoreLedger::new();

        assert_eq!(ledger.total(), 0);
        assert!(!ledger.has_score(1));
        assert_eq!(ledger.score(1), None);
    }
}
