//! Learner analytics: performance tiers, strengths, and adaptive difficulty.

use serde::{Deserialize, Serialize};
use silicoquest_core::game::{Difficulty, GameKind};

/// One finished mini-game, as seen by analytics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameResult {
    /// Game family.
    pub kind: GameKind,
    /// Clamped score.
    pub score: u32,
    /// The game's score ceiling.
    pub max_score: u32,
    /// Time from the first start of the game to its completion.
    pub time_spent_ms: u64,
    /// Number of times the game was started before it was completed.
    pub attempts: u32,
}

impl GameResult {
    /// Score as a percentage of the game's ceiling.
    #[must_use]
    pub fn percent(&self) -> u32 {
        if self.max_score == 0 {
            return 0;
        }
        let pct = u64::from(self.score) * 100 / u64::from(self.max_score);
        u32::try_from(pct).unwrap_or(u32::MAX)
    }
}

/// Coarse feedback band for a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceTier {
    /// 90% and above.
    Outstanding,
    /// 80–89%.
    Excellent,
    /// 70–79%.
    Good,
    /// 60–69%.
    Fair,
    /// Below 60%.
    NeedsPractice,
}

impl PerformanceTier {
    /// Band for a percentage score.
    #[must_use]
    pub fn from_percent(percent: u32) -> Self {
        match percent {
            90.. => Self::Outstanding,
            80..=89 => Self::Excellent,
            70..=79 => Self::Good,
            60..=69 => Self::Fair,
            _ => Self::NeedsPractice,
        }
    }
}

/// Why difficulty changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentReason {
    /// Near-perfect on the first attempt.
    TooEasy,
    /// Low score after many attempts.
    TooHard,
}

/// A recorded change of difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DifficultyAdjustment {
    /// Previous level.
    pub from: Difficulty,
    /// New level.
    pub to: Difficulty,
    /// Trigger.
    pub reason: AdjustmentReason,
    /// When the change happened, in epoch milliseconds.
    pub at_ms: i64,
}

/// Feedback produced for one finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameFeedback {
    /// Performance band.
    pub tier: PerformanceTier,
    /// Completed on the first attempt.
    pub first_try: bool,
    /// Difficulty change triggered by this result, if any.
    pub adjustment: Option<DifficultyAdjustment>,
}

/// Running statistics about the learner's mini-game play.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayAnalytics {
    /// Number of games completed.
    pub games_completed: u32,
    /// Total time spent in completed games.
    pub total_play_time_ms: u64,
    /// Running mean of percentage scores.
    pub average_score: f64,
    /// Game kinds the learner handles well.
    pub strengths: Vec<GameKind>,
    /// Game kinds the learner struggles with.
    pub struggling_areas: Vec<GameKind>,
    /// Difficulty for the next game.
    pub difficulty: Difficulty,
    /// Every difficulty change, oldest first.
    pub adjustment_history: Vec<DifficultyAdjustment>,
}

impl PlayAnalytics {
    /// Folds a finished game into the statistics and returns feedback.
    pub fn record(&mut self, result: &GameResult, now_ms: i64) -> GameFeedback {
        let percent = result.percent();

        self.games_completed += 1;
        self.total_play_time_ms += result.time_spent_ms;
        let n = f64::from(self.games_completed);
        self.average_score = (self.average_score * (n - 1.0) + f64::from(percent)) / n;

        if percent >= 80 && result.attempts <= 2 {
            if !self.strengths.contains(&result.kind) {
                self.strengths.push(result.kind);
            }
            self.struggling_areas.retain(|k| *k != result.kind);
        } else if (percent < 60 || result.attempts > 3) && !self.struggling_areas.contains(&result.kind)
        {
            self.struggling_areas.push(result.kind);
        }

        let adjustment = if percent >= 95 && result.attempts == 1 {
            self.adjust(AdjustmentReason::TooEasy, now_ms)
        } else if percent < 50 && result.attempts > 3 {
            self.adjust(AdjustmentReason::TooHard, now_ms)
        } else {
            None
        };

        GameFeedback {
            tier: PerformanceTier::from_percent(percent),
            first_try: result.attempts == 1,
            adjustment,
        }
    }

    fn adjust(&mut self, reason: AdjustmentReason, now_ms: i64) -> Option<DifficultyAdjustment> {
        let to = match (reason, self.difficulty) {
            (AdjustmentReason::TooEasy, Difficulty::Easy) => Difficulty::Normal,
            (AdjustmentReason::TooEasy, Difficulty::Normal) => Difficulty::Hard,
            (AdjustmentReason::TooHard, Difficulty::Hard) => Difficulty::Normal,
            (AdjustmentReason::TooHard, Difficulty::Normal) => Difficulty::Easy,
            _ => return None,
        };
        let adjustment = DifficultyAdjustment {
            from: self.difficulty,
            to,
            reason,
            at_ms: now_ms,
        };
        self.difficulty = to;
        self.adjustment_history.push(adjustment);
        Some(adjustment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(kind: GameKind, score: u32, attempts: u32) -> GameResult {
        GameResult {
            kind,
            score,
            max_score: 100,
            time_spent_ms: 30_000,
            attempts,
        }
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(PerformanceTier::from_percent(100), PerformanceTier::Outstanding);
        assert_eq!(PerformanceTier::from_percent(90), PerformanceTier::Outstanding);
        assert_eq!(PerformanceTier::from_percent(89), PerformanceTier::Excellent);
        assert_eq!(PerformanceTier::from_percent(70), PerformanceTier::Good);
        assert_eq!(PerformanceTier::from_percent(60), PerformanceTier::Fair);
        assert_eq!(PerformanceTier::from_percent(59), PerformanceTier::NeedsPractice);
    }

    #[test]
    fn test_percent_scales_by_max_score() {
        let r = GameResult {
            max_score: 80,
            ..result(GameKind::Quiz, 60, 1)
        };

        assert_eq!(r.percent(), 75);
    }

    #[test]
    fn test_record_updates_running_average_and_play_time() {
        // Arrange
        let mut analytics = PlayAnalytics::default();

        // Act
        analytics.record(&result(GameKind::Sorting, 80, 2), 0);
        analytics.record(&result(GameKind::Control, 60, 2), 0);

        // Assert
        assert_eq!(analytics.games_completed, 2);
        assert_eq!(analytics.total_play_time_ms, 60_000);
        assert!((analytics.average_score - 70.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_strong_result_moves_kind_from_struggling_to_strengths() {
        let mut analytics = PlayAnalytics::default();

        analytics.record(&result(GameKind::Puzzle, 40, 2), 0);
        assert_eq!(analytics.struggling_areas, vec![GameKind::Puzzle]);

        analytics.record(&result(GameKind::Puzzle, 85, 1), 0);
        assert_eq!(analytics.strengths, vec![GameKind::Puzzle]);
        assert!(analytics.struggling_areas.is_empty());
    }

    #[test]
    fn test_many_attempts_marks_struggling_even_with_good_score() {
        let mut analytics = PlayAnalytics::default();

        analytics.record(&result(GameKind::Connection, 75, 4), 0);

        assert_eq!(analytics.struggling_areas, vec![GameKind::Connection]);
    }

    #[test]
    fn test_near_perfect_first_try_raises_difficulty() {
        // Arrange
        let mut analytics = PlayAnalytics::default();

        // Act
        let feedback = analytics.record(&result(GameKind::Quiz, 98, 1), 1_000);

        // Assert
        assert!(feedback.first_try);
        assert_eq!(feedback.tier, PerformanceTier::Outstanding);
        let adjustment = feedback.adjustment.unwrap();
        assert_eq!(adjustment.from, Difficulty::Normal);
        assert_eq!(adjustment.to, Difficulty::Hard);
        assert_eq!(adjustment.reason, AdjustmentReason::TooEasy);
        assert_eq!(adjustment.at_ms, 1_000);
        assert_eq!(analytics.difficulty, Difficulty::Hard);
        assert_eq!(analytics.adjustment_history.len(), 1);
    }

    #[test]
    fn test_difficulty_does_not_rise_above_hard() {
        let mut analytics = PlayAnalytics {
            difficulty: Difficulty::Hard,
            ..PlayAnalytics::default()
        };

        let feedback = analytics.record(&result(GameKind::Quiz, 100, 1), 0);

        assert!(feedback.adjustment.is_none());
        assert_eq!(analytics.difficulty, Difficulty::Hard);
    }

    #[test]
    fn test_repeated_failure_lowers_difficulty_one_step() {
        let mut analytics = PlayAnalytics::default();

        let feedback = analytics.record(&result(GameKind::Precision, 30, 5), 0);

        assert_eq!(feedback.tier, PerformanceTier::NeedsPractice);
        assert_eq!(feedback.adjustment.unwrap().to, Difficulty::Easy);
        assert_eq!(analytics.difficulty, Difficulty::Easy);
    }
}
