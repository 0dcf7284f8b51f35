//! Result tiers for the quiz summary

use serde::{Deserialize, Serialize};

/// Ratios at or above this (and below the top threshold) are mid tier
pub const MID_TIER_THRESHOLD: f64 = 0.6;
/// Ratios at or above this are top tier
pub const TOP_TIER_THRESHOLD: f64 = 0.8;

/// Summary band derived from `score / question_count`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreTier {
    Low,
    Mid,
    Top,
}

impl ScoreTier {
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio >= TOP_TIER_THRESHOLD {
            ScoreTier::Top
        } else if ratio >= MID_TIER_THRESHOLD {
            ScoreTier::Mid
        } else {
            ScoreTier::Low
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ScoreTier::Top => "Excellent! You know the ancient instruments inside out.",
            ScoreTier::Mid => "Not bad! You know a fair bit about traditional instruments. Keep going!",
            ScoreTier::Low => "Keep practising! Visit the gallery and listen to each instrument again.",
        }
    }
}

/// Score snapshot, partial while a quiz is running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    pub score: usize,
    pub question_count: usize,
}

impl QuizResult {
    /// Fraction of questions answered correctly, 0 for an empty quiz
    pub fn ratio(&self) -> f64 {
        if self.question_count == 0 {
            return 0.0;
        }
        self.score as f64 / self.question_count as f64
    }

    pub fn tier(&self) -> ScoreTier {
        ScoreTier::from_ratio(self.ratio())
    }

    pub fn message(&self) -> &'static str {
        self.tier().message()
    }
}

impl std::fmt::Display for QuizResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} / {}", self.score, self.question_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(score: usize, question_count: usize) -> QuizResult {
        QuizResult {
            score,
            question_count,
        }
    }

    #[test]
    fn test_tiers_for_five_questions() {
        assert_eq!(result(0, 5).tier(), ScoreTier::Low);
        assert_eq!(result(2, 5).tier(), ScoreTier::Low);
        assert_eq!(result(3, 5).tier(), ScoreTier::Mid);
        assert_eq!(result(4, 5).tier(), ScoreTier::Top);
        assert_eq!(result(5, 5).tier(), ScoreTier::Top);
    }

    #[test]
    fn test_boundaries() {
        assert_eq!(ScoreTier::from_ratio(0.59), ScoreTier::Low);
        assert_eq!(ScoreTier::from_ratio(0.6), ScoreTier::Mid);
        assert_eq!(ScoreTier::from_ratio(0.79), ScoreTier::Mid);
        assert_eq!(ScoreTier::from_ratio(0.8), ScoreTier::Top);
    }

    #[test]
    fn test_empty_quiz_ratio() {
        assert_eq!(result(0, 0).ratio(), 0.0);
        assert_eq!(result(0, 0).tier(), ScoreTier::Low);
    }

    #[test]
    fn test_display() {
        assert_eq!(result(3, 5).to_string(), "3 / 5");
    }
}
