//! Running tally for a drill session.

use serde::{Deserialize, Serialize};

/// Consecutive correct answers that earn a streak callout.
pub const STREAK_MILESTONE: u32 = 3;

/// Correct/incorrect counts and answer streaks for one sitting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    /// Correct answers.
    pub correct: u32,
    /// Incorrect answers.
    pub incorrect: u32,
    /// Current run of consecutive correct answers.
    pub streak: u32,
    /// Longest run seen this session.
    pub max_streak: u32,
}

impl SessionStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an answer. Returns true when it completes a streak milestone.
    pub fn record(&mut self, correct: bool) -> bool {
        if correct {
            self.correct += 1;
            self.streak += 1;
            self.max_streak = self.max_streak.max(self.streak);
        } else {
            self.incorrect += 1;
            self.streak = 0;
        }
        self.streak_milestone()
    }

    pub fn total(&self) -> u32 {
        self.correct + self.incorrect
    }

    /// Fraction of answers that were correct, 0.0 before any answer.
    pub fn accuracy(&self) -> f64 {
        if self.total() == 0 {
            0.0
        } else {
            f64::from(self.correct) / f64::from(self.total())
        }
    }

    /// Whether the current streak sits on a multiple of [`STREAK_MILESTONE`].
    pub fn streak_milestone(&self) -> bool {
        self.streak > 0 && self.streak % STREAK_MILESTONE == 0
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_session() {
        let stats = SessionStats::new();
        assert_eq!(stats.total(), 0);
        assert_eq!(stats.accuracy(), 0.0);
        assert!(!stats.streak_milestone());
    }

    #[test]
    fn test_streaks() {
        let mut stats = SessionStats::new();
        assert!(!stats.record(true));
        assert!(!stats.record(true));
        assert!(stats.record(true));
        assert!(!stats.record(true));
        assert!(!stats.record(false));
        assert!(!stats.record(true));

        assert_eq!(stats.correct, 5);
        assert_eq!(stats.incorrect, 1);
        assert_eq!(stats.streak, 1);
        assert_eq!(stats.max_streak, 4);
        assert_eq!(stats.total(), 6);
    }

    #[test]
    fn test_accuracy() {
        let mut stats = SessionStats::new();
        for correct in [true, false, true, true] {
            stats.record(correct);
        }
        assert!((stats.accuracy() - 0.75).abs() < f64::EPSILON);

        stats.reset();
        assert_eq!(stats, SessionStats::default());
    }
}
