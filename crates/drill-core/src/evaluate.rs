//! Typed-answer evaluation.

use crate::error::ValidationError;
use crate::similarity::similarity;
use std::fmt;

/// Minimum similarity percent accepted by default.
pub const DEFAULT_THRESHOLD_PERCENT: i32 = 85;

/// Verdict for a typed answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimilarityResult {
    /// Answer equals the reference once trimmed and lower-cased.
    pub is_exact_match: bool,
    /// Similarity reached the evaluator's threshold.
    pub is_acceptable: bool,
    /// Rounded similarity, 0..=100.
    pub similarity_percent: u8,
}

impl SimilarityResult {
    /// The boolean a review should be recorded with.
    pub fn is_correct(&self) -> bool {
        self.is_acceptable
    }
}

impl fmt::Display for SimilarityResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verdict = if self.is_exact_match {
            "exact"
        } else if self.is_acceptable {
            "accepted"
        } else {
            "rejected"
        };
        write!(f, "{} ({}%)", verdict, self.similarity_percent)
    }
}

/// Grades typed answers against a reference with a fixed threshold.
///
/// Answers are only trimmed and lower-cased here; contraction expansion is
/// reserved for spoken input, since exact phrase equality remains the primary
/// acceptance criterion for short answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerEvaluator {
    threshold_percent: u8,
}

impl AnswerEvaluator {
    /// Create an evaluator, rejecting thresholds outside `0..=100`.
    pub fn new(threshold_percent: i32) -> Result<Self, ValidationError> {
        u8::try_from(threshold_percent)
            .ok()
            .filter(|t| *t <= 100)
            .map(|threshold_percent| Self { threshold_percent })
            .ok_or(ValidationError::ThresholdPercentOutOfRange {
                value: threshold_percent,
            })
    }

    pub fn threshold_percent(&self) -> u8 {
        self.threshold_percent
    }

    /// Compare a learner's answer with the expected one.
    pub fn evaluate(&self, user_answer: &str, correct_answer: &str) -> SimilarityResult {
        let user = user_answer.trim().to_lowercase();
        let correct = correct_answer.trim().to_lowercase();

        let similarity_percent = (similarity(&user, &correct) * 100.0).round() as u8;
        let result = SimilarityResult {
            is_exact_match: user == correct,
            is_acceptable: similarity_percent >= self.threshold_percent,
            similarity_percent,
        };

        tracing::debug!(%result, threshold = self.threshold_percent, "evaluated answer");
        result
    }
}

impl Default for AnswerEvaluator {
    fn default() -> Self {
        Self {
            threshold_percent: DEFAULT_THRESHOLD_PERCENT as u8,
        }
    }
}

/// One-shot evaluation with an explicit threshold.
pub fn evaluate(
    user_answer: &str,
    correct_answer: &str,
    threshold_percent: i32,
) -> Result<SimilarityResult, ValidationError> {
    Ok(AnswerEvaluator::new(threshold_percent)?.evaluate(user_answer, correct_answer))
}

#[cfg(test)]
mod tests {
    use super::*;

    const REFERENCE: &str = "I need to study every day.";

    #[test]
    fn test_near_miss_accepted() {
        let result = evaluate("I need to study evrey day.", REFERENCE, 85).unwrap();
        assert!(!result.is_exact_match);
        assert!(result.is_acceptable);
        // Swapped letters cost two edits over 26 characters.
        assert_eq!(result.similarity_percent, 92);
    }

    #[test]
    fn test_unrelated_rejected() {
        let result = evaluate("wrong", REFERENCE, 85).unwrap();
        assert!(!result.is_acceptable);
        assert!(!result.is_correct());
        assert_eq!(result.similarity_percent, 4);
    }

    #[test]
    fn test_exact_ignores_case_and_padding() {
        let result = evaluate("  i NEED to study every day. ", REFERENCE, 85).unwrap();
        assert!(result.is_exact_match);
        assert!(result.is_acceptable);
        assert_eq!(result.similarity_percent, 100);
    }

    #[test]
    fn test_contractions_not_expanded() {
        let result = evaluate("I don't know", "I do not know", 85).unwrap();
        assert!(!result.is_exact_match);
    }

    #[test]
    fn test_threshold_bounds() {
        assert!(AnswerEvaluator::new(0).is_ok());
        assert!(AnswerEvaluator::new(100).is_ok());
        assert_eq!(
            AnswerEvaluator::new(101),
            Err(ValidationError::ThresholdPercentOutOfRange { value: 101 })
        );
        assert_eq!(
            evaluate("a", "a", -1),
            Err(ValidationError::ThresholdPercentOutOfRange { value: -1 })
        );
    }

    #[test]
    fn test_zero_threshold_accepts_anything() {
        let evaluator = AnswerEvaluator::new(0).unwrap();
        assert!(evaluator.evaluate("", "something").is_acceptable);
    }

    #[test]
    fn test_empty_pair_is_exact() {
        let result = AnswerEvaluator::default().evaluate("", "   ");
        assert!(result.is_exact_match);
        assert_eq!(result.similarity_percent, 100);
    }

    #[test]
    fn test_display() {
        let result = evaluate("I need to study evrey day.", REFERENCE, 85).unwrap();
        insta::assert_snapshot!(result.to_string(), @"accepted (92%)");
        let result = evaluate("wrong", REFERENCE, 85).unwrap();
        insta::assert_snapshot!(result.to_string(), @"rejected (4%)");
    }
}
