//! Word-level grading of a spoken or transcribed sentence.
//!
//! Each expected word, left to right, claims the most similar word still
//! unclaimed in the utterance. A claimed word cannot credit a second expected
//! word. The assignment is greedy: an early expected word may claim a spoken
//! word that would have suited a later one better.

use crate::error::ValidationError;
use crate::normalize::normalize;
use crate::similarity::similarity;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Per-word similarity needed to count as correct.
pub const DEFAULT_CORRECT_THRESHOLD: f64 = 0.9;
/// Per-word similarity needed to count as approximately right.
pub const DEFAULT_APPROXIMATE_THRESHOLD: f64 = 0.6;

/// Line accuracy at or above which a line is graded good.
const GOOD_LINE_PERCENT: u8 = 80;
/// Line accuracy at or above which a line is graded partial.
const PARTIAL_LINE_PERCENT: u8 = 50;

/// How well one expected word was matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WordStatus {
    Correct,
    Approximate,
    Missing,
}

impl WordStatus {
    /// Credit towards line accuracy.
    pub fn weight(&self) -> f64 {
        match self {
            Self::Correct => 1.0,
            Self::Approximate => 0.5,
            Self::Missing => 0.0,
        }
    }

    fn marker(&self) -> char {
        match self {
            Self::Correct => '✓',
            Self::Approximate => '~',
            Self::Missing => '✗',
        }
    }
}

/// An expected word and how it was matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordVerdict {
    pub word: String,
    pub status: WordStatus,
}

/// Tally of word statuses in one alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub correct: usize,
    pub approximate: usize,
    pub missing: usize,
}

/// Coarse classification of a whole line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineGrade {
    Good,
    Partial,
    Missed,
}

/// Outcome of aligning one utterance against its reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignmentResult {
    /// One verdict per expected word, in reference order.
    pub words: Vec<WordVerdict>,
    /// Rounded weighted share of expected words matched, 0..=100.
    pub accuracy_percent: u8,
}

impl AlignmentResult {
    pub fn counts(&self) -> StatusCounts {
        self.words
            .iter()
            .fold(StatusCounts::default(), |mut counts, verdict| {
                match verdict.status {
                    WordStatus::Correct => counts.correct += 1,
                    WordStatus::Approximate => counts.approximate += 1,
                    WordStatus::Missing => counts.missing += 1,
                }
                counts
            })
    }

    pub fn grade(&self) -> LineGrade {
        if self.accuracy_percent >= GOOD_LINE_PERCENT {
            LineGrade::Good
        } else if self.accuracy_percent >= PARTIAL_LINE_PERCENT {
            LineGrade::Partial
        } else {
            LineGrade::Missed
        }
    }

    /// Whether the line should be recorded as a correct review.
    pub fn is_correct(&self, min_accuracy_percent: u8) -> bool {
        self.accuracy_percent >= min_accuracy_percent
    }
}

impl fmt::Display for AlignmentResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for verdict in &self.words {
            write!(f, "{}{} ", verdict.word, verdict.status.marker())?;
        }
        write!(f, "({}%)", self.accuracy_percent)
    }
}

/// Cut-offs for classifying a word match.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlignmentThresholds {
    correct: f64,
    approximate: f64,
}

impl AlignmentThresholds {
    /// Both values must lie in `0.0..=1.0` and `approximate` may not exceed `correct`.
    pub fn new(correct: f64, approximate: f64) -> Result<Self, ValidationError> {
        for (name, value) in [("correct threshold", correct), ("approximate threshold", approximate)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ValidationError::WordThresholdOutOfRange { name, value });
            }
        }
        if approximate > correct {
            return Err(ValidationError::WordThresholdsInverted {
                correct,
                approximate,
            });
        }
        Ok(Self {
            correct,
            approximate,
        })
    }

    pub fn correct(&self) -> f64 {
        self.correct
    }

    pub fn approximate(&self) -> f64 {
        self.approximate
    }

    fn classify(&self, score: f64) -> WordStatus {
        if score >= self.correct {
            WordStatus::Correct
        } else if score >= self.approximate {
            WordStatus::Approximate
        } else {
            WordStatus::Missing
        }
    }
}

impl Default for AlignmentThresholds {
    fn default() -> Self {
        Self {
            correct: DEFAULT_CORRECT_THRESHOLD,
            approximate: DEFAULT_APPROXIMATE_THRESHOLD,
        }
    }
}

/// Greedy word aligner.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WordAligner {
    thresholds: AlignmentThresholds,
}

impl WordAligner {
    pub fn new(thresholds: AlignmentThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> AlignmentThresholds {
        self.thresholds
    }

    /// Grade `spoken_text` against `expected_text` word by word.
    ///
    /// An empty reference is vacuously satisfied (100%). An empty utterance
    /// against a non-empty reference marks every word missing (0%).
    pub fn align(&self, expected_text: &str, spoken_text: &str) -> AlignmentResult {
        let expected = normalize(expected_text);
        let spoken = normalize(spoken_text);

        let expected_words: Vec<&str> = expected.split_whitespace().collect();
        let mut remaining: Vec<&str> = spoken.split_whitespace().collect();

        let mut credit = 0.0;
        let mut words = Vec::with_capacity(expected_words.len());

        for word in &expected_words {
            let best = best_match(word, &remaining);
            let status = best.map_or(WordStatus::Missing, |(_, score)| self.thresholds.classify(score));

            if status != WordStatus::Missing {
                if let Some((index, _)) = best {
                    remaining.remove(index);
                }
            }

            credit += status.weight();
            words.push(WordVerdict {
                word: (*word).to_string(),
                status,
            });
        }

        let accuracy_percent = if expected_words.is_empty() {
            100
        } else {
            (100.0 * credit / expected_words.len() as f64).round() as u8
        };

        tracing::debug!(
            expected = expected_words.len(),
            unclaimed = remaining.len(),
            accuracy_percent,
            "aligned utterance"
        );

        AlignmentResult {
            words,
            accuracy_percent,
        }
    }
}

/// Highest-scoring candidate, first occurrence winning ties.
fn best_match(word: &str, candidates: &[&str]) -> Option<(usize, f64)> {
    candidates
        .iter()
        .enumerate()
        .map(|(index, candidate)| (index, similarity(word, candidate)))
        .fold(None, |best, (index, score)| match best {
            Some((_, best_score)) if best_score >= score => best,
            _ => Some((index, score)),
        })
}

/// Align with the default thresholds.
pub fn align(expected_text: &str, spoken_text: &str) -> AlignmentResult {
    WordAligner::default().align(expected_text, spoken_text)
}

/// Rounded mean accuracy over several lines, 0 when there are none.
pub fn overall_accuracy(results: &[AlignmentResult]) -> u8 {
    if results.is_empty() {
        return 0;
    }
    let total: u32 = results.iter().map(|r| u32::from(r.accuracy_percent)).sum();
    (f64::from(total) / results.len() as f64).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn statuses(result: &AlignmentResult) -> Vec<WordStatus> {
        result.words.iter().map(|w| w.status).collect()
    }

    #[test]
    fn test_punctuation_and_case_ignored() {
        let result = align("Hello, how are you today?", "hello how are you today");
        assert_eq!(result.words.len(), 5);
        assert!(result.words.iter().all(|w| w.status == WordStatus::Correct));
        assert_eq!(result.accuracy_percent, 100);
    }

    #[test]
    fn test_silence_misses_everything() {
        let result = align("I am fine thank you very much", "");
        assert_eq!(result.words.len(), 7);
        assert!(result.words.iter().all(|w| w.status == WordStatus::Missing));
        assert_eq!(result.accuracy_percent, 0);
    }

    #[test]
    fn test_empty_reference_is_vacuous() {
        let result = align("", "anything at all");
        assert!(result.words.is_empty());
        assert_eq!(result.accuracy_percent, 100);

        assert_eq!(align("?!", "").accuracy_percent, 100);
    }

    #[test]
    fn test_contractions_match_expansions() {
        let result = align("I'm gonna win", "I am going to win");
        assert_eq!(result.words.len(), 5);
        assert_eq!(result.accuracy_percent, 100);
    }

    #[test]
    fn test_transposed_words_still_match() {
        let result = align("see you later", "later see you");
        assert_eq!(result.accuracy_percent, 100);
    }

    #[test]
    fn test_approximate_word_gets_half_credit() {
        // "quit" vs "quite": one edit over five characters.
        let result = align("quite good", "quit good");
        assert_eq!(statuses(&result), vec![WordStatus::Approximate, WordStatus::Correct]);
        assert_eq!(result.accuracy_percent, 75);
    }

    #[test]
    fn test_spoken_word_consumed_once() {
        let result = align("the the", "the");
        assert_eq!(statuses(&result), vec![WordStatus::Correct, WordStatus::Missing]);
        assert_eq!(result.accuracy_percent, 50);
    }

    #[test]
    fn test_unmatched_word_does_not_consume() {
        let result = align("xyz hello", "hello");
        assert_eq!(statuses(&result), vec![WordStatus::Missing, WordStatus::Correct]);
    }

    #[test]
    fn test_ties_take_first_occurrence() {
        assert_eq!(best_match("cat", &["bat", "hat"]).map(|(index, _)| index), Some(0));
        assert_eq!(best_match("cat", &[]), None);
    }

    #[test]
    fn test_greedy_can_pair_suboptimally() {
        // "cart" ties between "car" and "cat" and takes "car"; pairing it with
        // "cat" instead would have left "car" an exact match.
        let result = align("cart car", "car cat");
        assert_eq!(statuses(&result), vec![WordStatus::Approximate, WordStatus::Approximate]);
    }

    #[test]
    fn test_custom_thresholds() {
        let strict = WordAligner::new(AlignmentThresholds::new(1.0, 1.0).unwrap());
        let result = strict.align("quite", "quit");
        assert_eq!(statuses(&result), vec![WordStatus::Missing]);
    }

    #[test]
    fn test_threshold_validation() {
        assert!(AlignmentThresholds::new(0.9, 0.6).is_ok());
        assert!(matches!(
            AlignmentThresholds::new(1.2, 0.6),
            Err(ValidationError::WordThresholdOutOfRange { value, .. }) if value == 1.2
        ));
        assert!(matches!(
            AlignmentThresholds::new(0.9, f64::NAN),
            Err(ValidationError::WordThresholdOutOfRange { .. })
        ));
        assert!(matches!(
            AlignmentThresholds::new(0.5, 0.7),
            Err(ValidationError::WordThresholdsInverted { .. })
        ));
    }

    #[test]
    fn test_counts_and_grade() {
        let result = align("quite good day", "quit good");
        assert_eq!(
            result.counts(),
            StatusCounts {
                correct: 1,
                approximate: 1,
                missing: 1
            }
        );
        assert_eq!(result.accuracy_percent, 50);
        assert_eq!(result.grade(), LineGrade::Partial);
        assert!(result.is_correct(50));
        assert!(!result.is_correct(80));

        assert_eq!(align("hello", "hello").grade(), LineGrade::Good);
        assert_eq!(align("hello", "").grade(), LineGrade::Missed);
    }

    #[test]
    fn test_overall_accuracy() {
        assert_eq!(overall_accuracy(&[]), 0);
        let lines = [align("hello", "hello"), align("quite good", "quit good"), align("a", "")];
        // (100 + 75 + 0) / 3
        assert_eq!(overall_accuracy(&lines), 58);
    }

    #[test]
    fn test_display() {
        let result = align("Quite good, day!", "quit good");
        insta::assert_snapshot!(result.to_string(), @"quite~ good✓ day✗ (50%)");
    }

    proptest! {
        #[test]
        fn test_one_verdict_per_expected_word(
            expected in "[a-z ]{0,40}",
            spoken in "[a-z ]{0,40}",
        ) {
            let result = align(&expected, &spoken);
            prop_assert_eq!(result.words.len(), normalize(&expected).split_whitespace().count());
            prop_assert!(result.accuracy_percent <= 100);
        }

        #[test]
        fn test_self_alignment_is_perfect(text in "[a-zA-Z ,.!?']{0,40}") {
            prop_assert_eq!(align(&text, &text).accuracy_percent, 100);
        }
    }
}
