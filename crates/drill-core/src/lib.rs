//! # drill-core
//!
//! Answer grading and spaced-repetition scheduling for vocabulary drills.
//!
//! ## Features
//!
//! - Text normalization with English contraction expansion
//! - Levenshtein similarity and thresholded typed-answer grading
//! - Word-by-word alignment of spoken sentences against a reference
//! - Five-box Leitner scheduler with calendar-day due dates
//! - Order-preserving due-set selection and per-group summaries
//!
//! Everything here is synchronous and pure apart from the in-memory
//! repository. Clocks are passed in, never read.

mod align;
mod calendar;
mod config;
mod due;
mod error;
mod evaluate;
mod normalize;
mod repository;
mod schedule;
mod session;
mod similarity;

pub use align::{
    align, overall_accuracy, AlignmentResult, AlignmentThresholds, LineGrade, StatusCounts,
    WordAligner, WordStatus, WordVerdict, DEFAULT_APPROXIMATE_THRESHOLD, DEFAULT_CORRECT_THRESHOLD,
};
pub use calendar::{Calendar, DayZone};
pub use config::{AlignmentConfig, Config, GradingConfig, ScheduleConfig};
pub use due::{count_due, due_items, group_summaries, GroupSummary, Scope};
pub use error::{ConfigError, ReviewError, ValidationError};
pub use evaluate::{evaluate, AnswerEvaluator, SimilarityResult, DEFAULT_THRESHOLD_PERCENT};
pub use normalize::{expand_contractions, normalize, strip_punctuation};
pub use repository::{ItemRepository, MemoryRepository, ReviewService};
pub use schedule::{
    DataRepairWarning, GroupId, ItemId, LearningItem, Level, ReviewOutcome, ReviewScheduler,
    Verdict, INTERVAL_DAYS,
};
pub use session::{SessionStats, STREAK_MILESTONE};
pub use similarity::{levenshtein, similarity};
