//! Configuration for grading and scheduling.

use crate::align::{
    AlignmentThresholds, WordAligner, DEFAULT_APPROXIMATE_THRESHOLD, DEFAULT_CORRECT_THRESHOLD,
};
use crate::calendar::Calendar;
use crate::error::{ConfigError, ValidationError};
use crate::evaluate::{AnswerEvaluator, DEFAULT_THRESHOLD_PERCENT};
use crate::schedule::ReviewScheduler;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub grading: GradingConfig,
    #[serde(default)]
    pub alignment: AlignmentConfig,
    #[serde(default)]
    pub schedule: ScheduleConfig,
}

impl Config {
    /// Load from the default location, falling back to defaults when no file exists.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        if let Some(path) = Self::config_path() {
            self.save_to(&path)?;
        }
        Ok(())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "drill").map(|d| d.config_dir().join("config.toml"))
    }

    /// Check every tuning value without building anything.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.to_evaluator()?;
        self.to_aligner()?;
        self.to_calendar()?;
        Ok(())
    }

    pub fn to_evaluator(&self) -> Result<AnswerEvaluator, ValidationError> {
        AnswerEvaluator::new(self.grading.threshold_percent)
    }

    pub fn to_aligner(&self) -> Result<WordAligner, ValidationError> {
        AlignmentThresholds::new(
            self.alignment.correct_threshold,
            self.alignment.approximate_threshold,
        )
        .map(WordAligner::new)
    }

    pub fn to_calendar(&self) -> Result<Calendar, ValidationError> {
        match self.schedule.utc_offset_minutes {
            Some(minutes) => Calendar::with_offset_minutes(minutes),
            None => Ok(Calendar::local()),
        }
    }

    pub fn to_scheduler(&self) -> Result<ReviewScheduler, ValidationError> {
        self.to_calendar().map(ReviewScheduler::new)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradingConfig {
    /// Minimum similarity percentage accepted as correct.
    #[serde(default = "default_threshold_percent")]
    pub threshold_percent: i32,
}

fn default_threshold_percent() -> i32 { DEFAULT_THRESHOLD_PERCENT }

impl Default for GradingConfig {
    fn default() -> Self {
        Self {
            threshold_percent: DEFAULT_THRESHOLD_PERCENT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignmentConfig {
    #[serde(default = "default_correct_threshold")]
    pub correct_threshold: f64,
    #[serde(default = "default_approximate_threshold")]
    pub approximate_threshold: f64,
}

fn default_correct_threshold() -> f64 { DEFAULT_CORRECT_THRESHOLD }
fn default_approximate_threshold() -> f64 { DEFAULT_APPROXIMATE_THRESHOLD }

impl Default for AlignmentConfig {
    fn default() -> Self {
        Self {
            correct_threshold: DEFAULT_CORRECT_THRESHOLD,
            approximate_threshold: DEFAULT_APPROXIMATE_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Fixed UTC offset for day boundaries; the host's local zone when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utc_offset_minutes: Option<i32>,
}
