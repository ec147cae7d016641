//! Five-level Leitner review scheduling.
//!
//! A correct review promotes an item one level (plateauing at 5); an incorrect
//! one drops it back to level 1 and counts an error. The due date is always
//! derived from the new level: local midnight, `interval_days(level)` days
//! after the day of the review. Transitions are pure and take `now`
//! explicitly; nothing here keeps state between calls.

use crate::calendar::Calendar;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifiers.
pub type ItemId = Uuid;
pub type GroupId = Uuid;

/// Days until due, indexed by level - 1.
pub const INTERVAL_DAYS: [u64; 5] = [0, 1, 3, 7, 15];

/// A Leitner level, always within `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Level(u8);

impl Level {
    pub const MIN: Level = Level(1);
    pub const MAX: Level = Level(5);

    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN.0..=Self::MAX.0).contains(&value).then_some(Self(value))
    }

    /// Nearest valid level to a raw stored value.
    pub fn clamped(raw: i32) -> Self {
        Self(raw.clamp(i32::from(Self::MIN.0), i32::from(Self::MAX.0)) as u8)
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// One level up, staying at the top level once reached.
    pub fn promoted(self) -> Self {
        Self((self.0 + 1).min(Self::MAX.0))
    }

    pub fn interval_days(self) -> u64 {
        INTERVAL_DAYS[usize::from(self.0 - 1)]
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whether a review was answered correctly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Correct,
    Incorrect,
}

impl From<bool> for Verdict {
    fn from(correct: bool) -> Self {
        if correct {
            Self::Correct
        } else {
            Self::Incorrect
        }
    }
}

fn default_level() -> i32 {
    i32::from(Level::MIN.get())
}

/// Scheduling state of one prompt/answer pair.
///
/// `level` is kept as the raw stored integer so that out-of-range values from
/// old or hand-edited backups still load; the scheduler repairs them on the
/// next review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningItem {
    id: ItemId,
    #[serde(default)]
    group_id: Option<GroupId>,
    #[serde(default = "default_level")]
    level: i32,
    #[serde(default)]
    last_reviewed_at: Option<DateTime<Utc>>,
    next_due_at: DateTime<Utc>,
    #[serde(default)]
    error_count: u32,
}

impl LearningItem {
    /// Rebuild an item from stored fields.
    pub fn restore(
        id: ItemId,
        group_id: Option<GroupId>,
        level: i32,
        last_reviewed_at: Option<DateTime<Utc>>,
        next_due_at: DateTime<Utc>,
        error_count: u32,
    ) -> Self {
        Self {
            id,
            group_id,
            level,
            last_reviewed_at,
            next_due_at,
            error_count,
        }
    }

    /// Move the item to another group, or out of any group.
    pub fn with_group(mut self, group_id: Option<GroupId>) -> Self {
        self.group_id = group_id;
        self
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn group_id(&self) -> Option<GroupId> {
        self.group_id
    }

    /// Stored level, possibly out of range if it came from corrupted data.
    pub fn raw_level(&self) -> i32 {
        self.level
    }

    /// Stored level clamped into range.
    pub fn level(&self) -> Level {
        Level::clamped(self.level)
    }

    pub fn last_reviewed_at(&self) -> Option<DateTime<Utc>> {
        self.last_reviewed_at
    }

    pub fn next_due_at(&self) -> DateTime<Utc> {
        self.next_due_at
    }

    pub fn error_count(&self) -> u32 {
        self.error_count
    }

    pub fn in_group(&self, group_id: GroupId) -> bool {
        self.group_id == Some(group_id)
    }
}

/// An out-of-range level was clamped before a review was applied.
///
/// Not fatal: the review still goes through. Callers should log it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataRepairWarning {
    pub item_id: ItemId,
    pub found: i32,
    pub repaired_to: Level,
}

impl fmt::Display for DataRepairWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "item {} had level {}, repaired to {}",
            self.item_id, self.found, self.repaired_to
        )
    }
}

/// Result of one review transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewOutcome {
    pub item: LearningItem,
    pub repair: Option<DataRepairWarning>,
}

/// Applies review verdicts to learning items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReviewScheduler {
    calendar: Calendar,
}

impl ReviewScheduler {
    pub fn new(calendar: Calendar) -> Self {
        Self { calendar }
    }

    pub fn calendar(&self) -> &Calendar {
        &self.calendar
    }

    /// A fresh item at level 1, due immediately.
    pub fn new_item(&self, id: ItemId, group_id: Option<GroupId>, now: DateTime<Utc>) -> LearningItem {
        LearningItem {
            id,
            group_id,
            level: default_level(),
            last_reviewed_at: None,
            next_due_at: now,
            error_count: 0,
        }
    }

    /// When an item reviewed at `now` and left at `level` next comes due.
    pub fn due_at(&self, level: Level, now: DateTime<Utc>) -> DateTime<Utc> {
        self.calendar.due_date(now, level.interval_days())
    }

    /// Whether `item` is due on the day containing `now`.
    pub fn is_due(&self, item: &LearningItem, now: DateTime<Utc>) -> bool {
        item.next_due_at <= self.calendar.end_of_day(now)
    }

    pub fn review(&self, item: &LearningItem, verdict: Verdict, now: DateTime<Utc>) -> ReviewOutcome {
        match verdict {
            Verdict::Correct => self.on_correct(item, now),
            Verdict::Incorrect => self.on_incorrect(item, now),
        }
    }

    /// Promote one level and reschedule. The error count is untouched.
    pub fn on_correct(&self, item: &LearningItem, now: DateTime<Utc>) -> ReviewOutcome {
        let (level, repair) = repair_level(item);
        self.transition(item, level.promoted(), item.error_count, now, repair)
    }

    /// Drop to level 1, count the error and make the item due again today.
    pub fn on_incorrect(&self, item: &LearningItem, now: DateTime<Utc>) -> ReviewOutcome {
        let (_, repair) = repair_level(item);
        self.transition(
            item,
            Level::MIN,
            item.error_count.saturating_add(1),
            now,
            repair,
        )
    }

    fn transition(
        &self,
        item: &LearningItem,
        level: Level,
        error_count: u32,
        now: DateTime<Utc>,
        repair: Option<DataRepairWarning>,
    ) -> ReviewOutcome {
        let next_due_at = self.due_at(level, now);
        tracing::debug!(
            item = %item.id,
            from = item.level,
            to = level.get(),
            next_due = %next_due_at,
            "rescheduled item"
        );

        ReviewOutcome {
            item: LearningItem {
                level: i32::from(level.get()),
                last_reviewed_at: Some(now),
                next_due_at,
                error_count,
                ..item.clone()
            },
            repair,
        }
    }
}

fn repair_level(item: &LearningItem) -> (Level, Option<DataRepairWarning>) {
    let level = Level::clamped(item.level);
    if i32::from(level.get()) == item.level {
        return (level, None);
    }

    let warning = DataRepairWarning {
        item_id: item.id,
        found: item.level,
        repaired_to: level,
    };
    tracing::warn!(%warning, "clamped out-of-range level before review");
    (level, Some(warning))
}
