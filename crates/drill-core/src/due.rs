//! Selecting items due for review.
//!
//! Selection is a stable filter: output keeps the input's relative order and
//! never sorts, shuffles or deduplicates. Ordering policy belongs to callers.

use crate::calendar::Calendar;
use crate::schedule::{GroupId, LearningItem};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Optional predicate narrowing which items are considered.
pub type Scope<'a> = Option<&'a dyn Fn(&LearningItem) -> bool>;

/// Items in scope whose due date falls on or before the end of `now`'s day.
pub fn due_items<'a, I>(
    items: I,
    scope: Scope<'_>,
    calendar: &Calendar,
    now: DateTime<Utc>,
) -> Vec<&'a LearningItem>
where
    I: IntoIterator<Item = &'a LearningItem>,
{
    let cutoff = calendar.end_of_day(now);
    items
        .into_iter()
        .filter(|item| scope.map_or(true, |in_scope| in_scope(*item)))
        .filter(|item| item.next_due_at() <= cutoff)
        .collect()
}

/// Number of items [`due_items`] would return.
pub fn count_due<'a, I>(items: I, scope: Scope<'_>, calendar: &Calendar, now: DateTime<Utc>) -> usize
where
    I: IntoIterator<Item = &'a LearningItem>,
{
    due_items(items, scope, calendar, now).len()
}

/// Due and total counts for one group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupSummary {
    pub group_id: GroupId,
    pub due: usize,
    pub total: usize,
}

/// Per-group due counts, in the order `groups` are given.
pub fn group_summaries<'a, I>(
    items: I,
    groups: &[GroupId],
    calendar: &Calendar,
    now: DateTime<Utc>,
) -> Vec<GroupSummary>
where
    I: IntoIterator<Item = &'a LearningItem>,
{
    let cutoff = calendar.end_of_day(now);
    let mut tally: HashMap<GroupId, (usize, usize)> = HashMap::new();
    for item in items {
        if let Some(group_id) = item.group_id() {
            let (due, total) = tally.entry(group_id).or_default();
            *due += usize::from(item.next_due_at() <= cutoff);
            *total += 1;
        }
    }

    groups
        .iter()
        .map(|&group_id| {
            let (due, total) = tally.get(&group_id).copied().unwrap_or_default();
            GroupSummary {
                group_id,
                due,
                total,
            }
        })
        .collect()
}
