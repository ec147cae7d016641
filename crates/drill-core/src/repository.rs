//! Item storage seam and the review service built on it.
//!
//! The scheduler and selector are pure; [`ReviewService`] wires them to
//! whatever [`ItemRepository`] the host provides. Serializing concurrent
//! reviews of the same item is the host's job.

use crate::due::{self, GroupSummary, Scope};
use crate::error::ReviewError;
use crate::schedule::{GroupId, ItemId, LearningItem, ReviewOutcome, ReviewScheduler, Verdict};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use uuid::Uuid;

/// Storage for learning items.
pub trait ItemRepository {
    fn get(&self, id: ItemId) -> Option<&LearningItem>;

    /// Insert a new item or replace the stored item with the same id.
    fn upsert(&mut self, item: LearningItem);

    /// All items, in insertion order.
    fn items(&self) -> Vec<&LearningItem>;
}

/// Insertion-ordered in-memory repository.
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    items: Vec<LearningItem>,
    index: HashMap<ItemId, usize>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load items; a later item replaces an earlier one with the same id.
    pub fn from_items(items: impl IntoIterator<Item = LearningItem>) -> Self {
        let mut repo = Self::new();
        for item in items {
            repo.upsert(item);
        }
        repo
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_items(self) -> Vec<LearningItem> {
        self.items
    }
}

impl ItemRepository for MemoryRepository {
    fn get(&self, id: ItemId) -> Option<&LearningItem> {
        self.index.get(&id).map(|&slot| &self.items[slot])
    }

    fn upsert(&mut self, item: LearningItem) {
        match self.index.get(&item.id()) {
            Some(&slot) => self.items[slot] = item,
            None => {
                self.index.insert(item.id(), self.items.len());
                self.items.push(item);
            }
        }
    }

    fn items(&self) -> Vec<&LearningItem> {
        self.items.iter().collect()
    }
}

/// Applies reviews to items held in a repository.
pub struct ReviewService<'r, R: ItemRepository> {
    repo: &'r mut R,
    scheduler: ReviewScheduler,
}

impl<'r, R: ItemRepository> ReviewService<'r, R> {
    pub fn new(repo: &'r mut R, scheduler: ReviewScheduler) -> Self {
        Self { repo, scheduler }
    }

    pub fn scheduler(&self) -> &ReviewScheduler {
        &self.scheduler
    }

    /// Store a fresh item, due immediately.
    pub fn add_item(&mut self, group_id: Option<GroupId>, now: DateTime<Utc>) -> ItemId {
        let item = self.scheduler.new_item(Uuid::new_v4(), group_id, now);
        let id = item.id();
        self.repo.upsert(item);
        id
    }

    /// Record a review verdict for `id` and store the rescheduled item.
    pub fn submit(
        &mut self,
        id: ItemId,
        verdict: Verdict,
        now: DateTime<Utc>,
    ) -> Result<ReviewOutcome, ReviewError> {
        let item = self.repo.get(id).ok_or(ReviewError::UnknownItem(id))?;
        let outcome = self.scheduler.review(item, verdict, now);
        self.repo.upsert(outcome.item.clone());
        Ok(outcome)
    }

    /// Items due today, in repository order.
    pub fn due(&self, scope: Scope<'_>, now: DateTime<Utc>) -> Vec<&LearningItem> {
        due::due_items(self.repo.items(), scope, self.scheduler.calendar(), now)
    }

    pub fn group_summaries(&self, groups: &[GroupId], now: DateTime<Utc>) -> Vec<GroupSummary> {
        due::group_summaries(self.repo.items(), groups, self.scheduler.calendar(), now)
    }
}
