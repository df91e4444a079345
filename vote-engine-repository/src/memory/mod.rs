//! In-memory implementation of the vote repository.
//!
//! Backs the engine's test suites and local experimentation without a
//! database. Mutations take a single lock, so every `apply_transition` is
//! atomic exactly like its SQL counterpart, including the conditional
//! vote-row writes and the counter clamp.
use std::collections::{BTreeSet, HashMap};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use vote_engine_shared::types::{
    ItemId, ItemKind, UserId, VoteCounts, VoteMutation, VoteRecord, VoteType, VoteWrite,
};

use crate::{VoteRepository, VoteRepositoryError};

const DEFAULT_REPUTATION: i16 = 50;

struct ItemRow {
    author_id: Option<UserId>,
    upvotes: i64,
    downvotes: i64,
}

#[derive(Default)]
struct VoteState {
    users: HashMap<UserId, i16>,
    items: HashMap<(ItemKind, ItemId), ItemRow>,
    votes: HashMap<(UserId, ItemKind, ItemId), VoteType>,
}

/// In-memory vote repository.
///
/// Rows are seeded through `add_user` / `add_item`; the trait surface then
/// behaves like the PostgreSQL backend, conflicts included.
#[derive(Default)]
pub struct MemoryVoteRepository {
    state: Mutex<VoteState>,
}

impl MemoryVoteRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, VoteState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Seeds a user row with the default reputation.
    pub fn add_user(&self, user_id: UserId) {
        self.lock().users.insert(user_id, DEFAULT_REPUTATION);
    }

    /// Seeds a content item row with zeroed counters.
    ///
    /// `author_id: None` models an orphaned item whose author row was
    /// deleted.
    pub fn add_item(&self, kind: ItemKind, item_id: ItemId, author_id: Option<UserId>) {
        self.lock().items.insert(
            (kind, item_id),
            ItemRow {
                author_id,
                upvotes: 0,
                downvotes: 0,
            },
        );
    }

    /// Deletes a user row, cascading to the votes they cast and clearing the
    /// author reference on items they authored.
    pub fn remove_user(&self, user_id: UserId) {
        let mut state = self.lock();
        state.users.remove(&user_id);
        state.votes.retain(|(voter, _, _), _| *voter != user_id);
        for item in state.items.values_mut() {
            if item.author_id == Some(user_id) {
                item.author_id = None;
            }
        }
    }

    /// Deletes a content item row, cascading to the votes on it.
    pub fn remove_item(&self, kind: ItemKind, item_id: ItemId) {
        let mut state = self.lock();
        state.items.remove(&(kind, item_id));
        state
            .votes
            .retain(|(_, vote_kind, voted_item), _| !(*vote_kind == kind && *voted_item == item_id));
    }

    /// Reads the stored counters of an item.
    pub fn counts(&self, kind: ItemKind, item_id: ItemId) -> Option<VoteCounts> {
        self.lock().items.get(&(kind, item_id)).map(|item| VoteCounts {
            upvotes: item.upvotes,
            downvotes: item.downvotes,
        })
    }

    /// Recounts an item's votes directly from the vote rows.
    ///
    /// Test suites compare this against `counts` to assert the denormalized
    /// counters never drift from the vote table.
    pub fn recount(&self, kind: ItemKind, item_id: ItemId) -> VoteCounts {
        let state = self.lock();
        let mut counts = VoteCounts::default();
        for ((_, vote_kind, voted_item), vote_type) in &state.votes {
            if *vote_kind == kind && *voted_item == item_id {
                match vote_type {
                    VoteType::Up => counts.upvotes += 1,
                    VoteType::Down => counts.downvotes += 1,
                }
            }
        }
        counts
    }
}

#[async_trait]
impl VoteRepository for MemoryVoteRepository {
    async fn user_exists(&self, user_id: UserId) -> Result<bool, VoteRepositoryError> {
        Ok(self.lock().users.contains_key(&user_id))
    }

    async fn item_exists(&self, item_id: ItemId, kind: ItemKind) -> Result<bool, VoteRepositoryError> {
        Ok(self.lock().items.contains_key(&(kind, item_id)))
    }

    async fn item_author(&self, item_id: ItemId, kind: ItemKind) -> Result<Option<UserId>, VoteRepositoryError> {
        Ok(self
            .lock()
            .items
            .get(&(kind, item_id))
            .and_then(|item| item.author_id))
    }

    async fn get_vote(
        &self,
        user_id: UserId,
        item_id: ItemId,
        kind: ItemKind,
    ) -> Result<Option<VoteType>, VoteRepositoryError> {
        Ok(self.lock().votes.get(&(user_id, kind, item_id)).copied())
    }

    async fn apply_transition(
        &self,
        user_id: UserId,
        item_id: ItemId,
        kind: ItemKind,
        mutation: &VoteMutation,
    ) -> Result<(), VoteRepositoryError> {
        let mut state = self.lock();
        let key = (user_id, kind, item_id);

        match mutation.write {
            VoteWrite::Insert(vote_type) => {
                if state.votes.contains_key(&key) {
                    return Err(VoteRepositoryError::Conflict);
                }
                state.votes.insert(key, vote_type);
            }
            VoteWrite::Update { from, to } => {
                match state.votes.get_mut(&key) {
                    Some(stored) if *stored == from => *stored = to,
                    _ => return Err(VoteRepositoryError::Conflict),
                }
            }
            VoteWrite::Delete { previous } => {
                if state.votes.get(&key) != Some(&previous) {
                    return Err(VoteRepositoryError::Conflict);
                }
                state.votes.remove(&key);
            }
        }

        if let Some(item) = state.items.get_mut(&(kind, item_id)) {
            item.upvotes = (item.upvotes + mutation.upvote_delta).max(0);
            item.downvotes = (item.downvotes + mutation.downvote_delta).max(0);
        }
        Ok(())
    }

    async fn user_votes(&self, user_id: UserId, kind: ItemKind) -> Result<Vec<VoteRecord>, VoteRepositoryError> {
        let state = self.lock();
        let mut records = Vec::new();
        for ((voter, vote_kind, item_id), vote_type) in &state.votes {
            if *voter == user_id && *vote_kind == kind {
                records.push(VoteRecord {
                    user_id,
                    item_id: *item_id,
                    item_kind: kind,
                    vote_type: *vote_type,
                });
            }
        }
        Ok(records)
    }

    async fn sum_authored_counts(&self, user_id: UserId) -> Result<VoteCounts, VoteRepositoryError> {
        let state = self.lock();
        let mut counts = VoteCounts::default();
        for item in state.items.values() {
            if item.author_id == Some(user_id) {
                counts.upvotes += item.upvotes;
                counts.downvotes += item.downvotes;
            }
        }
        Ok(counts)
    }

    async fn read_reputation(&self, user_id: UserId) -> Result<Option<i16>, VoteRepositoryError> {
        Ok(self.lock().users.get(&user_id).copied())
    }

    async fn write_reputation(&self, user_id: UserId, value: i16) -> Result<(), VoteRepositoryError> {
        if let Some(reputation) = self.lock().users.get_mut(&user_id) {
            *reputation = value;
        }
        Ok(())
    }

    async fn list_authors(&self) -> Result<Vec<UserId>, VoteRepositoryError> {
        let state = self.lock();
        let authors: BTreeSet<UserId> = state
            .items
            .values()
            .filter_map(|item| item.author_id)
            .collect();
        Ok(authors.into_iter().collect())
    }
}
