//! This module defines the `VoteRepository` trait, which provides an interface
//! for interacting with the underlying data store for votes, aggregate
//! counters, and reputation. It abstracts the storage operations for
//! persistence and retrieval.
use vote_engine_shared::types::{ItemId, ItemKind, UserId, VoteCounts, VoteMutation, VoteRecord, VoteType};

use crate::errors::VoteRepositoryError;

/// A trait that defines the interface for interacting with the vote data store.
///
/// Implementors provide the storage side of the vote transition engine: vote
/// record reads and writes, atomic counter adjustment, and the reputation
/// reads and writes the recomputation path needs. The engine receives an
/// implementation at construction, so tests can substitute a double.
#[async_trait::async_trait]
pub trait VoteRepository: Send + Sync {
    /// Returns whether a user row exists.
    async fn user_exists(&self, user_id: UserId) -> Result<bool, VoteRepositoryError>;

    /// Returns whether a content item row of the given kind exists.
    async fn item_exists(&self, item_id: ItemId, kind: ItemKind) -> Result<bool, VoteRepositoryError>;

    /// Resolves the author of a content item.
    ///
    /// Returns `None` when the item is missing or its author reference has
    /// been cleared (an orphaned item).
    async fn item_author(&self, item_id: ItemId, kind: ItemKind) -> Result<Option<UserId>, VoteRepositoryError>;

    /// Reads the caller's current vote on an item, if any.
    async fn get_vote(
        &self,
        user_id: UserId,
        item_id: ItemId,
        kind: ItemKind,
    ) -> Result<Option<VoteType>, VoteRepositoryError>;

    /// Applies a vote transition as a single atomic unit.
    ///
    /// The vote-row write and the counter adjustment either both commit or
    /// neither does. The row write is conditional on the vote state the
    /// engine observed; if a concurrent writer changed it first, the
    /// transaction is abandoned with `VoteRepositoryError::Conflict` and no
    /// counter moves.
    ///
    /// # Arguments
    ///
    /// * `user_id` - The voting user.
    /// * `item_id` - The target content item.
    /// * `kind` - Which item table the target lives in.
    /// * `mutation` - The row write and counter deltas to apply.
    ///
    /// # Returns
    ///
    /// A `Result` indicating success or a `VoteRepositoryError` if the
    /// transition could not be applied.
    async fn apply_transition(
        &self,
        user_id: UserId,
        item_id: ItemId,
        kind: ItemKind,
        mutation: &VoteMutation,
    ) -> Result<(), VoteRepositoryError>;

    /// Returns every vote the user holds on items of the given kind.
    async fn user_votes(&self, user_id: UserId, kind: ItemKind) -> Result<Vec<VoteRecord>, VoteRepositoryError>;

    /// Sums the aggregate counters across every item the user authored,
    /// tickets and replies alike.
    async fn sum_authored_counts(&self, user_id: UserId) -> Result<VoteCounts, VoteRepositoryError>;

    /// Reads a user's stored reputation. `None` when the user row is missing.
    async fn read_reputation(&self, user_id: UserId) -> Result<Option<i16>, VoteRepositoryError>;

    /// Writes a user's recomputed reputation.
    async fn write_reputation(&self, user_id: UserId, value: i16) -> Result<(), VoteRepositoryError>;

    /// Lists every user that authored at least one content item.
    ///
    /// Used by the reputation resync sweep.
    async fn list_authors(&self) -> Result<Vec<UserId>, VoteRepositoryError>;
}
