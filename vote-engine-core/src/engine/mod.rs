//! This module defines the `VoteEngine` responsible for coordinating vote
//! transitions.
//! It reads the caller's current vote, computes the transition, applies the
//! vote-row write and counter adjustment through the repository, and then
//! refreshes the item author's reputation.
mod transition;

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, warn};
use vote_engine_repository::VoteRepository;
use vote_engine_shared::types::{ItemId, ItemKind, TransitionOutcome, UserId, VoteType};

use crate::errors::VoteError;
use crate::reputation::ReputationUpdater;

/// `VoteEngine` orchestrates the vote transition state machine against an
/// injected repository.
///
/// All counter mutations in the system go through this type; nothing else
/// writes the denormalized `upvotes` / `downvotes` columns.
pub struct VoteEngine {
    repository: Arc<dyn VoteRepository>,
    reputation: ReputationUpdater,
}

impl VoteEngine {
    /// Creates a new `VoteEngine` backed by the given repository.
    pub fn new(repository: Arc<dyn VoteRepository>) -> Self {
        let reputation = ReputationUpdater::new(Arc::clone(&repository));
        Self {
            repository,
            reputation,
        }
    }

    /// Applies a vote request for `requested` on an item.
    ///
    /// Casting the direction already held toggles the vote off; casting the
    /// opposite direction flips it. The returned outcome tells the caller
    /// exactly what happened so it can reconcile its local counter display.
    ///
    /// # Arguments
    ///
    /// * `user_id` - The voting user; must exist.
    /// * `item_id` - The target ticket or reply; must exist.
    /// * `kind` - Whether the target is a ticket or a reply.
    /// * `requested` - The requested vote direction.
    ///
    /// # Returns
    ///
    /// The `TransitionOutcome`, or a `VoteError` if the user or item is
    /// missing or the storage write failed.
    pub async fn cast_vote(
        &self,
        user_id: UserId,
        item_id: ItemId,
        kind: ItemKind,
        requested: VoteType,
    ) -> Result<TransitionOutcome, VoteError> {
        self.ensure_user(user_id).await?;
        self.ensure_item(item_id, kind).await?;

        let current = self.repository.get_vote(user_id, item_id, kind).await?;
        let (mutation, outcome) = transition::cast_transition(current, requested);
        self.repository
            .apply_transition(user_id, item_id, kind, &mutation)
            .await?;
        debug!(
            user_id,
            item_id,
            kind = %kind,
            action = ?outcome.action,
            "vote transition applied"
        );

        self.refresh_author_reputation(item_id, kind).await;
        Ok(outcome)
    }

    /// Clears the caller's vote on an item, whatever its direction.
    ///
    /// A no-op with `action: none` when no vote exists.
    pub async fn clear_vote(
        &self,
        user_id: UserId,
        item_id: ItemId,
        kind: ItemKind,
    ) -> Result<TransitionOutcome, VoteError> {
        self.ensure_user(user_id).await?;
        self.ensure_item(item_id, kind).await?;

        let current = self.repository.get_vote(user_id, item_id, kind).await?;
        let (mutation, outcome) = transition::clear_transition(current);
        let Some(mutation) = mutation else {
            return Ok(outcome);
        };
        self.repository
            .apply_transition(user_id, item_id, kind, &mutation)
            .await?;
        debug!(user_id, item_id, kind = %kind, "vote cleared");

        self.refresh_author_reputation(item_id, kind).await;
        Ok(outcome)
    }

    /// Returns the caller's votes on items of the given kind as an
    /// `item_id -> vote_type` map, for rendering vote state next to each
    /// item without per-item lookups. Pure read.
    pub async fn user_votes(
        &self,
        user_id: UserId,
        kind: ItemKind,
    ) -> Result<HashMap<ItemId, VoteType>, VoteError> {
        let records = self.repository.user_votes(user_id, kind).await?;
        Ok(records
            .into_iter()
            .map(|record| (record.item_id, record.vote_type))
            .collect())
    }

    async fn ensure_user(&self, user_id: UserId) -> Result<(), VoteError> {
        if self.repository.user_exists(user_id).await? {
            Ok(())
        } else {
            Err(VoteError::UserNotFound(user_id))
        }
    }

    async fn ensure_item(&self, item_id: ItemId, kind: ItemKind) -> Result<(), VoteError> {
        if self.repository.item_exists(item_id, kind).await? {
            Ok(())
        } else {
            Err(VoteError::ItemNotFound(kind, item_id))
        }
    }

    /// Recomputes the item author's reputation after a committed transition.
    ///
    /// The counter update has already committed at this point, so failures
    /// here are logged and swallowed rather than surfaced; surfacing them
    /// would invite a retry of a vote that already landed. The next vote on
    /// any of the author's content recomputes from scratch.
    async fn refresh_author_reputation(&self, item_id: ItemId, kind: ItemKind) {
        match self.repository.item_author(item_id, kind).await {
            Ok(Some(author_id)) => {
                if let Err(error) = self.reputation.recompute(author_id).await {
                    warn!(author_id, %error, "reputation recompute failed");
                }
            }
            Ok(None) => {
                warn!(item_id, kind = %kind, "no author for item, skipping reputation update");
            }
            Err(error) => {
                warn!(item_id, kind = %kind, %error, "author lookup failed, skipping reputation update");
            }
        }
    }
}
