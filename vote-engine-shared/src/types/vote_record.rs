use serde::{Deserialize, Serialize};

use crate::types::{ItemId, ItemKind, UserId, VoteType};

/// Represents a user's stored vote on a content item.
///
/// At most one record exists per `(user_id, item_id, item_kind)`; the record
/// is created on first vote, mutated when the vote flips, and deleted when
/// the vote is retracted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VoteRecord {
    pub user_id: UserId,
    pub item_id: ItemId,
    pub item_kind: ItemKind,
    pub vote_type: VoteType,
}
