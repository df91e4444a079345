use serde::{Deserialize, Serialize};

/// Represents the aggregated vote counters for a content item, or the sum of
/// counters across everything a user authored.
///
/// Denormalized from the stored vote records for fast reads; never negative.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct VoteCounts {
    pub upvotes: i64,
    pub downvotes: i64,
}

impl VoteCounts {
    pub fn total(&self) -> i64 {
        self.upvotes + self.downvotes
    }
}
