//! Reputation recomputation.
//!
//! Reputation is always derived in full from the author's current aggregate
//! counters, never adjusted incrementally. A transient inconsistency left by
//! an earlier failed write therefore disappears the next time any vote
//! touches the author's content.
use std::sync::Arc;

use tracing::warn;
use vote_engine_repository::VoteRepository;
use vote_engine_shared::types::{UserId, VoteCounts};

use crate::errors::ReputationError;

/// Reputation of a user with zero votes across all authored content.
pub const DEFAULT_REPUTATION: i16 = 50;

const MIN_REPUTATION: i16 = 1;
const MAX_REPUTATION: i16 = 100;

/// Derives a reputation score from summed vote counters.
///
/// `round(100 * upvotes / total)`, clamped to `[1, 100]`; 50 when no votes
/// exist.
pub fn score(counts: &VoteCounts) -> i16 {
    let total = counts.total();
    if total == 0 {
        return DEFAULT_REPUTATION;
    }
    let ratio = 100.0 * counts.upvotes as f64 / total as f64;
    (ratio.round() as i64).clamp(MIN_REPUTATION as i64, MAX_REPUTATION as i64) as i16
}

/// Recomputes and persists user reputation from stored aggregate counters.
pub struct ReputationUpdater {
    repository: Arc<dyn VoteRepository>,
}

impl ReputationUpdater {
    pub fn new(repository: Arc<dyn VoteRepository>) -> Self {
        Self { repository }
    }

    /// Recomputes the user's reputation and writes it back.
    ///
    /// The write is verified by reading the stored value back; a mismatch
    /// means a concurrent recomputation raced this one and is logged as a
    /// warning only, since the next vote event recomputes again.
    pub async fn recompute(&self, user_id: UserId) -> Result<i16, ReputationError> {
        let counts = self.repository.sum_authored_counts(user_id).await?;
        let value = score(&counts);

        self.repository.write_reputation(user_id, value).await?;

        let stored = self.repository.read_reputation(user_id).await?;
        if stored != Some(value) {
            warn!(
                user_id,
                expected = value,
                stored = ?stored,
                "reputation read-back mismatch"
            );
        }
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(upvotes: i64, downvotes: i64) -> VoteCounts {
        VoteCounts { upvotes, downvotes }
    }

    #[test]
    fn test_score_defaults_to_fifty_with_no_votes() {
        assert_eq!(score(&counts(0, 0)), 50);
    }

    #[test]
    fn test_score_four_of_five_is_eighty() {
        assert_eq!(score(&counts(4, 1)), 80);
    }

    #[test]
    fn test_score_rounds_to_nearest() {
        // 2 of 3 is 66.67, rounds up.
        assert_eq!(score(&counts(2, 1)), 67);
        // 1 of 3 is 33.33, rounds down.
        assert_eq!(score(&counts(1, 2)), 33);
    }

    #[test]
    fn test_score_clamps_at_lower_bound() {
        assert_eq!(score(&counts(0, 1)), 1);
        assert_eq!(score(&counts(0, 250)), 1);
    }

    #[test]
    fn test_score_reaches_upper_bound() {
        assert_eq!(score(&counts(1, 0)), 100);
        assert_eq!(score(&counts(250, 0)), 100);
    }

    #[test]
    fn test_score_even_split_is_fifty() {
        assert_eq!(score(&counts(5, 5)), 50);
    }
}
