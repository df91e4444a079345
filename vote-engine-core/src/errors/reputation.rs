//! Error types for reputation recomputation.
use thiserror::Error;
use vote_engine_repository::VoteRepositoryError;

/// Represents errors that can occur while recomputing a user's reputation.
#[derive(Debug, Error)]
pub enum ReputationError {
    #[error("Vote repository error: {0}")]
    Store(#[from] VoteRepositoryError),
}
