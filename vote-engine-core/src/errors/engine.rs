//! Error types for the vote transition engine.
//! Defines specific errors that can occur while applying a vote request.
use thiserror::Error;
use vote_engine_repository::VoteRepositoryError;
use vote_engine_shared::types::{ItemId, ItemKind, UserId};

/// Represents errors that can occur while applying a vote request.
///
/// Missing rows are client errors and are never retried; storage errors wrap
/// the repository taxonomy, which distinguishes retryable conflicts from
/// hard failures.
#[derive(Debug, Error)]
pub enum VoteError {
    #[error("User {0} does not exist")]
    UserNotFound(UserId),

    #[error("{0} {1} does not exist")]
    ItemNotFound(ItemKind, ItemId),

    #[error("Vote repository error: {0}")]
    Store(#[from] VoteRepositoryError),
}

impl VoteError {
    /// Whether the whole vote request can be retried.
    ///
    /// True only for transient storage failures; no partial state is
    /// committed when those occur.
    pub fn is_retryable(&self) -> bool {
        match self {
            VoteError::Store(error) => error.is_retryable(),
            _ => false,
        }
    }
}
