//! Error types for the vote repository.
//! Defines specific errors that can occur during storage operations related to votes.
use thiserror::Error;

/// Represents errors that can occur within the vote repository.
///
/// This enum consolidates various error conditions specific to storage
/// interactions, such as SQLx errors during database operations and write
/// conflicts between concurrent vote requests.
#[derive(Debug, Error)]
pub enum VoteRepositoryError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Concurrent vote write conflict")]
    Conflict,

    #[error("Invalid vote type: {0}")]
    InvalidVoteType(i16),
}

impl VoteRepositoryError {
    /// Whether retrying the whole vote request is safe.
    ///
    /// Conflicts and pool timeouts leave no partial state behind; the vote
    /// row write and counter adjustment share one transaction.
    pub fn is_retryable(&self) -> bool {
        match self {
            VoteRepositoryError::Conflict => true,
            VoteRepositoryError::Database(sqlx::Error::PoolTimedOut) => true,
            _ => false,
        }
    }
}
