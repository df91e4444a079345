//! Error types for the vote engine service.
//! Consolidates errors from the engine, the repository, and the database
//! layer into the single enum the binary surfaces.
#[derive(Debug, thiserror::Error)]
pub enum VoteServiceError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Repository error: {0}")]
    Repository(#[from] vote_engine_repository::VoteRepositoryError),
    #[error("Vote engine error: {0}")]
    Engine(#[from] vote_engine_core::VoteError),
    #[error("Reputation error: {0}")]
    Reputation(#[from] vote_engine_core::ReputationError),
}
