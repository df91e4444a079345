//! Error types for the vote engine repository.
//! Consolidates and re-exports error types related to vote repository operations.
mod votes;

pub use votes::VoteRepositoryError;
