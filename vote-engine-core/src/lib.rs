//! # Vote Engine Core
//! This crate implements the vote transition engine: the per-user, per-item
//! vote state machine, the atomic propagation of transitions into the
//! denormalized aggregate counters, and the recomputation of author
//! reputation from those counters.
pub mod engine;
pub mod errors;
pub mod reputation;

pub use engine::VoteEngine;
pub use errors::{ReputationError, VoteError};
pub use reputation::ReputationUpdater;
