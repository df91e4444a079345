//! Vote Engine Service
//!
//! This library wires the vote transition engine to its PostgreSQL
//! repository: configuration management, error handling, and dependency
//! injection. The CRUD and routing layer that consumes the engine lives
//! elsewhere; it calls `VoteEngine` through the `Dependencies` built here.
pub mod config;
pub mod errors;

pub use config::Dependencies;
pub use errors::VoteServiceError;
