use std::sync::Arc;

use vote_engine_core::{ReputationUpdater, VoteEngine};
use vote_engine_repository::{PostgresVoteRepository, VoteRepository};

use crate::errors::VoteServiceError;

/// `Dependencies` holds the wired components of the vote engine service.
///
/// It includes the transition engine consumed by the voting endpoints, the
/// reputation updater used by the resync sweep, and the repository both are
/// built on.
pub struct Dependencies {
    pub engine: VoteEngine,
    pub reputation: ReputationUpdater,
    pub repository: Arc<dyn VoteRepository>,
}

impl Dependencies {
    /// Creates a new `Dependencies` instance.
    ///
    /// Connects the PostgreSQL pool from `DATABASE_URL`, applies pending
    /// schema migrations, and injects the repository into the engine.
    ///
    /// # Returns
    ///
    /// A `Result` which is `Ok(Self)` on successful initialization or a
    /// `VoteServiceError` if the pool or migrations fail.
    pub async fn new() -> Result<Self, VoteServiceError> {
        let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

        let pool = sqlx::PgPool::connect(&database_url).await?;
        PostgresVoteRepository::migrate(&pool).await?;

        let repository: Arc<dyn VoteRepository> =
            Arc::new(PostgresVoteRepository::new(pool).await?);
        let engine = VoteEngine::new(Arc::clone(&repository));
        let reputation = ReputationUpdater::new(Arc::clone(&repository));

        Ok(Self {
            engine,
            reputation,
            repository,
        })
    }
}
