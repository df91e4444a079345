use dotenv::dotenv;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use vote_engine::{Dependencies, VoteServiceError};

/// Maintenance entry point: recomputes every author's reputation from the
/// current aggregate counters.
///
/// Reputation is a full derivation, so running the sweep brings every stored
/// value back in line after manual data fixes or an interrupted write.
#[tokio::main]
async fn main() -> Result<(), VoteServiceError> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let dependencies = Dependencies::new().await?;

    let authors = dependencies.repository.list_authors().await?;
    info!(authors = authors.len(), "starting reputation resync");

    for user_id in authors {
        let value = dependencies.reputation.recompute(user_id).await?;
        debug!(user_id, value, "reputation recomputed");
    }

    info!("reputation resync complete");
    Ok(())
}
