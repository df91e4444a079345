//! PostgreSQL implementation of the vote repository.
//!
//! Provides a production PostgreSQL backend for the `VoteRepository` trait
//! with connection pooling and transaction safety.
//!
//! ## Database Tables
//!
//! - `users`: account rows carrying the stored reputation
//! - `tickets` / `replies`: content items with denormalized vote counters
//! - `user_votes_tickets` / `user_votes_replies`: one vote row per
//!   (user, item), keyed by a composite primary key
//!
//! Ticket and reply handling share one code path; the item kind only selects
//! the table and column names. Counter adjustments are relative SQL updates
//! clamped with `GREATEST`, never application-level read-modify-write.
use async_trait::async_trait;
use sqlx::Row;
use tracing::debug;
use vote_engine_shared::types::{
    ItemId, ItemKind, UserId, VoteCounts, VoteMutation, VoteRecord, VoteType, VoteWrite,
};

use crate::{VoteRepository, VoteRepositoryError};

/// Embedded schema migrations, applied by `PostgresVoteRepository::migrate`.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("src/postgres/migrations");

/// PostgreSQL implementation of the vote repository.
///
/// Holds a `sqlx::PgPool`; every transition runs in its own transaction so a
/// vote row write and its counter adjustment commit together or not at all.
pub struct PostgresVoteRepository {
    pool: sqlx::PgPool,
}

fn items_table(kind: ItemKind) -> &'static str {
    match kind {
        ItemKind::Ticket => "tickets",
        ItemKind::Reply => "replies",
    }
}

fn votes_table(kind: ItemKind) -> &'static str {
    match kind {
        ItemKind::Ticket => "user_votes_tickets",
        ItemKind::Reply => "user_votes_replies",
    }
}

fn item_column(kind: ItemKind) -> &'static str {
    match kind {
        ItemKind::Ticket => "ticket_id",
        ItemKind::Reply => "reply_id",
    }
}

fn vote_type_to_i16(vote_type: VoteType) -> i16 {
    match vote_type {
        VoteType::Up => 0,
        VoteType::Down => 1,
    }
}

fn vote_type_from_i16(value: i16) -> Result<VoteType, VoteRepositoryError> {
    match value {
        0 => Ok(VoteType::Up),
        1 => Ok(VoteType::Down),
        other => Err(VoteRepositoryError::InvalidVoteType(other)),
    }
}

fn is_unique_violation(error: &sqlx::Error) -> bool {
    match error {
        sqlx::Error::Database(db) => db.code().as_deref() == Some("23505"),
        _ => false,
    }
}

impl PostgresVoteRepository {
    /// Creates a new PostgreSQL repository instance.
    ///
    /// # Arguments
    ///
    /// * `pool` - Configured PostgreSQL connection pool with required schema
    pub async fn new(pool: sqlx::PgPool) -> Result<Self, VoteRepositoryError> {
        Ok(Self { pool })
    }

    /// Runs the embedded schema migrations against the given pool.
    pub async fn migrate(pool: &sqlx::PgPool) -> Result<(), VoteRepositoryError> {
        MIGRATOR.run(pool).await?;
        Ok(())
    }
}

#[async_trait]
impl VoteRepository for PostgresVoteRepository {
    async fn user_exists(&self, user_id: UserId) -> Result<bool, VoteRepositoryError> {
        let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn item_exists(&self, item_id: ItemId, kind: ItemKind) -> Result<bool, VoteRepositoryError> {
        let sql = format!(
            "SELECT EXISTS(SELECT 1 FROM {} WHERE id = $1)",
            items_table(kind)
        );
        let exists = sqlx::query_scalar::<_, bool>(&sql)
            .bind(item_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn item_author(&self, item_id: ItemId, kind: ItemKind) -> Result<Option<UserId>, VoteRepositoryError> {
        let sql = format!("SELECT author_id FROM {} WHERE id = $1", items_table(kind));
        let row = sqlx::query(&sql)
            .bind(item_id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(row.try_get::<Option<i64>, _>("author_id")?),
            None => Ok(None),
        }
    }

    async fn get_vote(
        &self,
        user_id: UserId,
        item_id: ItemId,
        kind: ItemKind,
    ) -> Result<Option<VoteType>, VoteRepositoryError> {
        let sql = format!(
            "SELECT vote_type FROM {} WHERE user_id = $1 AND {} = $2",
            votes_table(kind),
            item_column(kind)
        );
        let stored = sqlx::query_scalar::<_, i16>(&sql)
            .bind(user_id)
            .bind(item_id)
            .fetch_optional(&self.pool)
            .await?;

        stored.map(vote_type_from_i16).transpose()
    }

    /// Applies the vote-row write and the counter adjustment in one
    /// transaction.
    ///
    /// The row write is conditional on the vote state the engine observed:
    /// inserts surface the composite-key unique violation, updates and
    /// deletes require the stored `vote_type` to still match. Either case
    /// aborts the transaction with `Conflict` before any counter is touched,
    /// so a racing request can be retried from scratch.
    async fn apply_transition(
        &self,
        user_id: UserId,
        item_id: ItemId,
        kind: ItemKind,
        mutation: &VoteMutation,
    ) -> Result<(), VoteRepositoryError> {
        let votes = votes_table(kind);
        let column = item_column(kind);

        let mut tx = self.pool.begin().await?;

        match mutation.write {
            VoteWrite::Insert(vote_type) => {
                let sql = format!(
                    "INSERT INTO {votes} (user_id, {column}, vote_type) VALUES ($1, $2, $3)"
                );
                let result = sqlx::query(&sql)
                    .bind(user_id)
                    .bind(item_id)
                    .bind(vote_type_to_i16(vote_type))
                    .execute(&mut *tx)
                    .await;
                match result {
                    Ok(_) => {}
                    Err(error) if is_unique_violation(&error) => {
                        debug!(user_id, item_id, kind = %kind, "vote insert lost a race");
                        return Err(VoteRepositoryError::Conflict);
                    }
                    Err(error) => return Err(error.into()),
                }
            }
            VoteWrite::Update { from, to } => {
                let sql = format!(
                    "UPDATE {votes} SET vote_type = $3 WHERE user_id = $1 AND {column} = $2 AND vote_type = $4"
                );
                let result = sqlx::query(&sql)
                    .bind(user_id)
                    .bind(item_id)
                    .bind(vote_type_to_i16(to))
                    .bind(vote_type_to_i16(from))
                    .execute(&mut *tx)
                    .await?;
                if result.rows_affected() == 0 {
                    return Err(VoteRepositoryError::Conflict);
                }
            }
            VoteWrite::Delete { previous } => {
                let sql = format!(
                    "DELETE FROM {votes} WHERE user_id = $1 AND {column} = $2 AND vote_type = $3"
                );
                let result = sqlx::query(&sql)
                    .bind(user_id)
                    .bind(item_id)
                    .bind(vote_type_to_i16(previous))
                    .execute(&mut *tx)
                    .await?;
                if result.rows_affected() == 0 {
                    return Err(VoteRepositoryError::Conflict);
                }
            }
        }

        let sql = format!(
            "UPDATE {} SET upvotes = GREATEST(upvotes + $2, 0), downvotes = GREATEST(downvotes + $3, 0) WHERE id = $1",
            items_table(kind)
        );
        sqlx::query(&sql)
            .bind(item_id)
            .bind(mutation.upvote_delta)
            .bind(mutation.downvote_delta)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn user_votes(&self, user_id: UserId, kind: ItemKind) -> Result<Vec<VoteRecord>, VoteRepositoryError> {
        let sql = format!(
            "SELECT {} AS item_id, vote_type FROM {} WHERE user_id = $1",
            item_column(kind),
            votes_table(kind)
        );
        let rows = sqlx::query(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            records.push(VoteRecord {
                user_id,
                item_id: row.try_get("item_id")?,
                item_kind: kind,
                vote_type: vote_type_from_i16(row.try_get("vote_type")?)?,
            });
        }
        Ok(records)
    }

    async fn sum_authored_counts(&self, user_id: UserId) -> Result<VoteCounts, VoteRepositoryError> {
        let mut counts = VoteCounts::default();
        for kind in ItemKind::ALL {
            let sql = format!(
                "SELECT COALESCE(SUM(upvotes), 0)::BIGINT AS upvotes, \
                 COALESCE(SUM(downvotes), 0)::BIGINT AS downvotes \
                 FROM {} WHERE author_id = $1",
                items_table(kind)
            );
            let row = sqlx::query(&sql)
                .bind(user_id)
                .fetch_one(&self.pool)
                .await?;
            counts.upvotes += row.try_get::<i64, _>("upvotes")?;
            counts.downvotes += row.try_get::<i64, _>("downvotes")?;
        }
        Ok(counts)
    }

    async fn read_reputation(&self, user_id: UserId) -> Result<Option<i16>, VoteRepositoryError> {
        let reputation = sqlx::query_scalar::<_, i16>("SELECT reputation FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(reputation)
    }

    async fn write_reputation(&self, user_id: UserId, value: i16) -> Result<(), VoteRepositoryError> {
        sqlx::query("UPDATE users SET reputation = $2 WHERE id = $1")
            .bind(user_id)
            .bind(value)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn list_authors(&self) -> Result<Vec<UserId>, VoteRepositoryError> {
        let sql = ItemKind::ALL
            .iter()
            .map(|kind| {
                format!(
                    "SELECT author_id FROM {} WHERE author_id IS NOT NULL",
                    items_table(*kind)
                )
            })
            .collect::<Vec<_>>()
            .join(" UNION ");
        let authors = sqlx::query_scalar::<_, i64>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(authors)
    }
}
