//! Repository for the `friend_requests` table.
//!
//! This table is the single source of truth for friendship: an accepted row
//! in either direction makes two users friends. Transition rules live in
//! [`reverie_core::friendship`]; this module only persists their outcome.

use reverie_core::friendship::{pair_lock_key, RequestStatus};
use reverie_core::types::DbId;
use sqlx::{PgExecutor, PgPool, Postgres, Transaction};

use crate::models::friend_request::{
    FriendRequest, FriendRequestJoinRow, FriendRequestWithUsers,
};
use crate::models::user::UserSummary;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, from_id, to_id, status, created_at, updated_at";

/// Select list for [`FriendRequestJoinRow`].
const JOIN_SELECT: &str = "\
    SELECT fr.id, fr.from_id, fr.to_id, fr.status, fr.created_at, \
           uf.username AS from_username, \
           uf.profile_picture AS from_profile_picture, \
           uf.description AS from_description, \
           ut.username AS to_username, \
           ut.profile_picture AS to_profile_picture, \
           ut.description AS to_description \
    FROM friend_requests fr \
    JOIN users uf ON uf.id = fr.from_id \
    JOIN users ut ON ut.id = fr.to_id";

/// Provides persistence for the friend-request state machine.
pub struct FriendRequestRepo;

impl FriendRequestRepo {
    /// Serialize request writes between two users for the rest of `tx`.
    ///
    /// The lock is keyed on the unordered pair and released on commit or
    /// rollback.
    pub async fn lock_pair(
        tx: &mut Transaction<'_, Postgres>,
        a: &str,
        b: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT pg_advisory_xact_lock(hashtextextended($1, 0))")
            .bind(pair_lock_key(a, b))
            .execute(&mut **tx)
            .await?;
        Ok(())
    }

    /// Find the request for the ordered pair `from -> to`.
    pub async fn find_pair(
        executor: impl PgExecutor<'_>,
        from_id: &str,
        to_id: &str,
    ) -> Result<Option<FriendRequest>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM friend_requests WHERE from_id = $1 AND to_id = $2");
        sqlx::query_as::<_, FriendRequest>(&query)
            .bind(from_id)
            .bind(to_id)
            .fetch_optional(executor)
            .await
    }

    /// Insert a new pending request.
    pub async fn create(
        executor: impl PgExecutor<'_>,
        from_id: &str,
        to_id: &str,
    ) -> Result<FriendRequest, sqlx::Error> {
        let query = format!(
            "INSERT INTO friend_requests (from_id, to_id, status) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FriendRequest>(&query)
            .bind(from_id)
            .bind(to_id)
            .bind(RequestStatus::Pending.as_str())
            .fetch_one(executor)
            .await
    }

    /// Revive a rejected request: back to pending with a fresh `created_at`.
    ///
    /// Returns `None` if the row is missing or no longer rejected.
    pub async fn reactivate(
        executor: impl PgExecutor<'_>,
        id: DbId,
    ) -> Result<Option<FriendRequest>, sqlx::Error> {
        let query = format!(
            "UPDATE friend_requests SET status = $2, created_at = now() \
             WHERE id = $1 AND status = $3 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FriendRequest>(&query)
            .bind(id)
            .bind(RequestStatus::Pending.as_str())
            .bind(RequestStatus::Rejected.as_str())
            .fetch_optional(executor)
            .await
    }

    /// Load a request with both participants resolved.
    pub async fn find_with_users(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<FriendRequestWithUsers>, sqlx::Error> {
        let query = format!("{JOIN_SELECT} WHERE fr.id = $1");
        let row = sqlx::query_as::<_, FriendRequestJoinRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(FriendRequestWithUsers::from))
    }

    /// Accept the pending request `from -> to`.
    ///
    /// Runs in a transaction that locks the row before flipping it, so the
    /// status change and the resulting friendship become visible together or
    /// not at all. Returns `false` when no pending request exists.
    pub async fn accept(pool: &PgPool, from_id: &str, to_id: &str) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let pending: Option<DbId> = sqlx::query_scalar(
            "SELECT id FROM friend_requests \
             WHERE from_id = $1 AND to_id = $2 AND status = $3 \
             FOR UPDATE",
        )
        .bind(from_id)
        .bind(to_id)
        .bind(RequestStatus::Pending.as_str())
        .fetch_optional(&mut *tx)
        .await?;

        let Some(id) = pending else {
            tx.rollback().await?;
            return Ok(false);
        };

        sqlx::query("UPDATE friend_requests SET status = $2 WHERE id = $1")
            .bind(id)
            .bind(RequestStatus::Accepted.as_str())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(true)
    }

    /// Mark the request `from -> to` as rejected, whatever its prior status.
    ///
    /// Returns `false` when no request exists for the pair.
    pub async fn reject(pool: &PgPool, from_id: &str, to_id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE friend_requests SET status = $3 \
             WHERE from_id = $1 AND to_id = $2",
        )
        .bind(from_id)
        .bind(to_id)
        .bind(RequestStatus::Rejected.as_str())
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete every accepted request between two users, in both directions.
    ///
    /// Returns the number of rows removed; zero means they were not friends.
    pub async fn delete_friendship(
        pool: &PgPool,
        user_id: &str,
        friend_id: &str,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM friend_requests \
             WHERE status = $3 \
               AND ((from_id = $1 AND to_id = $2) OR (from_id = $2 AND to_id = $1))",
        )
        .bind(user_id)
        .bind(friend_id)
        .bind(RequestStatus::Accepted.as_str())
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Friends of `user_id`: the other side of every accepted request
    /// involving them, deduplicated and ordered by username.
    pub async fn list_friends(
        pool: &PgPool,
        user_id: &str,
    ) -> Result<Vec<UserSummary>, sqlx::Error> {
        sqlx::query_as::<_, UserSummary>(
            "SELECT DISTINCT u.id, u.username, u.profile_picture \
             FROM friend_requests fr \
             JOIN users u \
               ON u.id = CASE WHEN fr.from_id = $1 THEN fr.to_id ELSE fr.from_id END \
             WHERE fr.status = $2 \
               AND (fr.from_id = $1 OR fr.to_id = $1) \
             ORDER BY u.username",
        )
        .bind(user_id)
        .bind(RequestStatus::Accepted.as_str())
        .fetch_all(pool)
        .await
    }

    /// Pending requests addressed to `user_id`, oldest first.
    pub async fn list_pending_incoming(
        pool: &PgPool,
        user_id: &str,
    ) -> Result<Vec<FriendRequestWithUsers>, sqlx::Error> {
        let query = format!(
            "{JOIN_SELECT} \
             WHERE fr.to_id = $1 AND fr.status = $2 \
             ORDER BY fr.created_at, fr.id"
        );
        let rows = sqlx::query_as::<_, FriendRequestJoinRow>(&query)
            .bind(user_id)
            .bind(RequestStatus::Pending.as_str())
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(FriendRequestWithUsers::from).collect())
    }
}
