//! Repository for the `users` table.

use reverie_core::identity::fallback_usernames;
use reverie_core::search::contains_pattern;
use sqlx::PgPool;

use crate::models::user::{UpdateProfile, User, UserProfile, UserSummary};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, username, description, profile_picture, created_at, updated_at";

/// Provides lookups and lazy provisioning for users.
pub struct UserRepo;

impl UserRepo {
    /// Make sure a row exists for `id`, creating it on first sight.
    ///
    /// Idempotent: an existing row is returned untouched. When
    /// `preferred_username` is already taken by another user the row is
    /// created with the first free name from [`fallback_usernames`].
    pub async fn ensure(
        pool: &PgPool,
        id: &str,
        preferred_username: &str,
    ) -> Result<User, sqlx::Error> {
        if let Some(user) = Self::find_by_id(pool, id).await? {
            return Ok(user);
        }

        let mut candidates = vec![preferred_username.to_string()];
        candidates.extend(
            fallback_usernames(id)
                .into_iter()
                .filter(|name| name != preferred_username),
        );

        // ON CONFLICT without a target absorbs both a concurrent insert of the
        // same id and a username collision.
        let query = format!(
            "INSERT INTO users (id, username) VALUES ($1, $2) \
             ON CONFLICT DO NOTHING \
             RETURNING {COLUMNS}"
        );
        for username in &candidates {
            if let Some(user) = sqlx::query_as::<_, User>(&query)
                .bind(id)
                .bind(username)
                .fetch_optional(pool)
                .await?
            {
                Self::log_provisioned(&user, preferred_username);
                return Ok(user);
            }
            if let Some(user) = Self::find_by_id(pool, id).await? {
                return Ok(user);
            }
        }

        // Every candidate is taken. Retry the preferred name without absorbing
        // a username conflict so the unique violation reaches the caller.
        let query = format!(
            "INSERT INTO users (id, username) VALUES ($1, $2) \
             ON CONFLICT (id) DO UPDATE SET username = users.username \
             RETURNING {COLUMNS}"
        );
        let user = sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(preferred_username)
            .fetch_one(pool)
            .await?;
        Self::log_provisioned(&user, preferred_username);
        Ok(user)
    }

    fn log_provisioned(user: &User, preferred_username: &str) {
        if user.username == preferred_username {
            tracing::info!(user_id = %user.id, username = %user.username, "User provisioned");
        } else {
            tracing::info!(
                user_id = %user.id,
                username = %user.username,
                "User provisioned with fallback username",
            );
        }
    }

    /// Find a user by id.
    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Whether a user row exists for `id`.
    pub async fn exists(pool: &PgPool, id: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM users WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Public profile of a user.
    pub async fn find_profile(
        pool: &PgPool,
        id: &str,
    ) -> Result<Option<UserProfile>, sqlx::Error> {
        sqlx::query_as::<_, UserProfile>(
            "SELECT id, username, profile_picture, description FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Replace the profile picture and description of a user.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_profile(
        pool: &PgPool,
        id: &str,
        input: &UpdateProfile,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                profile_picture = $2,
                description = $3
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&input.profile_picture)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    /// Case-insensitive substring search on username.
    pub async fn search_by_username(
        pool: &PgPool,
        query: &str,
        limit: i64,
    ) -> Result<Vec<UserSummary>, sqlx::Error> {
        sqlx::query_as::<_, UserSummary>(
            "SELECT id, username, profile_picture FROM users \
             WHERE username ILIKE $1 \
             ORDER BY username \
             LIMIT $2",
        )
        .bind(contains_pattern(query))
        .bind(limit)
        .fetch_all(pool)
        .await
    }
}
