//! Repository for the `favorites` join table.

use reverie_core::types::DbId;
use sqlx::PgPool;

use crate::models::note::{Note, NoteRow};
use crate::repositories::note_repo::{NoteRepo, NOTE_SELECT};

/// Provides the favorite toggle and favorites listing.
pub struct FavoriteRepo;

impl FavoriteRepo {
    /// Favorite a note. Idempotent: favoriting twice is a no-op.
    ///
    /// Returns `true` if a new favorite was recorded.
    pub async fn add(pool: &PgPool, user_id: &str, note_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO favorites (user_id, note_id) VALUES ($1, $2) \
             ON CONFLICT (user_id, note_id) DO NOTHING",
        )
        .bind(user_id)
        .bind(note_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Unfavorite a note. Removing a non-favorite is a no-op.
    ///
    /// Returns `true` if a favorite was removed.
    pub async fn remove(pool: &PgPool, user_id: &str, note_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM favorites WHERE user_id = $1 AND note_id = $2")
            .bind(user_id)
            .bind(note_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Notes favorited by `user_id`, ordered by note creation time (newest
    /// first). Unknown users simply have no favorites.
    pub async fn list_for_user(pool: &PgPool, user_id: &str) -> Result<Vec<Note>, sqlx::Error> {
        let query = format!(
            "{NOTE_SELECT} \
             JOIN favorites f ON f.note_id = n.id \
             WHERE f.user_id = $1 \
             ORDER BY n.created_at DESC, n.id DESC"
        );
        let rows = sqlx::query_as::<_, NoteRow>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await?;

        NoteRepo::with_tags(pool, rows).await
    }
}
