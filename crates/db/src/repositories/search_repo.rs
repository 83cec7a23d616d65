//! Note search queries. Only public notes are ever returned.

use reverie_core::search::contains_pattern;
use sqlx::PgPool;

use crate::models::note::{Note, NoteRow};
use crate::repositories::note_repo::{NoteRepo, NOTE_SELECT};

/// Provides tag and free-text note search.
pub struct SearchRepo;

impl SearchRepo {
    /// Public notes carrying any of `tag_names`, newest first.
    ///
    /// Matching is case-insensitive on both sides.
    pub async fn notes_by_tags(
        pool: &PgPool,
        tag_names: &[String],
        limit: i64,
    ) -> Result<Vec<Note>, sqlx::Error> {
        let lowered: Vec<String> = tag_names.iter().map(|t| t.to_lowercase()).collect();
        let query = format!(
            "{NOTE_SELECT} \
             WHERE NOT n.is_private \
               AND EXISTS ( \
                   SELECT 1 FROM note_tags nt \
                   JOIN tags t ON t.id = nt.tag_id \
                   WHERE nt.note_id = n.id AND LOWER(t.name) = ANY($1) \
               ) \
             ORDER BY n.created_at DESC, n.id DESC \
             LIMIT $2"
        );
        let rows = sqlx::query_as::<_, NoteRow>(&query)
            .bind(&lowered)
            .bind(limit)
            .fetch_all(pool)
            .await?;

        NoteRepo::with_tags(pool, rows).await
    }

    /// Public notes whose title or body contains `text`, newest first.
    pub async fn notes_by_text(
        pool: &PgPool,
        text: &str,
        limit: i64,
    ) -> Result<Vec<Note>, sqlx::Error> {
        let query = format!(
            "{NOTE_SELECT} \
             WHERE NOT n.is_private \
               AND (n.title ILIKE $1 OR n.content ILIKE $1) \
             ORDER BY n.created_at DESC, n.id DESC \
             LIMIT $2"
        );
        let rows = sqlx::query_as::<_, NoteRow>(&query)
            .bind(contains_pattern(text))
            .bind(limit)
            .fetch_all(pool)
            .await?;

        NoteRepo::with_tags(pool, rows).await
    }
}
