//! Repository for the `tags` and `note_tags` tables.
//!
//! Tags are created on first use ("connect or create") and never deleted.

use std::collections::HashMap;

use reverie_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::tag::{NoteTag, Tag};

/// Provides tag upserts and note-tag associations.
pub struct TagRepo;

impl TagRepo {
    /// Create a tag or return the existing one with the same name.
    ///
    /// `name` must already be normalized. Uses `ON CONFLICT` for idempotent
    /// creation so concurrent writers converge on one row.
    pub async fn create_or_get(conn: &mut PgConnection, name: &str) -> Result<Tag, sqlx::Error> {
        sqlx::query_as::<_, Tag>(
            "INSERT INTO tags (name) VALUES ($1) \
             ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name \
             RETURNING id, name",
        )
        .bind(name)
        .fetch_one(conn)
        .await
    }

    /// Attach each named tag to a note, creating missing tags.
    ///
    /// Returns the attached tags in input order.
    pub async fn attach_to_note(
        conn: &mut PgConnection,
        note_id: DbId,
        names: &[String],
    ) -> Result<Vec<Tag>, sqlx::Error> {
        let mut tags = Vec::with_capacity(names.len());

        for name in names {
            let tag = Self::create_or_get(&mut *conn, name).await?;
            sqlx::query(
                "INSERT INTO note_tags (note_id, tag_id) VALUES ($1, $2) \
                 ON CONFLICT DO NOTHING",
            )
            .bind(note_id)
            .bind(tag.id)
            .execute(&mut *conn)
            .await?;
            tags.push(tag);
        }

        Ok(tags)
    }

    /// Load the tags of many notes at once, grouped by note id.
    ///
    /// Tags within a note are ordered by name.
    pub async fn list_for_notes(
        pool: &PgPool,
        note_ids: &[DbId],
    ) -> Result<HashMap<DbId, Vec<Tag>>, sqlx::Error> {
        if note_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = sqlx::query_as::<_, NoteTag>(
            "SELECT nt.note_id, t.id, t.name \
             FROM note_tags nt \
             JOIN tags t ON t.id = nt.tag_id \
             WHERE nt.note_id = ANY($1) \
             ORDER BY t.name",
        )
        .bind(note_ids)
        .fetch_all(pool)
        .await?;

        let mut grouped: HashMap<DbId, Vec<Tag>> = HashMap::new();
        for row in rows {
            grouped.entry(row.note_id).or_default().push(Tag {
                id: row.id,
                name: row.name,
            });
        }
        Ok(grouped)
    }
}
