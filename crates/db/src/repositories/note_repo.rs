//! Repository for the `notes` table.
//!
//! Every read returns fully populated [`Note`]s: the owner's username comes
//! from a join, tags are batch-loaded in a second query.

use reverie_core::types::DbId;
use sqlx::PgPool;

use crate::models::note::{CreateNote, Note, NoteRow};
use crate::repositories::TagRepo;

/// Select list for [`NoteRow`], expecting `notes n JOIN users u`.
pub(crate) const NOTE_SELECT: &str = "\
    SELECT n.id, n.user_id, n.title, n.content, n.is_private, n.created_at, u.username \
    FROM notes n \
    JOIN users u ON u.id = n.user_id";

/// Provides note creation, visibility-aware listing, and deletion.
pub struct NoteRepo;

impl NoteRepo {
    /// Insert a note and attach its tags in one transaction.
    ///
    /// The owner row must already exist.
    pub async fn create(
        pool: &PgPool,
        owner_id: &str,
        input: &CreateNote,
    ) -> Result<Note, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let note_id: DbId = sqlx::query_scalar(
            "INSERT INTO notes (user_id, title, content, is_private) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id",
        )
        .bind(owner_id)
        .bind(&input.title)
        .bind(&input.content)
        .bind(input.is_private)
        .fetch_one(&mut *tx)
        .await?;

        let mut tags = TagRepo::attach_to_note(&mut *tx, note_id, &input.tags).await?;
        tags.sort_by(|a, b| a.name.cmp(&b.name));

        let query = format!("{NOTE_SELECT} WHERE n.id = $1");
        let row = sqlx::query_as::<_, NoteRow>(&query)
            .bind(note_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(row.into_note(tags))
    }

    /// Find a note by id, regardless of visibility.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Note>, sqlx::Error> {
        let query = format!("{NOTE_SELECT} WHERE n.id = $1");
        let row = sqlx::query_as::<_, NoteRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        match row {
            Some(row) => Ok(Self::with_tags(pool, vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    /// Owner id of a note, or `None` if it does not exist.
    pub async fn find_owner(pool: &PgPool, id: DbId) -> Result<Option<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>("SELECT user_id FROM notes WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Whether a note with `id` exists.
    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM notes WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Notes owned by `owner_id` that `viewer_id` may see, newest first.
    ///
    /// Public notes are always included; private notes only when the viewer
    /// is the owner.
    pub async fn list_for_owner(
        pool: &PgPool,
        owner_id: &str,
        viewer_id: Option<&str>,
    ) -> Result<Vec<Note>, sqlx::Error> {
        let query = format!(
            "{NOTE_SELECT} \
             WHERE n.user_id = $1 \
               AND (NOT n.is_private OR n.user_id = $2) \
             ORDER BY n.created_at DESC, n.id DESC"
        );
        let rows = sqlx::query_as::<_, NoteRow>(&query)
            .bind(owner_id)
            .bind(viewer_id)
            .fetch_all(pool)
            .await?;

        Self::with_tags(pool, rows).await
    }

    /// All public notes across every owner, newest first.
    pub async fn list_public_feed(pool: &PgPool) -> Result<Vec<Note>, sqlx::Error> {
        let query = format!(
            "{NOTE_SELECT} \
             WHERE NOT n.is_private \
             ORDER BY n.created_at DESC, n.id DESC"
        );
        let rows = sqlx::query_as::<_, NoteRow>(&query).fetch_all(pool).await?;

        Self::with_tags(pool, rows).await
    }

    /// Delete a note. Tag links and favorites cascade.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Attach tags to a batch of rows, preserving row order.
    pub(crate) async fn with_tags(
        pool: &PgPool,
        rows: Vec<NoteRow>,
    ) -> Result<Vec<Note>, sqlx::Error> {
        let ids: Vec<DbId> = rows.iter().map(|r| r.id).collect();
        let mut tags = TagRepo::list_for_notes(pool, &ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let note_tags = tags.remove(&row.id).unwrap_or_default();
                row.into_note(note_tags)
            })
            .collect())
    }
}
