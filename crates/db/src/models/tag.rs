//! Tag model.

use reverie_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `tags` table. Names are stored normalized.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Tag {
    pub id: DbId,
    pub name: String,
}

/// A tag joined with the note it is attached to, for batch loading.
#[derive(Debug, Clone, FromRow)]
pub struct NoteTag {
    pub note_id: DbId,
    pub id: DbId,
    pub name: String,
}
