//! Note (journal entry) models and DTOs.

use reverie_core::types::{DbId, Timestamp, UserId};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::tag::Tag;

/// A `notes` row joined with its owner's username.
#[derive(Debug, Clone, FromRow)]
pub struct NoteRow {
    pub id: DbId,
    pub user_id: UserId,
    pub title: String,
    pub content: String,
    pub is_private: bool,
    pub created_at: Timestamp,
    pub username: String,
}

impl NoteRow {
    /// Attach the note's tags, producing the API representation.
    pub fn into_note(self, tags: Vec<Tag>) -> Note {
        Note {
            id: self.id,
            title: self.title,
            content: self.content,
            is_private: self.is_private,
            user_id: self.user_id.clone(),
            created_at: self.created_at,
            user: NoteAuthor {
                id: self.user_id,
                username: self.username,
            },
            tags,
        }
    }
}

/// Owner reference embedded in every note.
#[derive(Debug, Clone, Serialize)]
pub struct NoteAuthor {
    pub id: UserId,
    pub username: String,
}

/// A note with its owner and tags populated.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: DbId,
    pub title: String,
    pub content: String,
    pub is_private: bool,
    pub user_id: UserId,
    pub created_at: Timestamp,
    pub user: NoteAuthor,
    pub tags: Vec<Tag>,
}

/// Validated input for inserting a note. Tag names must already be
/// normalized.
#[derive(Debug, Clone)]
pub struct CreateNote {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub is_private: bool,
}
