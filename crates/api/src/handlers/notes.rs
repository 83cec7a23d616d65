//! Handlers for dream journal notes.
//!
//! Listing honors note visibility: private notes are only returned to their
//! owner. Creating and deleting require an authenticated caller.

use axum::extract::State;
use axum::http::StatusCode;
use reverie_core::error::CoreError;
use reverie_core::notes::{is_visible_to, normalize_tags, validate_note_input};
use reverie_core::types::DbId;
use reverie_db::models::note::{CreateNote, Note};
use reverie_db::repositories::NoteRepo;
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::{Json, Path, Query};
use crate::middleware::auth::{AuthUser, CurrentUser, MaybeAuthUser};
use crate::query::UserIdParams;
use crate::state::AppState;

/// Request body for `POST /api/notes`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateNoteRequest {
    #[validate(required(message = "title is required"))]
    pub title: Option<String>,
    #[validate(required(message = "content is required"))]
    pub content: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_private: bool,
}

/// GET /api/notes?userId=
///
/// Notes owned by `userId` that the caller may see, newest first. Anonymous
/// callers only see public notes.
pub async fn list_notes(
    viewer: MaybeAuthUser,
    State(state): State<AppState>,
    Query(params): Query<UserIdParams>,
) -> AppResult<Json<Vec<Note>>> {
    let owner_id = params
        .user_id()
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Missing user id".into())))?;

    let notes = NoteRepo::list_for_owner(&state.pool, owner_id, viewer.user_id()).await?;

    Ok(Json(notes))
}

/// POST /api/notes
///
/// Create a note owned by the caller. Tag names are normalized and created
/// on first use.
pub async fn create_note(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Json(input): Json<CreateNoteRequest>,
) -> AppResult<(StatusCode, Json<Note>)> {
    input.validate()?;

    let title = validate_note_input(
        input.title.as_deref().unwrap_or_default(),
        input.content.as_deref().unwrap_or_default(),
    )?;
    let tags = normalize_tags(&input.tags)?;

    let create = CreateNote {
        title,
        content: input.content.unwrap_or_default(),
        tags,
        is_private: input.is_private,
    };
    let note = NoteRepo::create(&state.pool, &user.id, &create).await?;

    tracing::info!(
        note_id = note.id,
        user_id = %user.id,
        is_private = note.is_private,
        tag_count = note.tags.len(),
        "Note created",
    );

    Ok((StatusCode::CREATED, Json(note)))
}

/// GET /api/notes/{id}
///
/// A single note. Private notes of other users are reported as missing.
pub async fn get_note(
    viewer: MaybeAuthUser,
    State(state): State<AppState>,
    Path(note_id): Path<DbId>,
) -> AppResult<Json<Note>> {
    let note = NoteRepo::find_by_id(&state.pool, note_id)
        .await?
        .filter(|n| is_visible_to(n.is_private, &n.user_id, viewer.user_id()))
        .ok_or_else(|| CoreError::not_found("Note", note_id))?;

    Ok(Json(note))
}

/// DELETE /api/notes/{id}
///
/// Delete one of the caller's own notes.
pub async fn delete_note(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(note_id): Path<DbId>,
) -> AppResult<StatusCode> {
    let owner_id = NoteRepo::find_owner(&state.pool, note_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Note", note_id))?;

    if owner_id != auth.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "You can only delete your own notes".into(),
        )));
    }

    if !NoteRepo::delete(&state.pool, note_id).await? {
        return Err(CoreError::not_found("Note", note_id).into());
    }

    tracing::info!(note_id, user_id = %auth.user_id, "Note deleted");

    Ok(StatusCode::NO_CONTENT)
}
