//! Handlers for favorite notes.
//!
//! Adding and removing are idempotent and both answer with the caller's
//! updated favorites list.

use axum::extract::State;
use reverie_core::error::CoreError;
use reverie_core::notes::is_visible_to;
use reverie_core::types::DbId;
use reverie_db::models::note::Note;
use reverie_db::repositories::{FavoriteRepo, NoteRepo};
use serde::Deserialize;
use validator::Validate;

use crate::error::AppResult;
use crate::extract::{Json, Query};
use crate::middleware::auth::{AuthUser, CurrentUser};
use crate::query::UserIdParams;
use crate::state::AppState;

/// Request body for `POST`/`DELETE /api/favorites`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteRequest {
    #[validate(required(message = "noteId is required"))]
    pub note_id: Option<DbId>,
}

impl FavoriteRequest {
    fn note_id(&self) -> AppResult<DbId> {
        self.validate()?;
        Ok(self.note_id.unwrap_or_default())
    }
}

/// GET /api/favorites?userId=
///
/// Favorites of `userId`, or of the caller when omitted. Notes the caller is
/// not allowed to see are left out.
pub async fn list_favorites(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<UserIdParams>,
) -> AppResult<Json<Vec<Note>>> {
    let user_id = params.user_id().unwrap_or(auth.user_id.as_str());

    let notes = visible_favorites(&state, user_id, &auth.user_id).await?;

    Ok(Json(notes))
}

/// POST /api/favorites
///
/// Favorite a note. Favoriting twice is a no-op.
pub async fn add_favorite(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Json(input): Json<FavoriteRequest>,
) -> AppResult<Json<Vec<Note>>> {
    let note_id = input.note_id()?;

    let note = NoteRepo::find_by_id(&state.pool, note_id)
        .await?
        .filter(|n| is_visible_to(n.is_private, &n.user_id, Some(&user.id)))
        .ok_or_else(|| CoreError::not_found("Note", note_id))?;

    if FavoriteRepo::add(&state.pool, &user.id, note.id).await? {
        tracing::info!(note_id, user_id = %user.id, "Note favorited");
    }

    let notes = visible_favorites(&state, &user.id, &user.id).await?;
    Ok(Json(notes))
}

/// DELETE /api/favorites
///
/// Unfavorite a note. Removing a note that is not a favorite is a no-op.
pub async fn remove_favorite(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Json(input): Json<FavoriteRequest>,
) -> AppResult<Json<Vec<Note>>> {
    let note_id = input.note_id()?;

    if !NoteRepo::exists(&state.pool, note_id).await? {
        return Err(CoreError::not_found("Note", note_id).into());
    }

    if FavoriteRepo::remove(&state.pool, &user.id, note_id).await? {
        tracing::info!(note_id, user_id = %user.id, "Note unfavorited");
    }

    let notes = visible_favorites(&state, &user.id, &user.id).await?;
    Ok(Json(notes))
}

/// Favorites of `user_id` filtered by what `viewer_id` may see.
async fn visible_favorites(
    state: &AppState,
    user_id: &str,
    viewer_id: &str,
) -> AppResult<Vec<Note>> {
    let mut notes = FavoriteRepo::list_for_user(&state.pool, user_id).await?;
    notes.retain(|n| is_visible_to(n.is_private, &n.user_id, Some(viewer_id)));
    Ok(notes)
}
