//! Handler for the public feed.

use axum::extract::State;
use reverie_db::models::note::Note;
use reverie_db::repositories::NoteRepo;

use crate::error::AppResult;
use crate::extract::Json;
use crate::state::AppState;

/// GET /api/feed
///
/// Every public note, newest first. No authentication.
pub async fn list_feed(State(state): State<AppState>) -> AppResult<Json<Vec<Note>>> {
    let notes = NoteRepo::list_public_feed(&state.pool).await?;
    Ok(Json(notes))
}
