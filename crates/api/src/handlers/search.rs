//! Handler for user and note search.

use axum::extract::State;
use reverie_core::search::{
    parse_tag_list, plan_search, NoteLookup, SearchMode, NOTE_RESULT_LIMIT, USER_RESULT_LIMIT,
};
use reverie_db::repositories::{SearchRepo, UserRepo};

use crate::error::AppResult;
use crate::extract::{Json, Query};
use crate::query::SearchParams;
use crate::response::SearchResponse;
use crate::state::AppState;

/// GET /api/search?q=&tags=&type=
///
/// Search usernames and/or public notes. No authentication. Only public
/// notes are ever returned.
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<SearchResponse>> {
    let mode = params
        .kind
        .as_deref()
        .map(str::parse::<SearchMode>)
        .transpose()?
        .unwrap_or_default();
    let tags = parse_tag_list(params.tags.as_deref());
    let plan = plan_search(params.q.as_deref(), &tags, mode);

    let mut response = SearchResponse::default();

    if let Some(query) = &plan.users {
        response.users =
            Some(UserRepo::search_by_username(&state.pool, query, USER_RESULT_LIMIT).await?);
    }

    if let Some(lookup) = &plan.notes {
        let notes = match lookup {
            NoteLookup::ByTags(tags) => {
                SearchRepo::notes_by_tags(&state.pool, tags, NOTE_RESULT_LIMIT).await?
            }
            NoteLookup::ByText(text) => {
                SearchRepo::notes_by_text(&state.pool, text, NOTE_RESULT_LIMIT).await?
            }
        };
        response.notes = Some(notes);
    }

    tracing::debug!(
        ?mode,
        users = response.users.as_ref().map(Vec::len),
        notes = response.notes.as_ref().map(Vec::len),
        "Search completed",
    );

    Ok(Json(response))
}
