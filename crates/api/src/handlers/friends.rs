//! Handlers for friend lists.

use axum::extract::State;
use reverie_core::error::CoreError;
use reverie_db::models::user::UserSummary;
use reverie_db::repositories::FriendRequestRepo;
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::{Json, Query};
use crate::middleware::auth::AuthUser;
use crate::query::UserIdParams;
use crate::response::RemoveFriendResponse;
use crate::state::AppState;

/// Request body for `DELETE /api/friends/remove`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RemoveFriendRequest {
    #[validate(
        required(message = "friendId is required"),
        length(min = 1, message = "friendId is required")
    )]
    pub friend_id: Option<String>,
}

/// GET /api/friends/list?userId=
///
/// Friends of `userId` (defaults to the caller), ordered by username.
pub async fn list_friends(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<UserIdParams>,
) -> AppResult<Json<Vec<UserSummary>>> {
    let user_id = params.user_id().unwrap_or(auth.user_id.as_str());

    let friends = FriendRequestRepo::list_friends(&state.pool, user_id).await?;

    Ok(Json(friends))
}

/// DELETE /api/friends/remove
///
/// End the friendship between the caller and `friendId`.
pub async fn remove_friend(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<RemoveFriendRequest>,
) -> AppResult<Json<RemoveFriendResponse>> {
    input.validate()?;
    let friend_id = input.friend_id.as_deref().unwrap_or_default().trim();

    if friend_id == auth.user_id {
        return Err(AppError::Core(CoreError::Validation(
            "You cannot remove yourself".into(),
        )));
    }

    let deleted =
        FriendRequestRepo::delete_friendship(&state.pool, &auth.user_id, friend_id).await?;
    if deleted == 0 {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Friendship with user",
            id: friend_id.to_string(),
        }));
    }

    tracing::info!(
        user_id = %auth.user_id,
        friend_id = %friend_id,
        deleted,
        "Friend removed",
    );

    Ok(Json(RemoveFriendResponse {
        message: "Friend removed",
        deleted_requests: deleted,
    }))
}
