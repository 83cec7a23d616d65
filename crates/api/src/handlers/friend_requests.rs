//! Handlers for the friend-request workflow.
//!
//! A request moves pending -> accepted or pending -> rejected; a rejected
//! request can be revived by sending again. Accepted requests are what make
//! two users friends.

use axum::extract::State;
use axum::http::StatusCode;
use reverie_core::error::CoreError;
use reverie_core::friendship::{decide_send, SendDecision};
use reverie_db::models::friend_request::FriendRequestWithUsers;
use reverie_db::repositories::{FriendRequestRepo, UserRepo};
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::Json;
use crate::middleware::auth::{AuthUser, CurrentUser};
use crate::response::{MessageResponse, RequestsResponse};
use crate::state::AppState;

/// Request body for `POST /api/friend-requests/add`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SendFriendRequest {
    #[validate(
        required(message = "toId is required"),
        length(min = 1, message = "toId is required")
    )]
    pub to_id: Option<String>,
}

/// Request body for accepting or rejecting a request.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RespondFriendRequest {
    #[validate(
        required(message = "fromId is required"),
        length(min = 1, message = "fromId is required")
    )]
    pub from_id: Option<String>,
}

// ---------------------------------------------------------------------------
// Send
// ---------------------------------------------------------------------------

/// POST /api/friend-requests/add
///
/// Send a friend request from the caller to `toId`. Re-sending after a
/// rejection revives the existing row instead of inserting a new one.
pub async fn send_request(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Json(input): Json<SendFriendRequest>,
) -> AppResult<(StatusCode, Json<FriendRequestWithUsers>)> {
    input.validate()?;
    let to_id = input.to_id.as_deref().unwrap_or_default().trim();

    if to_id != user.id && !UserRepo::exists(&state.pool, to_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: to_id.to_string(),
        }));
    }

    // Lock the pair so a concurrent send in the other direction waits for
    // this decision and then sees the new row.
    let mut tx = state.pool.begin().await?;
    FriendRequestRepo::lock_pair(&mut tx, &user.id, to_id).await?;

    let forward = FriendRequestRepo::find_pair(&mut *tx, &user.id, to_id).await?;
    let reverse = FriendRequestRepo::find_pair(&mut *tx, to_id, &user.id).await?;

    let forward_status = forward.as_ref().map(|r| r.status()).transpose()?;
    let reverse_status = reverse.as_ref().map(|r| r.status()).transpose()?;

    let request_id = match decide_send(&user.id, to_id, forward_status, reverse_status)? {
        SendDecision::Create => FriendRequestRepo::create(&mut *tx, &user.id, to_id).await?.id,
        SendDecision::Reactivate => {
            let existing_id = forward.map(|r| r.id).ok_or_else(|| {
                AppError::InternalError("Reactivation without an existing request".into())
            })?;
            FriendRequestRepo::reactivate(&mut *tx, existing_id)
                .await?
                .ok_or_else(|| {
                    // Someone else moved the row out of `rejected` first.
                    CoreError::Conflict("Friend request already pending".into())
                })?
                .id
        }
    };
    tx.commit().await?;

    let request = FriendRequestRepo::find_with_users(&state.pool, request_id)
        .await?
        .ok_or_else(|| CoreError::not_found("FriendRequest", request_id))?;

    tracing::info!(
        request_id,
        from_id = %user.id,
        to_id = %to_id,
        "Friend request sent",
    );

    Ok((StatusCode::CREATED, Json(request)))
}

// ---------------------------------------------------------------------------
// Respond
// ---------------------------------------------------------------------------

/// POST /api/friend-requests/accept
///
/// Accept the pending request `fromId -> caller`. The two users become
/// friends atomically with the status change.
pub async fn accept_request(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<RespondFriendRequest>,
) -> AppResult<Json<MessageResponse>> {
    input.validate()?;
    let from_id = input.from_id.as_deref().unwrap_or_default().trim();

    if !FriendRequestRepo::accept(&state.pool, from_id, &auth.user_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Pending friend request from user",
            id: from_id.to_string(),
        }));
    }

    tracing::info!(from_id = %from_id, to_id = %auth.user_id, "Friend request accepted");

    Ok(Json(MessageResponse {
        message: "Friend request accepted",
    }))
}

/// POST /api/friend-requests/reject
///
/// Reject the request `fromId -> caller`.
pub async fn reject_request(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<RespondFriendRequest>,
) -> AppResult<Json<MessageResponse>> {
    input.validate()?;
    let from_id = input.from_id.as_deref().unwrap_or_default().trim();

    if !FriendRequestRepo::reject(&state.pool, from_id, &auth.user_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Friend request from user",
            id: from_id.to_string(),
        }));
    }

    tracing::info!(from_id = %from_id, to_id = %auth.user_id, "Friend request rejected");

    Ok(Json(MessageResponse {
        message: "Friend request rejected",
    }))
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

/// GET /api/friend-requests/list
///
/// Pending requests addressed to the caller, oldest first.
pub async fn list_requests(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<RequestsResponse>> {
    let requests = FriendRequestRepo::list_pending_incoming(&state.pool, &auth.user_id).await?;

    Ok(Json(RequestsResponse { requests }))
}
