//! Route definitions for friend requests and friend lists.
//!
//! Two routers are provided:
//! - `requests_router()` for the request workflow mounted at `/friend-requests`
//! - `router()` for friend lists mounted at `/friends`

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::{friend_requests, friends};
use crate::state::AppState;

/// Friend-request routes mounted at `/friend-requests`.
///
/// ```text
/// POST /add      -> send_request
/// POST /accept   -> accept_request
/// POST /reject   -> reject_request
/// GET  /list     -> list_requests
/// ```
pub fn requests_router() -> Router<AppState> {
    Router::new()
        .route("/add", post(friend_requests::send_request))
        .route("/accept", post(friend_requests::accept_request))
        .route("/reject", post(friend_requests::reject_request))
        .route("/list", get(friend_requests::list_requests))
}

/// Friend list routes mounted at `/friends`.
///
/// ```text
/// GET    /list     -> list_friends (?userId)
/// DELETE /remove   -> remove_friend
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/list", get(friends::list_friends))
        .route("/remove", delete(friends::remove_friend))
}
