//! Route definitions for user profiles.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// User routes mounted at `/user`.
///
/// ```text
/// GET   /profile       -> get_profile (?userId)
/// PATCH /profile       -> update_profile
/// POST  /exist-check   -> exist_check
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/profile",
            get(users::get_profile).patch(users::update_profile),
        )
        .route("/exist-check", post(users::exist_check))
}
