pub mod favorites;
pub mod friends;
pub mod health;
pub mod notes;
pub mod users;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use reverie_core::media::MAX_UPLOAD_BYTES;

use crate::handlers;
use crate::state::AppState;

/// Headroom on top of the image size for multipart framing, so oversized
/// files reach validation instead of being cut off by the body limit.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /notes                              list (?userId), create
/// /notes/{id}                         get, delete (owner only)
/// /feed                               public feed (no auth)
///
/// /favorites                          list (?userId), add, remove
///
/// /friend-requests/add                send request (POST)
/// /friend-requests/accept             accept request (POST)
/// /friend-requests/reject             reject request (POST)
/// /friend-requests/list               pending incoming requests (GET)
/// /friends/list                       friends (?userId)
/// /friends/remove                     end a friendship (DELETE)
///
/// /search                             users and public notes (no auth)
///
/// /upload                             profile picture upload (multipart)
///
/// /user/profile                       get (?userId, no auth), update (PATCH)
/// /user/exist-check                   provision the caller (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Notes and the public feed.
        .nest("/notes", notes::router())
        .route("/feed", get(handlers::feed::list_feed))
        // Favorites.
        .nest("/favorites", favorites::router())
        // Relationships.
        .nest("/friend-requests", friends::requests_router())
        .nest("/friends", friends::router())
        // Search.
        .route("/search", get(handlers::search::search))
        // Uploads.
        .route(
            "/upload",
            post(handlers::upload::upload_image)
                .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES + MULTIPART_OVERHEAD_BYTES)),
        )
        // Profiles.
        .nest("/user", users::router())
}
