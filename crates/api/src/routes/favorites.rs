//! Route definitions for favorites.

use axum::routing::get;
use axum::Router;

use crate::handlers::favorites;
use crate::state::AppState;

/// Favorite routes mounted at `/favorites`.
///
/// ```text
/// GET    /   -> list_favorites (?userId)
/// POST   /   -> add_favorite
/// DELETE /   -> remove_favorite
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(favorites::list_favorites)
            .post(favorites::add_favorite)
            .delete(favorites::remove_favorite),
    )
}
