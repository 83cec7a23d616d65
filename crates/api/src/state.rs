use std::sync::Arc;

use crate::config::ServerConfig;
use crate::media::MediaStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: reverie_db::DbPool,
    /// Server configuration (auth secrets, timeouts, CORS).
    pub config: Arc<ServerConfig>,
    /// External media service used for profile picture uploads.
    pub media: Arc<dyn MediaStore>,
}
