//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// `?userId=` selector used by listing endpoints.
///
/// Whether the parameter is required, or defaults to the caller, is decided
/// per handler.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIdParams {
    pub user_id: Option<String>,
}

impl UserIdParams {
    /// The requested user id, with blank values treated as absent.
    pub fn user_id(&self) -> Option<&str> {
        self.user_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }
}

/// Query parameters for `GET /api/search`.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    /// Free-text query.
    pub q: Option<String>,
    /// Comma-separated tag names.
    pub tags: Option<String>,
    /// `users`, `notes` or `both` (default).
    #[serde(rename = "type")]
    pub kind: Option<String>,
}
