//! Response payloads shared by several handlers.

use reverie_db::models::friend_request::FriendRequestWithUsers;
use reverie_db::models::note::Note;
use reverie_db::models::user::{User, UserSummary};
use serde::Serialize;

/// `{ "message": ... }` acknowledgement.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Pending friend requests addressed to the caller.
#[derive(Debug, Serialize)]
pub struct RequestsResponse {
    pub requests: Vec<FriendRequestWithUsers>,
}

/// Result of removing a friendship.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveFriendResponse {
    pub message: &'static str,
    pub deleted_requests: u64,
}

/// Search results. A key is omitted when that half of the search did not run.
#[derive(Debug, Default, Serialize)]
pub struct SearchResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub users: Option<Vec<UserSummary>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<Vec<Note>>,
}

/// Location of a freshly uploaded image.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub url: String,
    pub public_id: String,
}

/// Acknowledgement of a profile update.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdatedResponse {
    pub message: &'static str,
    pub profile_picture: Option<String>,
}

/// Outcome of the explicit user bootstrap.
#[derive(Debug, Serialize)]
pub struct ExistCheckResponse {
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}
