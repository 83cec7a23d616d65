//! Friend request models.

use reverie_core::error::CoreError;
use reverie_core::friendship::RequestStatus;
use reverie_core::types::{DbId, Timestamp, UserId};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::user::UserProfile;

/// A row from the `friend_requests` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FriendRequest {
    pub id: DbId,
    pub from_id: UserId,
    pub to_id: UserId,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl FriendRequest {
    /// Parse the stored status column.
    pub fn status(&self) -> Result<RequestStatus, CoreError> {
        self.status.parse()
    }
}

/// A friend request with both participants resolved.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FriendRequestWithUsers {
    pub id: DbId,
    pub from_id: UserId,
    pub to_id: UserId,
    pub status: String,
    pub created_at: Timestamp,
    pub from: UserProfile,
    pub to: UserProfile,
}

/// Flat join row backing [`FriendRequestWithUsers`].
#[derive(Debug, Clone, FromRow)]
pub struct FriendRequestJoinRow {
    pub id: DbId,
    pub from_id: UserId,
    pub to_id: UserId,
    pub status: String,
    pub created_at: Timestamp,
    pub from_username: String,
    pub from_profile_picture: Option<String>,
    pub from_description: Option<String>,
    pub to_username: String,
    pub to_profile_picture: Option<String>,
    pub to_description: Option<String>,
}

impl From<FriendRequestJoinRow> for FriendRequestWithUsers {
    fn from(row: FriendRequestJoinRow) -> Self {
        Self {
            from: UserProfile {
                id: row.from_id.clone(),
                username: row.from_username,
                profile_picture: row.from_profile_picture,
                description: row.from_description,
            },
            to: UserProfile {
                id: row.to_id.clone(),
                username: row.to_username,
                profile_picture: row.to_profile_picture,
                description: row.to_description,
            },
            id: row.id,
            from_id: row.from_id,
            to_id: row.to_id,
            status: row.status,
            created_at: row.created_at,
        }
    }
}
