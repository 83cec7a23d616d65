//! User entity model and projections.

use reverie_core::types::{Timestamp, UserId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub description: Option<String>,
    pub profile_picture: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Public profile: what other users and the profile page see.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: UserId,
    pub username: String,
    pub profile_picture: Option<String>,
    pub description: Option<String>,
}

/// Compact user reference used in friend lists and user search results.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: UserId,
    pub username: String,
    pub profile_picture: Option<String>,
}

/// DTO for updating the caller's own profile.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfile {
    pub profile_picture: String,
    pub description: Option<String>,
}
