//! Handlers for user profiles and the explicit user bootstrap.

use axum::extract::State;
use reverie_core::error::CoreError;
use reverie_core::identity::normalize_description;
use reverie_db::models::user::{UpdateProfile, UserProfile};
use reverie_db::repositories::UserRepo;
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::{Json, Query};
use crate::middleware::auth::{AuthUser, CurrentUser};
use crate::query::UserIdParams;
use crate::response::{ExistCheckResponse, ProfileUpdatedResponse};
use crate::state::AppState;

/// Request body for `PATCH /api/user/profile`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[validate(
        required(message = "profilePicture is required"),
        url(message = "profilePicture must be a URL")
    )]
    pub profile_picture: Option<String>,
    pub description: Option<String>,
}

/// GET /api/user/profile?userId=
///
/// Public profile of any user. No authentication.
pub async fn get_profile(
    State(state): State<AppState>,
    Query(params): Query<UserIdParams>,
) -> AppResult<Json<UserProfile>> {
    let user_id = params
        .user_id()
        .ok_or_else(|| AppError::BadRequest("userId is required".into()))?;

    let profile = UserRepo::find_profile(&state.pool, user_id)
        .await?
        .ok_or_else(|| CoreError::not_found("User", user_id))?;

    Ok(Json(profile))
}

/// PATCH /api/user/profile
///
/// Replace the caller's profile picture and description.
pub async fn update_profile(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Json(input): Json<UpdateProfileRequest>,
) -> AppResult<Json<ProfileUpdatedResponse>> {
    input.validate()?;

    let update = UpdateProfile {
        profile_picture: input.profile_picture.unwrap_or_default(),
        description: normalize_description(input.description.as_deref())?,
    };

    let updated = UserRepo::update_profile(&state.pool, &user.id, &update)
        .await?
        .ok_or_else(|| CoreError::not_found("User", &user.id))?;

    tracing::info!(user_id = %updated.id, "Profile updated");

    Ok(Json(ProfileUpdatedResponse {
        message: "Profile updated",
        profile_picture: updated.profile_picture,
    }))
}

/// POST /api/user/exist-check
///
/// Make sure the caller has a `users` row, reporting whether it had to be
/// created.
pub async fn exist_check(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<ExistCheckResponse>> {
    if UserRepo::exists(&state.pool, &auth.user_id).await? {
        return Ok(Json(ExistCheckResponse {
            message: "User already exists",
            user: None,
        }));
    }

    let user = UserRepo::ensure(&state.pool, &auth.user_id, &auth.preferred_username()).await?;

    Ok(Json(ExistCheckResponse {
        message: "User created",
        user: Some(user),
    }))
}
