//! JWT-based identity extractors for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use reverie_core::error::CoreError;
use reverie_core::identity::preferred_username;
use reverie_core::types::UserId;
use reverie_db::models::user::User;
use reverie_db::repositories::UserRepo;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated caller extracted from a Bearer token in the `Authorization` header.
///
/// Use this as an extractor parameter in any handler that requires a caller
/// identity but does not need the caller's `users` row:
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = %user.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The provider's opaque user id (from `claims.sub`).
    pub user_id: UserId,
    /// Display name hint from the provider.
    pub username: Option<String>,
    /// Email hint from the provider.
    pub email: Option<String>,
}

impl AuthUser {
    /// Display name to use when this caller's row is first created.
    pub fn preferred_username(&self) -> String {
        preferred_username(&self.user_id, self.username.as_deref(), self.email.as_deref())
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        authenticate(auth_header, state)
    }
}

/// Optional caller identity.
///
/// A request without an `Authorization` header is anonymous (`None`). A
/// header that is present but malformed or carries an invalid token is
/// still rejected with 401.
#[derive(Debug, Clone)]
pub struct MaybeAuthUser(pub Option<AuthUser>);

impl MaybeAuthUser {
    /// The caller's id, if authenticated.
    pub fn user_id(&self) -> Option<&str> {
        self.0.as_ref().map(|u| u.user_id.as_str())
    }
}

impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
        {
            None => Ok(MaybeAuthUser(None)),
            Some(header) => authenticate(header, state).map(|u| MaybeAuthUser(Some(u))),
        }
    }
}

/// Authenticated caller whose `users` row is guaranteed to exist.
///
/// Runs [`UserRepo::ensure`] once per request, so handlers that write rows
/// referencing the caller never need to bootstrap the user themselves.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth = AuthUser::from_request_parts(parts, state).await?;
        let user = UserRepo::ensure(&state.pool, &auth.user_id, &auth.preferred_username()).await?;
        Ok(CurrentUser(user))
    }
}

/// Verify a raw `Authorization` header value.
fn authenticate(auth_header: &str, state: &AppState) -> Result<AuthUser, AppError> {
    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        AppError::Core(CoreError::Unauthorized(
            "Invalid Authorization format. Expected: Bearer <token>".into(),
        ))
    })?;

    let claims = validate_token(token, &state.config.auth).map_err(|e| {
        tracing::debug!(error = %e, "Rejected bearer token");
        AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
    })?;

    Ok(AuthUser {
        user_id: claims.sub,
        username: claims.username,
        email: claims.email,
    })
}
