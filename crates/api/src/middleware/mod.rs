//! Identity extractors for Axum handlers.
//!
//! - [`auth::AuthUser`] -- Requires a valid provider token.
//! - [`auth::MaybeAuthUser`] -- Accepts anonymous callers, rejects bad tokens.
//! - [`auth::CurrentUser`] -- Requires a token and provisions the user row.

pub mod auth;
