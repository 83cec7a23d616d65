//! Identity-provider token handling.
//!
//! - [`jwt`] -- validation of provider-issued HS256 tokens (and minting them
//!   for local development and tests).

pub mod jwt;
