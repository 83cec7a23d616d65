//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` struct matching the database row
//! - The camelCase `Serialize` projections returned by the API
//! - `Deserialize` input DTOs where the repository accepts structured input

pub mod friend_request;
pub mod note;
pub mod tag;
pub mod user;
