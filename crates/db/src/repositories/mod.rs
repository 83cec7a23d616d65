//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod favorite_repo;
pub mod friend_request_repo;
pub mod note_repo;
pub mod search_repo;
pub mod tag_repo;
pub mod user_repo;

pub use favorite_repo::FavoriteRepo;
pub use friend_request_repo::FriendRequestRepo;
pub use note_repo::NoteRepo;
pub use search_repo::SearchRepo;
pub use tag_repo::TagRepo;
pub use user_repo::UserRepo;
