pub mod favorites;
pub mod feed;
pub mod friend_requests;
pub mod friends;
pub mod notes;
pub mod search;
pub mod upload;
pub mod users;
