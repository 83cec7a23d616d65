/// Note, tag and friend-request primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// Users are keyed by the opaque identifier issued by the identity provider.
pub type UserId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
