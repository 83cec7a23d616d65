//! Friend-request state machine.
//!
//! A request is a directed edge `from -> to` with one of three statuses.
//! Friendship is never stored separately: two users are friends exactly when
//! an `accepted` request exists between them in either direction.
//!
//! ```text
//!   none ──send──▶ pending ──accept──▶ accepted ──remove──▶ none
//!                    │  ▲
//!                 reject│ send (same sender)
//!                    ▼  │
//!                  rejected
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Lifecycle status of a single directed friend request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Accepted,
    Rejected,
}

impl RequestStatus {
    /// The value stored in `friend_requests.status`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "rejected" => Ok(Self::Rejected),
            other => Err(CoreError::Internal(format!(
                "Unknown friend request status '{other}'"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Transitions
// ---------------------------------------------------------------------------

/// What the store must do to honor a `send` from one user to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendDecision {
    /// No request exists in this direction; insert a new pending row.
    Create,
    /// The sender was previously rejected; flip the row back to pending and
    /// reset its `created_at`.
    Reactivate,
}

/// Decide how to handle `from` sending a friend request to `to`.
///
/// `forward` is the status of an existing `from -> to` row, `reverse` the
/// status of an existing `to -> from` row.
///
/// Rules, in order:
/// 1. A user cannot befriend themselves.
/// 2. An accepted row in either direction means they are already friends.
/// 3. A pending forward row is a duplicate.
/// 4. A pending reverse row must be answered rather than mirrored.
/// 5. A rejected forward row is revived.
/// 6. Otherwise a new row is created. A rejected reverse row does not block.
pub fn decide_send(
    from: &str,
    to: &str,
    forward: Option<RequestStatus>,
    reverse: Option<RequestStatus>,
) -> Result<SendDecision, CoreError> {
    if from == to {
        return Err(CoreError::Validation("You cannot add yourself".into()));
    }

    if forward == Some(RequestStatus::Accepted) || reverse == Some(RequestStatus::Accepted) {
        return Err(CoreError::Conflict("You are already friends".into()));
    }

    if forward == Some(RequestStatus::Pending) {
        return Err(CoreError::Conflict("Friend request already pending".into()));
    }

    if reverse == Some(RequestStatus::Pending) {
        return Err(CoreError::Conflict(
            "This user has already sent you a friend request; accept it instead".into(),
        ));
    }

    match forward {
        Some(RequestStatus::Rejected) => Ok(SendDecision::Reactivate),
        _ => Ok(SendDecision::Create),
    }
}

/// Advisory-lock key shared by both directions of a user pair.
///
/// Sends between the same two users serialize on this key, so two users
/// sending to each other at once cannot both end up pending.
///
/// ```
/// use reverie_core::friendship::pair_lock_key;
/// assert_eq!(pair_lock_key("alice", "bob"), pair_lock_key("bob", "alice"));
/// ```
pub fn pair_lock_key(a: &str, b: &str) -> String {
    let (low, high) = if a <= b { (a, b) } else { (b, a) };
    format!("friend-pair:{low}:{high}")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
