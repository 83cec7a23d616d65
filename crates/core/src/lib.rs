//! Domain rules for Reverie that need no I/O.
//!
//! Everything here is plain data and pure functions so the repository and
//! HTTP layers can share one definition of the friend-request state machine,
//! the note visibility rule, and the input normalization applied at the
//! boundary.

pub mod error;
pub mod friendship;
pub mod identity;
pub mod media;
pub mod notes;
pub mod search;
pub mod types;
