//! Search planning: which lookups a request triggers and their caps.
//!
//! This module lives in `core` (zero internal deps) so the HTTP layer can
//! decide what to run before touching the database.

use std::str::FromStr;

use crate::error::CoreError;
use crate::notes::normalize_tag_name;

/// Maximum number of users returned by a username search.
pub const USER_RESULT_LIMIT: i64 = 20;

/// Maximum number of notes returned by a note search.
pub const NOTE_RESULT_LIMIT: i64 = 50;

// ---------------------------------------------------------------------------
// Mode
// ---------------------------------------------------------------------------

/// Which result sets a search request asks for (`?type=`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
    Users,
    Notes,
    #[default]
    Both,
}

impl FromStr for SearchMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "users" => Ok(Self::Users),
            "notes" => Ok(Self::Notes),
            "both" => Ok(Self::Both),
            other => Err(CoreError::Validation(format!(
                "Invalid search type '{other}'. Must be one of: users, notes, both"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Plan
// ---------------------------------------------------------------------------

/// The note lookup a search resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteLookup {
    /// Public notes carrying any of these (normalized) tag names.
    ByTags(Vec<String>),
    /// Public notes whose title or body contains this text.
    ByText(String),
}

/// The concrete lookups to run for one search request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchPlan {
    /// Username substring, when a user search should run.
    pub users: Option<String>,
    /// Note lookup, when a note search should run.
    pub notes: Option<NoteLookup>,
}

/// Split a comma-separated `tags` parameter into normalized tag names.
///
/// ```
/// use reverie_core::search::parse_tag_list;
/// assert_eq!(parse_tag_list(Some(" Flight, ,lucid")), vec!["flight", "lucid"]);
/// assert!(parse_tag_list(None).is_empty());
/// ```
pub fn parse_tag_list(raw: Option<&str>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(normalize_tag_name)
            .filter(|t| !t.is_empty())
            .collect()
    })
    .unwrap_or_default()
}

/// Build the lookups for a search request.
///
/// - `users` runs a username search when a non-blank query is present.
/// - `notes` prefers a tag lookup when tags are given, else a text lookup.
/// - `both` runs the user search and the text note search; tags are only
///   consulted in `notes` mode.
pub fn plan_search(query: Option<&str>, tags: &[String], mode: SearchMode) -> SearchPlan {
    let query = query.map(str::trim).filter(|q| !q.is_empty());

    let users = match mode {
        SearchMode::Users | SearchMode::Both => query.map(str::to_string),
        SearchMode::Notes => None,
    };

    let notes = match mode {
        SearchMode::Notes if !tags.is_empty() => Some(NoteLookup::ByTags(tags.to_vec())),
        SearchMode::Notes | SearchMode::Both => {
            query.map(|q| NoteLookup::ByText(q.to_string()))
        }
        SearchMode::Users => None,
    };

    SearchPlan { users, notes }
}

/// Build a `%substring%` ILIKE pattern, escaping the LIKE metacharacters in
/// user input so they match literally.
///
/// ```
/// use reverie_core::search::contains_pattern;
/// assert_eq!(contains_pattern("50%_off"), "%50\\%\\_off%");
/// ```
pub fn contains_pattern(input: &str) -> String {
    let mut pattern = String::with_capacity(input.len() + 2);
    pattern.push('%');
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
