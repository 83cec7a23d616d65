//! Journal entry rules: input normalization and visibility.
//!
//! Tags are shared across notes and deduplicated by name, so every tag name
//! is normalized (trimmed, lowercased) before it reaches the store. That keeps
//! tag search case-insensitive without relying on collation tricks.

use crate::error::CoreError;

/// Maximum title length in characters.
pub const MAX_TITLE_LEN: usize = 200;

/// Maximum number of distinct tags on a single note.
pub const MAX_TAGS_PER_NOTE: usize = 20;

/// Maximum tag name length in characters, after normalization.
pub const MAX_TAG_LEN: usize = 40;

// ---------------------------------------------------------------------------
// Tags
// ---------------------------------------------------------------------------

/// Normalize a tag name: trim whitespace and lowercase.
pub fn normalize_tag_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Normalize a list of tag names for storage.
///
/// Blank names are dropped and duplicates collapse onto their first
/// occurrence, preserving input order.
pub fn normalize_tags(raw: &[String]) -> Result<Vec<String>, CoreError> {
    let mut tags: Vec<String> = Vec::with_capacity(raw.len());

    for name in raw.iter().map(|t| normalize_tag_name(t)) {
        if name.is_empty() || tags.contains(&name) {
            continue;
        }
        if name.chars().count() > MAX_TAG_LEN {
            return Err(CoreError::Validation(format!(
                "Tag '{name}' exceeds {MAX_TAG_LEN} characters"
            )));
        }
        tags.push(name);
    }

    if tags.len() > MAX_TAGS_PER_NOTE {
        return Err(CoreError::Validation(format!(
            "A note may have at most {MAX_TAGS_PER_NOTE} tags"
        )));
    }

    Ok(tags)
}

// ---------------------------------------------------------------------------
// Note content
// ---------------------------------------------------------------------------

/// Validate title and body of a new note, returning the trimmed title.
pub fn validate_note_input(title: &str, content: &str) -> Result<String, CoreError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(CoreError::Validation("title must not be empty".into()));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(CoreError::Validation(format!(
            "title must be at most {MAX_TITLE_LEN} characters"
        )));
    }
    if content.trim().is_empty() {
        return Err(CoreError::Validation("content must not be empty".into()));
    }
    Ok(title.to_string())
}

// ---------------------------------------------------------------------------
// Visibility
// ---------------------------------------------------------------------------

/// Whether a note is visible to `viewer`.
///
/// Public notes are visible to everyone, including anonymous viewers. A
/// private note is visible only to its owner.
pub fn is_visible_to(is_private: bool, owner_id: &str, viewer: Option<&str>) -> bool {
    !is_private || viewer == Some(owner_id)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
