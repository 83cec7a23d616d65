//! Display-name derivation for lazily provisioned users.
//!
//! The identity provider owns authentication; Reverie only mirrors a user row
//! the first time a caller writes something. The display name is taken from
//! the provider's claims when available and otherwise generated from the
//! opaque user id.

use crate::error::CoreError;

/// Number of id characters kept in a generated fallback username.
const FALLBACK_ID_PREFIX_LEN: usize = 8;

/// Numbered variants of the full-id fallback tried after it is taken.
const FALLBACK_SUFFIX_ATTEMPTS: u32 = 5;

/// Maximum length of a username accepted from the identity provider.
pub const MAX_USERNAME_LEN: usize = 64;

/// Maximum length of a profile description.
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// Generated username for a user whose provider profile has no usable name.
///
/// ```
/// use reverie_core::identity::fallback_username;
/// assert_eq!(fallback_username("user_2abcDEFghi"), "user-user_2ab");
/// assert_eq!(fallback_username("abc"), "user-abc");
/// ```
pub fn fallback_username(user_id: &str) -> String {
    let prefix: String = user_id.chars().take(FALLBACK_ID_PREFIX_LEN).collect();
    format!("user-{prefix}")
}

/// Fallback names to try, in order, when the preferred name is taken.
///
/// Starts with [`fallback_username`], widens to the full id, then numbers
/// the full-id form. Provider ids are unique, so only a user who picked one
/// of these names explicitly can exhaust the list.
///
/// ```
/// use reverie_core::identity::fallback_usernames;
/// let names = fallback_usernames("user_2abcDEF");
/// assert_eq!(names[0], "user-user_2ab");
/// assert_eq!(names[1], "user-user_2abcDEF");
/// assert_eq!(names[2], "user-user_2abcDEF-2");
/// ```
pub fn fallback_usernames(user_id: &str) -> Vec<String> {
    let full = format!("user-{user_id}");
    let mut names = vec![fallback_username(user_id)];
    if names[0] != full {
        names.push(full.clone());
    }
    names.extend((2..=FALLBACK_SUFFIX_ATTEMPTS + 1).map(|n| format!("{full}-{n}")));
    names
}

/// Pick the display name for a new user row.
///
/// Preference order: provider username, local part of the provider email,
/// then [`fallback_username`]. Blank or over-long candidates are skipped.
pub fn preferred_username(user_id: &str, username: Option<&str>, email: Option<&str>) -> String {
    let from_email = email.and_then(|e| e.split('@').next());

    [username, from_email]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|name| !name.is_empty() && name.chars().count() <= MAX_USERNAME_LEN)
        .map(str::to_string)
        .unwrap_or_else(|| fallback_username(user_id))
}

/// Trim a profile description, mapping blank input to `None`.
pub fn normalize_description(description: Option<&str>) -> Result<Option<String>, CoreError> {
    let Some(text) = description.map(str::trim).filter(|t| !t.is_empty()) else {
        return Ok(None);
    };
    if text.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(CoreError::Validation(format!(
            "description must be at most {MAX_DESCRIPTION_LEN} characters"
        )));
    }
    Ok(Some(text.to_string()))
}
