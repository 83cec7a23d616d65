//! Profile picture upload rules and request signing.
//!
//! Images are stored by an external media service. Reverie validates the
//! upload, names it, and signs the upload parameters; the service returns a
//! public URL that is saved on the user's profile.

use sha2::{Digest, Sha256};

use crate::error::CoreError;

/// Maximum accepted upload size (5 MiB).
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Transformation applied to profile pictures by the media service.
pub const PROFILE_TRANSFORMATION: &str = "c_fill,h_400,w_400/q_auto/f_auto";

/// Validate an uploaded file's declared content type and size.
pub fn validate_image_upload(content_type: Option<&str>, size: usize) -> Result<(), CoreError> {
    let is_image = content_type.is_some_and(|ct| ct.starts_with("image/"));
    if !is_image {
        return Err(CoreError::Validation("Invalid file type".into()));
    }
    if size == 0 {
        return Err(CoreError::Validation("No file uploaded".into()));
    }
    if size > MAX_UPLOAD_BYTES {
        return Err(CoreError::Validation("File too large".into()));
    }
    Ok(())
}

/// Public id for a profile picture: `profile_<userId>_<unix millis>`.
pub fn profile_public_id(user_id: &str, timestamp_ms: i64) -> String {
    format!("profile_{user_id}_{timestamp_ms}")
}

/// Sign upload parameters for the media service.
///
/// Parameters are sorted by key, joined as `k=v` pairs with `&`, the secret
/// is appended, and the SHA-256 hex digest of the result is the signature.
/// Empty values are excluded from the signature.
pub fn sign_params(params: &[(&str, String)], api_secret: &str) -> String {
    let mut pairs: Vec<&(&str, String)> = params.iter().filter(|(_, v)| !v.is_empty()).collect();
    pairs.sort_by(|a, b| a.0.cmp(b.0));

    let to_sign = pairs
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    let mut hasher = Sha256::new();
    hasher.update(to_sign.as_bytes());
    hasher.update(api_secret.as_bytes());
    format!("{:x}", hasher.finalize())
}
