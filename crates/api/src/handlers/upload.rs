//! Handler for profile picture uploads.

use axum::extract::{Multipart, State};
use reverie_core::media::{profile_public_id, validate_image_upload};

use crate::error::{AppError, AppResult};
use crate::extract::Json;
use crate::media::ImageUpload;
use crate::middleware::auth::AuthUser;
use crate::response::UploadResponse;
use crate::state::AppState;

/// POST /api/upload
///
/// Accepts a multipart form with a required `file` field holding an image
/// of at most 5 MiB. The image is handed to the media service and its
/// public URL returned; saving it on the profile is a separate `PATCH`.
pub async fn upload_image(
    auth: AuthUser,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<UploadResponse>> {
    let mut file: Option<(String, Option<String>, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue; // ignore unknown fields
        }
        let file_name = field.file_name().unwrap_or("upload").to_string();
        let content_type = field.content_type().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        file = Some((file_name, content_type, data.to_vec()));
    }

    let (file_name, content_type, bytes) =
        file.ok_or_else(|| AppError::BadRequest("No file uploaded".into()))?;

    validate_image_upload(content_type.as_deref(), bytes.len())?;

    let public_id = profile_public_id(&auth.user_id, chrono::Utc::now().timestamp_millis());
    let size = bytes.len();

    let stored = state
        .media
        .upload_image(ImageUpload {
            bytes,
            file_name,
            content_type: content_type.unwrap_or_default(),
            public_id,
        })
        .await?;

    tracing::info!(
        user_id = %auth.user_id,
        public_id = %stored.public_id,
        size,
        "Profile picture uploaded",
    );

    Ok(Json(UploadResponse {
        url: stored.url,
        public_id: stored.public_id,
    }))
}
