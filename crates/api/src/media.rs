//! External media storage for profile pictures.
//!
//! Handlers talk to the [`MediaStore`] trait held in [`AppState`]; the
//! production binary installs [`HttpMediaStore`], which performs a signed
//! multipart upload against a Cloudinary-compatible endpoint. Tests swap in
//! an in-memory implementation.
//!
//! [`AppState`]: crate::state::AppState

use std::time::Duration;

use async_trait::async_trait;
use reverie_core::media::{sign_params, PROFILE_TRANSFORMATION};
use serde::Deserialize;

/// HTTP request timeout for a single upload.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Default folder for profile pictures.
const DEFAULT_FOLDER: &str = "reverie/profile-pictures";

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for media upload failures.
#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    /// Credentials for the media service are missing.
    #[error("Media storage is not configured")]
    NotConfigured,

    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The media service returned a non-2xx status code.
    #[error("Media service returned HTTP {0}")]
    HttpStatus(u16),

    /// The media service answered with a body we could not interpret.
    #[error("Invalid media service response: {0}")]
    InvalidResponse(String),
}

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// An image ready to be handed to the media service.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub content_type: String,
    /// Identifier the stored asset should get, e.g. `profile_<uid>_<ms>`.
    pub public_id: String,
}

/// Where the media service put an uploaded image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredMedia {
    pub url: String,
    pub public_id: String,
}

/// Storage backend for uploaded images.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Store an image and return its public location.
    async fn upload_image(&self, upload: ImageUpload) -> Result<StoredMedia, MediaError>;
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Credentials and target for the media service.
#[derive(Debug, Clone, Default)]
pub struct MediaConfig {
    /// Full upload endpoint.
    pub upload_url: Option<String>,
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
    /// Folder uploaded assets are placed in.
    pub folder: String,
}

impl MediaConfig {
    /// Load media settings from environment variables.
    ///
    /// | Env Var            | Default                                              |
    /// |--------------------|------------------------------------------------------|
    /// | `MEDIA_UPLOAD_URL` | built from `MEDIA_CLOUD_NAME` when that is set       |
    /// | `MEDIA_CLOUD_NAME` | --                                                   |
    /// | `MEDIA_API_KEY`    | --                                                   |
    /// | `MEDIA_API_SECRET` | --                                                   |
    /// | `MEDIA_FOLDER`     | `reverie/profile-pictures`                           |
    ///
    /// Missing credentials do not prevent startup; uploads fail with
    /// [`MediaError::NotConfigured`] instead.
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());

        let upload_url = var("MEDIA_UPLOAD_URL").or_else(|| {
            var("MEDIA_CLOUD_NAME")
                .map(|cloud| format!("https://api.cloudinary.com/v1_1/{cloud}/image/upload"))
        });

        Self {
            upload_url,
            api_key: var("MEDIA_API_KEY"),
            api_secret: var("MEDIA_API_SECRET"),
            folder: var("MEDIA_FOLDER").unwrap_or_else(|| DEFAULT_FOLDER.to_string()),
        }
    }

    /// Whether uploads can be attempted at all.
    pub fn is_configured(&self) -> bool {
        self.credentials().is_some()
    }

    /// `(upload_url, api_key, api_secret)` when all three are present.
    fn credentials(&self) -> Option<(&str, &str, &str)> {
        Some((
            self.upload_url.as_deref()?,
            self.api_key.as_deref()?,
            self.api_secret.as_deref()?,
        ))
    }
}

// ---------------------------------------------------------------------------
// HttpMediaStore
// ---------------------------------------------------------------------------

/// Success body of the upload endpoint (only the fields we use).
#[derive(Debug, Deserialize)]
struct UploadResult {
    secure_url: String,
    public_id: String,
}

/// Uploads images to the media service over HTTP.
pub struct HttpMediaStore {
    client: reqwest::Client,
    config: MediaConfig,
}

impl HttpMediaStore {
    /// Create a store with a pre-configured HTTP client.
    pub fn new(config: MediaConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self { client, config }
    }
}

#[async_trait]
impl MediaStore for HttpMediaStore {
    async fn upload_image(&self, upload: ImageUpload) -> Result<StoredMedia, MediaError> {
        let (url, api_key, api_secret) =
            self.config.credentials().ok_or(MediaError::NotConfigured)?;

        let timestamp = chrono::Utc::now().timestamp().to_string();
        let signed = [
            ("folder", self.config.folder.clone()),
            ("public_id", upload.public_id.clone()),
            ("timestamp", timestamp),
            ("transformation", PROFILE_TRANSFORMATION.to_string()),
        ];
        let signature = sign_params(&signed, api_secret);

        let file = reqwest::multipart::Part::bytes(upload.bytes)
            .file_name(upload.file_name)
            .mime_str(&upload.content_type)?;

        let mut form = reqwest::multipart::Form::new()
            .part("file", file)
            .text("api_key", api_key.to_string())
            .text("signature", signature)
            .text("signature_algorithm", "sha256");
        for (key, value) in signed {
            form = form.text(key, value);
        }

        let response = self.client.post(url).multipart(form).send().await?;
        if !response.status().is_success() {
            return Err(MediaError::HttpStatus(response.status().as_u16()));
        }

        let result: UploadResult = response
            .json()
            .await
            .map_err(|e| MediaError::InvalidResponse(e.to_string()))?;

        tracing::info!(public_id = %result.public_id, "Image uploaded to media service");

        Ok(StoredMedia {
            url: result.secure_url,
            public_id: result.public_id,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
