#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use reverie_api::auth::jwt::{issue_token, AuthConfig};
use reverie_api::config::ServerConfig;
use reverie_api::media::{ImageUpload, MediaConfig, MediaError, MediaStore, StoredMedia};
use reverie_api::router::build_app_router;
use reverie_api::state::AppState;

/// Secret shared by the test config and [`token_for`].
const TEST_JWT_SECRET: &str = "test-secret-that-is-long-enough-for-hmac";

/// Multipart boundary used by [`upload`].
const BOUNDARY: &str = "reverie-test-boundary";

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        auth: AuthConfig {
            secret: TEST_JWT_SECRET.to_string(),
            issuer: None,
        },
        media: MediaConfig::default(),
    }
}

/// In-memory media store that records every upload.
#[derive(Default)]
pub struct FakeMediaStore {
    pub uploads: Mutex<Vec<ImageUpload>>,
}

#[async_trait]
impl MediaStore for FakeMediaStore {
    async fn upload_image(&self, upload: ImageUpload) -> Result<StoredMedia, MediaError> {
        let stored = StoredMedia {
            url: format!("https://media.test/{}.png", upload.public_id),
            public_id: upload.public_id.clone(),
        };
        self.uploads.lock().unwrap().push(upload);
        Ok(stored)
    }
}

/// Build the full application router (same middleware stack as production)
/// backed by the given pool and an in-memory media store.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_media(pool, Arc::new(FakeMediaStore::default()))
}

/// Like [`build_test_app`] but with a caller-supplied media store.
pub fn build_test_app_with_media(pool: PgPool, media: Arc<dyn MediaStore>) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        media,
    };
    build_app_router(state, &config)
}

/// Mint a bearer token for `user_id` the way the identity provider would.
pub fn token_for(user_id: &str, username: &str) -> String {
    issue_token(&test_config().auth, user_id, Some(username), None, 3600)
        .expect("token generation should succeed")
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Send a request with an optional bearer token and optional JSON body.
pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn patch_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(app, Method::PATCH, uri, Some(token), Some(body)).await
}

pub async fn delete_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(app, Method::DELETE, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// POST a single-part multipart form to `/api/upload`.
pub async fn upload(
    app: Router,
    token: &str,
    field_name: &str,
    content_type: &str,
    bytes: &[u8],
) -> Response {
    let mut body = Vec::with_capacity(bytes.len() + 256);
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"{field_name}\"; filename=\"me.png\"\r\n\
             Content-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/upload")
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Provision a user through `POST /api/user/exist-check` and return a token.
pub async fn sign_up(app: &Router, user_id: &str, username: &str) -> String {
    let token = token_for(user_id, username);
    let response = post_json_auth(
        app.clone(),
        "/api/user/exist-check",
        serde_json::json!({}),
        &token,
    )
    .await;
    assert!(response.status().is_success());
    token
}

/// Create a note through the API and return its JSON.
pub async fn create_note(
    app: &Router,
    token: &str,
    title: &str,
    tags: &[&str],
    is_private: bool,
) -> serde_json::Value {
    let body = serde_json::json!({
        "title": title,
        "content": format!("{title}: I dreamed it again."),
        "tags": tags,
        "isPrivate": is_private,
    });
    let response = post_json_auth(app.clone(), "/api/notes", body, token).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await
}
