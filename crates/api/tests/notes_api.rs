//! HTTP-level integration tests for notes, the public feed, and favorites.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_note, delete_auth, delete_json_auth, get, get_auth, post_json,
    post_json_auth, sign_up,
};
use serde_json::json;
use sqlx::PgPool;

/// Titles of a notes array response, in order.
fn titles(notes: &serde_json::Value) -> Vec<String> {
    notes
        .as_array()
        .expect("notes must be an array")
        .iter()
        .map(|n| n["title"].as_str().unwrap().to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_note_returns_full_note(pool: PgPool) {
    let app = common::build_test_app(pool);
    let alice = sign_up(&app, "user_alice", "alice").await;

    let tags = ["Flight", "lucid", "flight"];
    let note = create_note(&app, &alice, "Flying again", &tags, false).await;

    assert!(note["id"].is_number());
    assert_eq!(note["title"], "Flying again");
    assert_eq!(note["isPrivate"], false);
    assert_eq!(note["userId"], "user_alice");
    assert_eq!(note["user"]["username"], "alice");
    assert!(note["createdAt"].is_string());

    let tags: Vec<&str> = note["tags"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(tags, vec!["flight", "lucid"]);
}

/// The first write provisions the caller without an explicit sign-up.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_note_provisions_caller(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = common::token_for("user_newcomer", "newcomer");

    let note = create_note(&app, &token, "First dream", &[], false).await;

    assert_eq!(note["user"]["username"], "newcomer");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_note_validation(pool: PgPool) {
    let app = common::build_test_app(pool);
    let alice = sign_up(&app, "user_alice", "alice").await;

    let blank_title = json!({ "title": "   ", "content": "x" });
    let response = post_json_auth(app.clone(), "/api/notes", blank_title, &alice).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let missing_content = json!({ "title": "Falling" });
    let response = post_json_auth(app.clone(), "/api/notes", missing_content, &alice).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "content is required");

    let too_many_tags: Vec<String> = (0..21).map(|i| format!("tag{i}")).collect();
    let body = json!({ "title": "Tagged", "content": "x", "tags": too_many_tags });
    let response = post_json_auth(app, "/api/notes", body, &alice).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_note_requires_auth(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(app, "/api/notes", json!({ "title": "t", "content": "c" })).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Visibility
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_private_notes_only_visible_to_owner(pool: PgPool) {
    let app = common::build_test_app(pool);
    let alice = sign_up(&app, "user_alice", "alice").await;
    let bob = sign_up(&app, "user_bob", "bob").await;

    create_note(&app, &alice, "Public dream", &[], false).await;
    let secret = create_note(&app, &alice, "Secret dream", &[], true).await;

    let uri = "/api/notes?userId=user_alice";

    let owner_view = body_json(get_auth(app.clone(), uri, &alice).await).await;
    assert_eq!(titles(&owner_view), vec!["Secret dream", "Public dream"]);

    let friend_view = body_json(get_auth(app.clone(), uri, &bob).await).await;
    assert_eq!(titles(&friend_view), vec!["Public dream"]);

    let anonymous_view = body_json(get(app.clone(), uri).await).await;
    assert_eq!(titles(&anonymous_view), vec!["Public dream"]);

    let secret_uri = format!("/api/notes/{}", secret["id"]);
    let response = get_auth(app.clone(), &secret_uri, &bob).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let response = get_auth(app, &secret_uri, &alice).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_notes_without_user_id_is_401(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/api/notes").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Malformed input
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_wrong_typed_tags_is_json_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let alice = sign_up(&app, "user_alice", "alice").await;

    let body = json!({ "title": "Falling", "content": "x", "tags": "flight" });
    let response = post_json_auth(app, "/api/notes", body, &alice).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
    assert!(json["error"].as_str().unwrap().contains("tags"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_wrong_typed_note_id_is_json_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let alice = sign_up(&app, "user_alice", "alice").await;

    let response =
        post_json_auth(app, "/api/favorites", json!({ "noteId": "12" }), &alice).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
    assert!(json["error"].as_str().unwrap().contains("noteId"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_non_numeric_note_id_is_json_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let alice = sign_up(&app, "user_alice", "alice").await;

    let response = get(app.clone(), "/api/notes/dream").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");

    let response = delete_auth(app, "/api/notes/dream", &alice).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

// ---------------------------------------------------------------------------
// Feed + search scenario
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_flying_again_in_feed_and_tag_search(pool: PgPool) {
    let app = common::build_test_app(pool);
    let alice = sign_up(&app, "user_alice", "alice").await;
    let bob = sign_up(&app, "user_bob", "bob").await;

    let public = create_note(&app, &alice, "Flying again", &["flight", "lucid"], false).await;
    create_note(&app, &bob, "Flying again", &["flight"], true).await;

    let feed = body_json(get(app.clone(), "/api/feed").await).await;
    let feed_ids: Vec<&serde_json::Value> =
        feed.as_array().unwrap().iter().map(|n| &n["id"]).collect();
    assert_eq!(feed_ids, vec![&public["id"]]);

    let json = body_json(get(app.clone(), "/api/search?type=notes&tags=FLIGHT").await).await;
    let notes = json["notes"].as_array().unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0]["id"], public["id"]);
    assert!(json.get("users").is_none());

    // Even the private note's owner does not get it from search.
    let json = body_json(get_auth(app, "/api/search?type=notes&tags=flight", &bob).await).await;
    assert_eq!(json["notes"].as_array().unwrap().len(), 1);
    assert_eq!(json["notes"][0]["userId"], "user_alice");
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_note_owner_only(pool: PgPool) {
    let app = common::build_test_app(pool);
    let alice = sign_up(&app, "user_alice", "alice").await;
    let bob = sign_up(&app, "user_bob", "bob").await;

    let note = create_note(&app, &alice, "Falling", &["falling"], false).await;
    let uri = format!("/api/notes/{}", note["id"]);

    let response = delete_auth(app.clone(), &uri, &bob).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = delete_auth(app.clone(), &uri, &alice).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = delete_auth(app.clone(), &uri, &alice).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let feed = body_json(get(app, "/api/feed").await).await;
    assert!(feed.as_array().unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Favorites
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_favorites_are_idempotent(pool: PgPool) {
    let app = common::build_test_app(pool);
    let alice = sign_up(&app, "user_alice", "alice").await;
    let bob = sign_up(&app, "user_bob", "bob").await;

    let note = create_note(&app, &alice, "Teeth falling out", &[], false).await;
    let body = json!({ "noteId": note["id"] });

    let first =
        body_json(post_json_auth(app.clone(), "/api/favorites", body.clone(), &bob).await).await;
    let second =
        body_json(post_json_auth(app.clone(), "/api/favorites", body.clone(), &bob).await).await;
    assert_eq!(titles(&first), vec!["Teeth falling out"]);
    assert_eq!(first, second);

    let listed = body_json(get_auth(app.clone(), "/api/favorites", &bob).await).await;
    assert_eq!(listed, first);

    let response = delete_json_auth(app.clone(), "/api/favorites", body.clone(), &bob).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_json(response).await.as_array().unwrap().is_empty());

    // Removing again is a no-op.
    let response = delete_json_auth(app, "/api/favorites", body, &bob).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_json(response).await.as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_favorites_errors(pool: PgPool) {
    let app = common::build_test_app(pool);
    let bob = sign_up(&app, "user_bob", "bob").await;

    let response = post_json_auth(app.clone(), "/api/favorites", json!({}), &bob).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response =
        post_json_auth(app.clone(), "/api/favorites", json!({ "noteId": 999_999 }), &bob).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get(app, "/api/favorites").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_favorites_of_unknown_user_is_empty(pool: PgPool) {
    let app = common::build_test_app(pool);
    let bob = sign_up(&app, "user_bob", "bob").await;

    let response = get_auth(app, "/api/favorites?userId=user_ghost", &bob).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_cannot_favorite_someone_elses_private_note(pool: PgPool) {
    let app = common::build_test_app(pool);
    let alice = sign_up(&app, "user_alice", "alice").await;
    let bob = sign_up(&app, "user_bob", "bob").await;

    let note = create_note(&app, &alice, "Diary", &[], true).await;

    let response =
        post_json_auth(app, "/api/favorites", json!({ "noteId": note["id"] }), &bob).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
