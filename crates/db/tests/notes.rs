use reverie_db::models::note::CreateNote;
use reverie_db::repositories::{FavoriteRepo, NoteRepo, SearchRepo, UserRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn note(title: &str, tags: &[&str], is_private: bool) -> CreateNote {
    CreateNote {
        title: title.to_string(),
        content: format!("{title} dream log"),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        is_private,
    }
}

async fn seed_users(pool: &PgPool) {
    UserRepo::ensure(pool, "alice", "alice").await.unwrap();
    UserRepo::ensure(pool, "bob", "bob").await.unwrap();
}

// ---------------------------------------------------------------------------
// Notes
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_attaches_tags_and_reuses_existing(pool: PgPool) {
    seed_users(&pool).await;

    let first = NoteRepo::create(&pool, "alice", &note("Flying", &["lucid", "flight"], false))
        .await
        .unwrap();
    let second = NoteRepo::create(&pool, "bob", &note("Falling", &["flight"], false))
        .await
        .unwrap();

    let names: Vec<&str> = first.tags.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["flight", "lucid"]);
    assert_eq!(first.user.username, "alice");

    // The "flight" tag row is shared.
    assert_eq!(second.tags[0].id, first.tags[0].id);
    let flight_rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tags WHERE name = 'flight'")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(flight_rows, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_for_owner_respects_visibility(pool: PgPool) {
    seed_users(&pool).await;
    NoteRepo::create(&pool, "alice", &note("Public", &[], false)).await.unwrap();
    NoteRepo::create(&pool, "alice", &note("Private", &[], true)).await.unwrap();

    let own = NoteRepo::list_for_owner(&pool, "alice", Some("alice")).await.unwrap();
    let other = NoteRepo::list_for_owner(&pool, "alice", Some("bob")).await.unwrap();
    let anonymous = NoteRepo::list_for_owner(&pool, "alice", None).await.unwrap();

    assert_eq!(own.len(), 2);
    assert_eq!(own[0].title, "Private");
    assert_eq!(other.len(), 1);
    assert_eq!(other[0].title, "Public");
    assert_eq!(anonymous.len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_public_feed_excludes_private_notes(pool: PgPool) {
    seed_users(&pool).await;
    NoteRepo::create(&pool, "alice", &note("A", &[], false)).await.unwrap();
    NoteRepo::create(&pool, "bob", &note("B", &[], true)).await.unwrap();
    NoteRepo::create(&pool, "bob", &note("C", &[], false)).await.unwrap();

    let feed = NoteRepo::list_public_feed(&pool).await.unwrap();

    let titles: Vec<&str> = feed.iter().map(|n| n.title.as_str()).collect();
    assert_eq!(titles, vec!["C", "A"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_cascades_to_favorites(pool: PgPool) {
    seed_users(&pool).await;
    let created = NoteRepo::create(&pool, "alice", &note("Gone", &["x"], false))
        .await
        .unwrap();
    FavoriteRepo::add(&pool, "bob", created.id).await.unwrap();

    assert!(NoteRepo::delete(&pool, created.id).await.unwrap());
    assert!(!NoteRepo::delete(&pool, created.id).await.unwrap());
    assert!(!NoteRepo::exists(&pool, created.id).await.unwrap());
    assert!(FavoriteRepo::list_for_user(&pool, "bob").await.unwrap().is_empty());
    assert!(NoteRepo::find_owner(&pool, created.id).await.unwrap().is_none());
}

// ---------------------------------------------------------------------------
// Favorites
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_favorite_add_and_remove_are_idempotent(pool: PgPool) {
    seed_users(&pool).await;
    let created = NoteRepo::create(&pool, "alice", &note("Fav", &[], false))
        .await
        .unwrap();

    assert!(FavoriteRepo::add(&pool, "bob", created.id).await.unwrap());
    assert!(!FavoriteRepo::add(&pool, "bob", created.id).await.unwrap());
    assert_eq!(FavoriteRepo::list_for_user(&pool, "bob").await.unwrap().len(), 1);

    assert!(FavoriteRepo::remove(&pool, "bob", created.id).await.unwrap());
    assert!(!FavoriteRepo::remove(&pool, "bob", created.id).await.unwrap());
    assert!(FavoriteRepo::list_for_user(&pool, "bob").await.unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_tag_search_is_public_only(pool: PgPool) {
    seed_users(&pool).await;
    let flying = note("Flying again", &["flight", "lucid"], false);
    let public = NoteRepo::create(&pool, "alice", &flying).await.unwrap();
    NoteRepo::create(&pool, "bob", &note("Flying again", &["flight"], true))
        .await
        .unwrap();

    let hits = SearchRepo::notes_by_tags(&pool, &["FLIGHT".to_string()], 50).await.unwrap();

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, public.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_text_search_matches_title_or_content(pool: PgPool) {
    seed_users(&pool).await;
    NoteRepo::create(&pool, "alice", &note("Ocean", &[], false)).await.unwrap();
    let by_content = CreateNote {
        content: "waves of the OCEAN".to_string(),
        ..note("Beach", &[], false)
    };
    NoteRepo::create(&pool, "alice", &by_content).await.unwrap();
    NoteRepo::create(&pool, "alice", &note("Forest", &[], false)).await.unwrap();

    let hits = SearchRepo::notes_by_text(&pool, "ocean", 50).await.unwrap();
    let titles: Vec<&str> = hits.iter().map(|n| n.title.as_str()).collect();
    assert_eq!(titles, vec!["Beach", "Ocean"]);

    let capped = SearchRepo::notes_by_text(&pool, "ocean", 1).await.unwrap();
    assert_eq!(capped.len(), 1);
}
