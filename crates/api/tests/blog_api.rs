//! HTTP-level integration tests for the blog endpoints.
//!
//! Covers publication visibility, slug derivation, view counting, comments,
//! and the editor-only write surface.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, delete_auth, get, get_auth, post_json_auth, register_user,
    register_with_role,
};
use sqlx::PgPool;

/// Create an editor and return their access token.
async fn editor_token(pool: &PgPool, username: &str) -> String {
    let app = build_test_app(pool.clone());
    let json = register_with_role(app, pool, username, "password123", "editor").await;
    json["access_token"].as_str().unwrap().to_string()
}

/// Create a post through the API and return its slug.
async fn create_post(pool: &PgPool, token: &str, title: &str, status: &str) -> String {
    let app = build_test_app(pool.clone());
    let body = serde_json::json!({
        "title": title,
        "content": "Some *markdown* content.",
        "status": status,
    });
    let response = post_json_auth(app, "/api/v1/blogs", body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["slug"]
        .as_str()
        .unwrap()
        .to_string()
}

// ---------------------------------------------------------------------------
// Creation and slugs
// ---------------------------------------------------------------------------

/// The slug is derived from the title: lowercased, punctuation stripped.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_slug_derived_from_title(pool: PgPool) {
    let token = editor_token(&pool, "slugger").await;
    let slug = create_post(&pool, &token, "Hello World!!", "published").await;
    assert_eq!(slug, "hello-world");
}

/// Two posts with the same title collide on the unique slug and fail with 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_duplicate_title_rejected(pool: PgPool) {
    let token = editor_token(&pool, "dupeposter").await;
    create_post(&pool, &token, "Same Title", "draft").await;

    let app = build_test_app(pool);
    let body = serde_json::json!({ "title": "Same Title", "content": "again", "status": "draft" });
    let response = post_json_auth(app, "/api/v1/blogs", body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Plain users cannot create posts.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_requires_editor(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let json = register_user(app, "plainblogger", "password123").await;
    let token = json["access_token"].as_str().unwrap();

    let app = build_test_app(pool);
    let body = serde_json::json!({ "title": "Nope", "content": "nope" });
    let response = post_json_auth(app, "/api/v1/blogs", body, token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

/// An out-of-set status is rejected with a field error.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_invalid_status_rejected(pool: PgPool) {
    let token = editor_token(&pool, "statusposter").await;

    let app = build_test_app(pool);
    let body = serde_json::json!({ "title": "T", "content": "c", "status": "live" });
    let response = post_json_auth(app, "/api/v1/blogs", body, &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["fields"]["status"].is_array());
}

// ---------------------------------------------------------------------------
// Publication visibility
// ---------------------------------------------------------------------------

/// Drafts are invisible to anonymous readers (404, not 403) but visible to
/// their author.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_draft_hidden_from_public(pool: PgPool) {
    let token = editor_token(&pool, "draftauthor").await;
    let slug = create_post(&pool, &token, "Secret Draft", "draft").await;

    let app = build_test_app(pool.clone());
    let response = get(app, &format!("/api/v1/blogs/{slug}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let app = build_test_app(pool);
    let response = get_auth(app, &format!("/api/v1/blogs/{slug}"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
}

/// The public listing contains published posts only.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_listing_excludes_drafts(pool: PgPool) {
    let token = editor_token(&pool, "listauthor").await;
    create_post(&pool, &token, "Published One", "published").await;
    create_post(&pool, &token, "Hidden Draft", "draft").await;

    let app = build_test_app(pool);
    let response = get(app, "/api/v1/blogs").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let posts = json["data"].as_array().unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0]["slug"], "published-one");
    // List entries carry the excerpt, never the full content.
    assert!(posts[0].get("content").is_none());
}

/// Reading a published post bumps the view counter; the detail carries the
/// rendered HTML projection.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_views_increment_and_html(pool: PgPool) {
    let token = editor_token(&pool, "viewauthor").await;
    let slug = create_post(&pool, &token, "Counted Post", "published").await;

    let app = build_test_app(pool.clone());
    let response = get(app, &format!("/api/v1/blogs/{slug}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(
        json["data"]["content_html"].as_str().unwrap().contains("<em>markdown</em>"),
        "markdown should render to HTML: {json}"
    );

    let app = build_test_app(pool);
    let response = get(app, &format!("/api/v1/blogs/{slug}")).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["views_count"], 1, "second read sees the first bump");
}

// ---------------------------------------------------------------------------
// Ownership
// ---------------------------------------------------------------------------

/// A different non-editor user cannot delete someone else's post.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_requires_author_or_editor(pool: PgPool) {
    let token = editor_token(&pool, "owner").await;
    let slug = create_post(&pool, &token, "Owned Post", "published").await;

    let app = build_test_app(pool.clone());
    let json = register_user(app, "intruder", "password123").await;
    let intruder_token = json["access_token"].as_str().unwrap().to_string();

    let app = build_test_app(pool.clone());
    let response = delete_auth(app, &format!("/api/v1/blogs/{slug}"), &intruder_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let app = build_test_app(pool);
    let response = delete_auth(app, &format!("/api/v1/blogs/{slug}"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

// ---------------------------------------------------------------------------
// Comments
// ---------------------------------------------------------------------------

/// Comments require authentication and a published post.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_comments(pool: PgPool) {
    let token = editor_token(&pool, "commentauthor").await;
    let published = create_post(&pool, &token, "Commentable", "published").await;
    let draft = create_post(&pool, &token, "Uncommentable", "draft").await;

    // Anonymous comment is rejected.
    let app = build_test_app(pool.clone());
    let request = axum::http::Request::builder()
        .method("POST")
        .uri(format!("/api/v1/blogs/{published}/comments"))
        .header("content-type", "application/json")
        .body(axum::body::Body::from(r#"{"content":"hi"}"#))
        .unwrap();
    let response = tower::ServiceExt::oneshot(app, request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Authenticated comment on a published post succeeds.
    let app = build_test_app(pool.clone());
    let body = serde_json::json!({ "content": "Great post" });
    let response =
        post_json_auth(app, &format!("/api/v1/blogs/{published}/comments"), body, &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    // Commenting on a draft 404s even for the author.
    let app = build_test_app(pool);
    let body = serde_json::json!({ "content": "sneaky" });
    let response =
        post_json_auth(app, &format!("/api/v1/blogs/{draft}/comments"), body, &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

/// Categories list publicly and are created by editors with derived slugs.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_categories(pool: PgPool) {
    let token = editor_token(&pool, "catauthor").await;

    let app = build_test_app(pool.clone());
    let body = serde_json::json!({ "name": "Engineering Notes" });
    let response = post_json_auth(app, "/api/v1/blogs/categories", body, &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["slug"], "engineering-notes");

    let app = build_test_app(pool);
    let response = get(app, "/api/v1/blogs/categories").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
}
