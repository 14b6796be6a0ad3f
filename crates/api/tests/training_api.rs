//! HTTP-level integration tests for the training endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, delete_auth, get, post_json_auth, register_with_role};
use sqlx::PgPool;

async fn editor_token(pool: &PgPool, username: &str) -> String {
    let app = build_test_app(pool.clone());
    let json = register_with_role(app, pool, username, "password123", "editor").await;
    json["access_token"].as_str().unwrap().to_string()
}

/// Create a course through the API and return its slug.
async fn create_course(pool: &PgPool, token: &str, body: serde_json::Value) -> String {
    let app = build_test_app(pool.clone());
    let response = post_json_auth(app, "/api/v1/training/courses", body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["slug"]
        .as_str()
        .unwrap()
        .to_string()
}

/// The detail embeds modules in order and reports the computed discount.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_course_detail(pool: PgPool) {
    let token = editor_token(&pool, "tr1").await;
    let slug = create_course(
        &pool,
        &token,
        serde_json::json!({
            "title": "Rust Fundamentals",
            "description": "From ownership to async.",
            "level": "beginner",
            "price": 75.0,
            "original_price": 100.0,
            "modules": [
                { "title": "Ownership" },
                { "title": "Traits" },
            ],
            "technologies": [ { "name": "Rust" } ],
        }),
    )
    .await;
    assert_eq!(slug, "rust-fundamentals");

    let app = build_test_app(pool);
    let response = get(app, &format!("/api/v1/training/courses/{slug}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["discount_percentage"], 25);
    let modules = json["data"]["modules"].as_array().unwrap();
    assert_eq!(modules.len(), 2);
    assert_eq!(modules[0]["title"], "Ownership");
    assert_eq!(modules[1]["title"], "Traits");
}

/// No discount is reported when only one price is set.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_no_discount_without_original_price(pool: PgPool) {
    let token = editor_token(&pool, "tr2").await;
    let slug = create_course(
        &pool,
        &token,
        serde_json::json!({
            "title": "Async Rust",
            "description": "Futures and executors.",
            "level": "advanced",
            "price": 50.0,
        }),
    )
    .await;

    let app = build_test_app(pool);
    let response = get(app, &format!("/api/v1/training/courses/{slug}")).await;
    let json = body_json(response).await;
    assert!(json["data"]["discount_percentage"].is_null());
}

/// The featured listing contains active featured courses only.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_featured_requires_active(pool: PgPool) {
    let token = editor_token(&pool, "tr3").await;
    create_course(
        &pool,
        &token,
        serde_json::json!({
            "title": "Live Course",
            "description": "d",
            "level": "beginner",
            "is_featured": true,
        }),
    )
    .await;
    create_course(
        &pool,
        &token,
        serde_json::json!({
            "title": "Teaser Course",
            "description": "d",
            "level": "beginner",
            "status": "coming_soon",
            "is_featured": true,
        }),
    )
    .await;

    let app = build_test_app(pool);
    let response = get(app, "/api/v1/training/courses/featured").await;
    let json = body_json(response).await;
    let courses = json["data"].as_array().unwrap();
    assert_eq!(courses.len(), 1);
    assert_eq!(courses[0]["title"], "Live Course");
}

/// An out-of-set level is rejected with a field error.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_invalid_level(pool: PgPool) {
    let token = editor_token(&pool, "tr4").await;

    let app = build_test_app(pool);
    let body = serde_json::json!({
        "title": "Wizardry",
        "description": "d",
        "level": "wizard",
    });
    let response = post_json_auth(app, "/api/v1/training/courses", body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["fields"]["level"].is_array());
}

/// Updating with a module list replaces the previous modules wholesale.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_replaces_modules(pool: PgPool) {
    let token = editor_token(&pool, "tr5").await;
    let slug = create_course(
        &pool,
        &token,
        serde_json::json!({
            "title": "Web Services",
            "description": "d",
            "level": "intermediate",
            "modules": [ { "title": "Old Module" } ],
        }),
    )
    .await;

    let app = build_test_app(pool.clone());
    let body = serde_json::json!({
        "modules": [ { "title": "New One" }, { "title": "New Two" } ],
    });
    let response = common::patch_json_auth(
        app,
        &format!("/api/v1/training/courses/{slug}"),
        body,
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let modules = json["data"]["modules"].as_array().unwrap();
    assert_eq!(modules.len(), 2);
    assert_eq!(modules[0]["title"], "New One");
}

/// Deleting a course removes it; the children cascade.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_cascades(pool: PgPool) {
    let token = editor_token(&pool, "tr6").await;
    let slug = create_course(
        &pool,
        &token,
        serde_json::json!({
            "title": "Short Lived",
            "description": "d",
            "level": "beginner",
            "modules": [ { "title": "Gone Soon" } ],
        }),
    )
    .await;

    let app = build_test_app(pool.clone());
    let response = delete_auth(app, &format!("/api/v1/training/courses/{slug}"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM course_modules")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);

    let app = build_test_app(pool);
    let response = get(app, &format!("/api/v1/training/courses/{slug}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
