//! HTTP-level integration tests for testimonials and the submission queue.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, get, get_auth, post_json, post_json_auth, register_user,
    register_with_role,
};
use sqlx::PgPool;

async fn editor_token(pool: &PgPool, username: &str) -> String {
    let app = build_test_app(pool.clone());
    let json = register_with_role(app, pool, username, "password123", "editor").await;
    json["access_token"].as_str().unwrap().to_string()
}

fn valid_submission() -> serde_json::Value {
    serde_json::json!({
        "name": "Casey Customer",
        "email": "casey@example.com",
        "content": "Working with this team was a genuinely great experience.",
        "rating": 5,
    })
}

// ---------------------------------------------------------------------------
// Public intake
// ---------------------------------------------------------------------------

/// A valid submission is stored unapproved and returns 201.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_submit_success(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let response = post_json(app, "/api/v1/testimonials/submit", valid_submission()).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert!(json["id"].is_number());

    let (is_approved,): (bool,) =
        sqlx::query_as("SELECT is_approved FROM testimonial_submissions")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert!(!is_approved, "submissions start unapproved");
}

/// Content under the minimum length and a bad rating are field errors.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_submit_validation(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let body = serde_json::json!({
        "name": "Casey",
        "email": "casey@example.com",
        "content": "Too short.",
        "rating": 7,
    });
    let response = post_json(app, "/api/v1/testimonials/submit", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["fields"]["content"].is_array());
    assert!(json["fields"]["rating"].is_array());

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM testimonial_submissions")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

/// An omitted rating defaults to 5.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_submit_default_rating(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let body = serde_json::json!({
        "name": "Quiet Fan",
        "email": "fan@example.com",
        "content": "No complaints at all, everything simply worked.",
    });
    let response = post_json(app, "/api/v1/testimonials/submit", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let (rating,): (i32,) = sqlx::query_as("SELECT rating FROM testimonial_submissions")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(rating, 5);
}

// ---------------------------------------------------------------------------
// Approval
// ---------------------------------------------------------------------------

/// Approving a submission publishes exactly one testimonial and flips the
/// approval flag.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_approve_publishes_once(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let response = post_json(app, "/api/v1/testimonials/submit", valid_submission()).await;
    let id = body_json(response).await["id"].as_i64().unwrap();

    let token = editor_token(&pool, "approver").await;

    let app = build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        &format!("/api/v1/testimonials/submissions/{id}/approve"),
        serde_json::json!({}),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "Casey Customer");
    assert_eq!(json["data"]["is_approved"], true);

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM testimonials")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1, "exactly one testimonial per approval");

    // A second approval of the same submission finds nothing pending and
    // publishes nothing.
    let app = build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        &format!("/api/v1/testimonials/submissions/{id}/approve"),
        serde_json::json!({}),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM testimonials")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1, "repeated approval must not duplicate");

    // The public listing now contains the published entry.
    let app = build_test_app(pool);
    let response = get(app, "/api/v1/testimonials").await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
}

/// The submission queue is hidden from anonymous callers and plain users.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_queue_existence_hiding(pool: PgPool) {
    let app = build_test_app(pool.clone());
    post_json(app, "/api/v1/testimonials/submit", valid_submission()).await;

    let app = build_test_app(pool.clone());
    let response = get(app, "/api/v1/testimonials/submissions").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let app = build_test_app(pool.clone());
    let json = register_user(app, "nosy2", "password123").await;
    let token = json["access_token"].as_str().unwrap().to_string();

    let app = build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/testimonials/submissions", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 0);

    let token = editor_token(&pool, "queueeditor").await;
    let app = build_test_app(pool);
    let response = get_auth(app, "/api/v1/testimonials/submissions", &token).await;
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 1);
}

// ---------------------------------------------------------------------------
// Published entries
// ---------------------------------------------------------------------------

/// Editors create testimonials directly; unapproved ones 404 on the public
/// detail endpoint.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_direct_create_and_visibility(pool: PgPool) {
    let token = editor_token(&pool, "testieditor").await;

    let app = build_test_app(pool.clone());
    let body = serde_json::json!({
        "name": "Direct Entry",
        "content": "Added straight by an editor.",
        "testimonial_type": "partner",
        "rating": 4,
        "is_approved": false,
    });
    let response = post_json_auth(app, "/api/v1/testimonials", body, &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let app = build_test_app(pool);
    let response = get(app, &format!("/api/v1/testimonials/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Out-of-set testimonial types are rejected.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_invalid_type_rejected(pool: PgPool) {
    let token = editor_token(&pool, "typeeditor").await;

    let app = build_test_app(pool);
    let body = serde_json::json!({
        "name": "X",
        "content": "c",
        "testimonial_type": "celebrity",
    });
    let response = post_json_auth(app, "/api/v1/testimonials", body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["fields"]["testimonial_type"].is_array());
}

/// Editor stats over empty tables report a zero average rating rather than
/// a null.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_stats_empty_tables(pool: PgPool) {
    let token = editor_token(&pool, "statseditor").await;

    let app = build_test_app(pool);
    let response = get_auth(app, "/api/v1/testimonials/stats", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["total"], 0);
    assert_eq!(json["data"]["pending_submissions"], 0);
    assert_eq!(json["data"]["average_rating"].as_f64(), Some(0.0));
}
