//! HTTP-level integration tests for the newsletter subscription lifecycle.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get_auth, post_json, register_with_role};
use sqlx::PgPool;

/// Subscribing returns 201 and stores the normalized email.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_subscribe_normalizes_email(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let body = serde_json::json!({ "email": "  Reader@Example.COM ", "source": "footer" });
    let response = post_json(app, "/api/v1/newsletter/subscribe", body).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["email"], "reader@example.com");

    let (email, source): (String, Option<String>) =
        sqlx::query_as("SELECT email, source FROM newsletter_subscriptions")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(email, "reader@example.com");
    assert_eq!(source.as_deref(), Some("footer"));
}

/// Re-subscribing the same email is idempotent: one row, still active.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_subscribe_idempotent(pool: PgPool) {
    for _ in 0..2 {
        let app = build_test_app(pool.clone());
        let body = serde_json::json!({ "email": "repeat@example.com" });
        let response = post_json(app, "/api/v1/newsletter/subscribe", body).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM newsletter_subscriptions")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1, "a given email never has two rows");
}

/// An invalid email returns a field error.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_subscribe_invalid_email(pool: PgPool) {
    let app = build_test_app(pool);
    let body = serde_json::json!({ "email": "not-an-email" });
    let response = post_json(app, "/api/v1/newsletter/subscribe", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["fields"]["email"].is_array());
}

/// Unsubscribe deactivates the row; resubscribing reactivates the same row.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_unsubscribe_and_resubscribe(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let body = serde_json::json!({ "email": "cycle@example.com" });
    post_json(app, "/api/v1/newsletter/subscribe", body).await;

    let app = build_test_app(pool.clone());
    let body = serde_json::json!({ "email": "cycle@example.com" });
    let response = post_json(app, "/api/v1/newsletter/unsubscribe", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let (is_active,): (bool,) =
        sqlx::query_as("SELECT is_active FROM newsletter_subscriptions")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert!(!is_active);

    let app = build_test_app(pool.clone());
    let body = serde_json::json!({ "email": "cycle@example.com" });
    let response = post_json(app, "/api/v1/newsletter/subscribe", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let rows: Vec<(bool,)> =
        sqlx::query_as("SELECT is_active FROM newsletter_subscriptions")
            .fetch_all(&pool)
            .await
            .unwrap();
    assert_eq!(rows.len(), 1);
    assert!(rows[0].0, "the existing row is reactivated");
}

/// Unsubscribing an unknown or inactive email returns 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_unsubscribe_unknown_email(pool: PgPool) {
    let app = build_test_app(pool);
    let body = serde_json::json!({ "email": "ghost@example.com" });
    let response = post_json(app, "/api/v1/newsletter/unsubscribe", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("No active subscription"));
}

/// Stats are all-zero for plain users and real for editors.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_stats_existence_hiding(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let body = serde_json::json!({ "email": "counted@example.com" });
    post_json(app, "/api/v1/newsletter/subscribe", body).await;

    let app = build_test_app(pool.clone());
    let json = register_with_role(app, &pool, "newseditor", "password123", "editor").await;
    let editor_token = json["access_token"].as_str().unwrap().to_string();

    let app = build_test_app(pool.clone());
    let json = common::register_user(app, "newsuser", "password123").await;
    let user_token = json["access_token"].as_str().unwrap().to_string();

    let app = build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/newsletter/stats", &user_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["active"], 0);

    let app = build_test_app(pool);
    let response = get_auth(app, "/api/v1/newsletter/stats", &editor_token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["active"], 1);
}
