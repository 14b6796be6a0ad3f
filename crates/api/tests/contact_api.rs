//! HTTP-level integration tests for the contact intake and triage endpoints.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, get, get_auth, patch_json_auth, post_json, register_user,
    register_with_role,
};
use sqlx::PgPool;

fn valid_submission() -> serde_json::Value {
    serde_json::json!({
        "name": "Jordan Client",
        "email": "jordan@example.com",
        "inquiry_type": "product",
        "message": "We would like a demo of your platform.",
    })
}

/// A valid submission returns 201 with the stored row id.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_submit_success(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let response = post_json(app, "/api/v1/contacts", valid_submission()).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert!(json["id"].is_number());
    assert!(json["message"].as_str().unwrap().contains("Thank you"));

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM contacts")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

/// Validation failures return the full per-field map and persist nothing.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_submit_validation(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let body = serde_json::json!({
        "name": "",
        "email": "not-an-email",
        "inquiry_type": "bogus",
        "message": "short",
    });
    let response = post_json(app, "/api/v1/contacts", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    for field in ["name", "email", "inquiry_type", "message"] {
        assert!(json["fields"][field].is_array(), "missing field error for {field}: {json}");
    }

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM contacts")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0, "nothing may be persisted on validation failure");
}

/// An omitted inquiry type defaults to `general`.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_submit_default_inquiry_type(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let body = serde_json::json!({
        "name": "Sam",
        "email": "sam@example.com",
        "message": "Just saying hello to the team.",
    });
    let response = post_json(app, "/api/v1/contacts", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let (inquiry_type,): (String,) = sqlx::query_as("SELECT inquiry_type FROM contacts")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(inquiry_type, "general");
}

/// The listing is invisible to anonymous callers and empty for plain users.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_listing_existence_hiding(pool: PgPool) {
    let app = build_test_app(pool.clone());
    post_json(app, "/api/v1/contacts", valid_submission()).await;

    // Anonymous: 401.
    let app = build_test_app(pool.clone());
    let response = get(app, "/api/v1/contacts").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Plain user: 200 with an empty list.
    let app = build_test_app(pool.clone());
    let json = register_user(app, "plaincontact", "password123").await;
    let user_token = json["access_token"].as_str().unwrap().to_string();
    let app = build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/contacts", &user_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 0);

    // Editor: sees the submission.
    let app = build_test_app(pool.clone());
    let json = register_with_role(app, &pool, "contacteditor", "password123", "editor").await;
    let editor_token = json["access_token"].as_str().unwrap().to_string();
    let app = build_test_app(pool);
    let response = get_auth(app, "/api/v1/contacts", &editor_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let contacts = json["data"].as_array().unwrap();
    assert_eq!(contacts.len(), 1);
    assert_eq!(contacts[0]["status"], "new");
}

/// Editors can move a contact through the triage statuses.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_triage_update(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let response = post_json(app, "/api/v1/contacts", valid_submission()).await;
    let id = body_json(response).await["id"].as_i64().unwrap();

    let app = build_test_app(pool.clone());
    let json = register_with_role(app, &pool, "triager", "password123", "editor").await;
    let token = json["access_token"].as_str().unwrap().to_string();

    let app = build_test_app(pool.clone());
    let body = serde_json::json!({ "status": "in_progress", "admin_notes": "Demo scheduled" });
    let response = patch_json_auth(app, &format!("/api/v1/contacts/{id}"), body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "in_progress");
    assert_eq!(json["data"]["admin_notes"], "Demo scheduled");

    // Out-of-set status is rejected.
    let app = build_test_app(pool);
    let body = serde_json::json!({ "status": "done" });
    let response = patch_json_auth(app, &format!("/api/v1/contacts/{id}"), body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// A plain user asking for a specific contact gets 404, not 403.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_detail_hidden_from_plain_users(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let response = post_json(app, "/api/v1/contacts", valid_submission()).await;
    let id = body_json(response).await["id"].as_i64().unwrap();

    let app = build_test_app(pool.clone());
    let json = register_user(app, "snoop", "password123").await;
    let token = json["access_token"].as_str().unwrap().to_string();

    let app = build_test_app(pool);
    let response = get_auth(app, &format!("/api/v1/contacts/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
