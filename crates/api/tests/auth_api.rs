//! HTTP-level integration tests for the auth endpoints.
//!
//! Covers registration, login, refresh token rotation, logout, profile
//! management, and the public team listing.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, get, get_auth, patch_json_auth, post_json, post_json_auth,
    register_user, register_with_role,
};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

/// Successful registration returns 201 with tokens and the `user` role.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_success(pool: PgPool) {
    let app = build_test_app(pool);

    let json = register_user(app, "alice", "password123").await;

    assert!(json["access_token"].is_string());
    assert!(json["refresh_token"].is_string());
    assert!(json["expires_in"].is_number());
    assert_eq!(json["user"]["username"], "alice");
    assert_eq!(json["user"]["email"], "alice@test.com");
    assert_eq!(json["user"]["role"], "user");
}

/// Mismatched password confirmation returns 400 with a per-field error map.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_password_mismatch(pool: PgPool) {
    let app = build_test_app(pool);

    let body = serde_json::json!({
        "username": "bob",
        "email": "bob@test.com",
        "password": "password123",
        "password_confirm": "different456",
    });
    let response = post_json(app, "/api/v1/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(
        json["fields"]["password_confirm"].is_array(),
        "fields map must flag password_confirm, got: {json}"
    );
}

/// A short password and invalid email are both reported in one response.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_collects_all_field_errors(pool: PgPool) {
    let app = build_test_app(pool);

    let body = serde_json::json!({
        "username": "cj",
        "email": "not-an-email",
        "password": "short",
        "password_confirm": "short",
    });
    let response = post_json(app, "/api/v1/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["fields"]["username"].is_array());
    assert!(json["fields"]["email"].is_array());
    assert!(json["fields"]["password"].is_array());
}

/// Registering the same email twice fails with 400, not 500.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_duplicate_email(pool: PgPool) {
    let app = build_test_app(pool.clone());
    register_user(app, "dupe", "password123").await;

    let app = build_test_app(pool);
    let body = serde_json::json!({
        "username": "dupe2",
        "email": "dupe@test.com",
        "password": "password123",
        "password_confirm": "password123",
    });
    let response = post_json(app, "/api/v1/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

/// Login with the right credentials returns tokens and user info.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_success(pool: PgPool) {
    let app = build_test_app(pool.clone());
    register_user(app, "loginuser", "password123").await;

    let app = build_test_app(pool);
    let body = serde_json::json!({ "email": "loginuser@test.com", "password": "password123" });
    let response = post_json(app, "/api/v1/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["access_token"].is_string());
    assert_eq!(json["user"]["username"], "loginuser");
}

/// A wrong password returns 401 with the same message as an unknown email.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_wrong_password(pool: PgPool) {
    let app = build_test_app(pool.clone());
    register_user(app, "wrongpw", "password123").await;

    let app = build_test_app(pool.clone());
    let body = serde_json::json!({ "email": "wrongpw@test.com", "password": "incorrect" });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let wrong_pw_msg = body_json(response).await["error"].as_str().unwrap().to_string();

    let app = build_test_app(pool);
    let body = serde_json::json!({ "email": "ghost@test.com", "password": "whatever" });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let ghost_msg = body_json(response).await["error"].as_str().unwrap().to_string();

    // Identical messages: the response must not reveal whether the email exists.
    assert_eq!(wrong_pw_msg, ghost_msg);
}

/// Login to a deactivated account returns 403.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_inactive_user(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let json = register_user(app, "inactive", "password123").await;
    let user_id = json["user"]["id"].as_i64().unwrap();

    sqlx::query("UPDATE users SET is_active = FALSE WHERE id = $1")
        .bind(user_id)
        .execute(&pool)
        .await
        .unwrap();

    let app = build_test_app(pool);
    let body = serde_json::json!({ "email": "inactive@test.com", "password": "password123" });
    let response = post_json(app, "/api/v1/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Refresh and logout
// ---------------------------------------------------------------------------

/// Refresh rotates the token pair; the spent refresh token stops working.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_refresh_rotation(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let json = register_user(app, "refresher", "password123").await;
    let refresh_token = json["refresh_token"].as_str().unwrap().to_string();

    let app = build_test_app(pool.clone());
    let body = serde_json::json!({ "refresh_token": refresh_token });
    let response = post_json(app, "/api/v1/auth/refresh", body.clone()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_ne!(
        json["refresh_token"].as_str().unwrap(),
        refresh_token,
        "refresh token must rotate on use"
    );

    // Replaying the spent token fails.
    let app = build_test_app(pool);
    let response = post_json(app, "/api/v1/auth/refresh", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Refreshing with a garbage token returns 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_refresh_invalid_token(pool: PgPool) {
    let app = build_test_app(pool);

    let body = serde_json::json!({ "refresh_token": "not-a-real-token" });
    let response = post_json(app, "/api/v1/auth/refresh", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Logout returns 204 and revokes every session for the user.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_logout_revokes_sessions(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let json = register_user(app, "logoutuser", "password123").await;
    let access_token = json["access_token"].as_str().unwrap();
    let refresh_token = json["refresh_token"].as_str().unwrap();

    let app = build_test_app(pool.clone());
    let response = post_json_auth(app, "/api/v1/auth/logout", serde_json::json!({}), access_token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // The refresh token from before logout is no longer usable.
    let app = build_test_app(pool);
    let body = serde_json::json!({ "refresh_token": refresh_token });
    let response = post_json(app, "/api/v1/auth/refresh", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

/// The profile endpoint requires a token and returns the caller's data.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_profile_requires_auth(pool: PgPool) {
    let app = build_test_app(pool);
    let response = get(app, "/api/v1/auth/profile").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Profile updates apply mutable fields; email stays as registered.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_profile_update(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let json = register_user(app, "profileuser", "password123").await;
    let token = json["access_token"].as_str().unwrap();

    let app = build_test_app(pool.clone());
    let body = serde_json::json!({ "first_name": "Pat", "bio": "Rustacean" });
    let response = patch_json_auth(app, "/api/v1/auth/profile", body, token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["first_name"], "Pat");
    assert_eq!(json["data"]["bio"], "Rustacean");
    assert_eq!(json["data"]["email"], "profileuser@test.com");

    let app = build_test_app(pool);
    let response = get_auth(app, "/api/v1/auth/profile", token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["first_name"], "Pat");
}

/// Changing the password requires the current one and invalidates it.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_change_password(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let json = register_user(app, "pwchange", "password123").await;
    let token = json["access_token"].as_str().unwrap();

    // Wrong current password is rejected.
    let app = build_test_app(pool.clone());
    let body = serde_json::json!({ "old_password": "wrong", "new_password": "newpassword456" });
    let response = post_json_auth(app, "/api/v1/auth/password/change", body, token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Correct current password succeeds.
    let app = build_test_app(pool.clone());
    let body = serde_json::json!({ "old_password": "password123", "new_password": "newpassword456" });
    let response = post_json_auth(app, "/api/v1/auth/password/change", body, token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // The old password no longer logs in; the new one does.
    let app = build_test_app(pool.clone());
    let body = serde_json::json!({ "email": "pwchange@test.com", "password": "password123" });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let app = build_test_app(pool);
    let body = serde_json::json!({ "email": "pwchange@test.com", "password": "newpassword456" });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Team listing
// ---------------------------------------------------------------------------

/// The public team listing contains editors and admins but not plain users,
/// and never exposes email addresses.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_team_listing(pool: PgPool) {
    let app = build_test_app(pool.clone());
    register_user(app.clone(), "plainuser", "password123").await;
    register_with_role(app.clone(), &pool, "editor1", "password123", "editor").await;

    let response = get(app, "/api/v1/auth/team").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let team = json["data"].as_array().unwrap();

    assert_eq!(team.len(), 1, "only the editor should be listed: {json}");
    assert_eq!(team[0]["username"], "editor1");
    assert!(team[0].get("email").is_none(), "team entries must not expose email");
}
