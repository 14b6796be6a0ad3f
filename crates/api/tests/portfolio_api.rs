//! HTTP-level integration tests for the portfolio endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get, get_auth, post_json_auth, register_with_role};
use sqlx::PgPool;

async fn editor_token(pool: &PgPool, username: &str) -> String {
    let app = build_test_app(pool.clone());
    let json = register_with_role(app, pool, username, "password123", "editor").await;
    json["access_token"].as_str().unwrap().to_string()
}

/// Create a project with technologies through the API and return its slug.
async fn create_project(pool: &PgPool, token: &str, title: &str, category: &str) -> String {
    let app = build_test_app(pool.clone());
    let body = serde_json::json!({
        "title": title,
        "description": "A project built with **Rust** end to end.",
        "category": category,
        "client_name": "Acme Corp",
        "technologies": [
            { "name": "Rust", "category": "backend" },
            { "name": "PostgreSQL", "category": "database" },
        ],
    });
    let response = post_json_auth(app, "/api/v1/portfolio", body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["slug"]
        .as_str()
        .unwrap()
        .to_string()
}

/// The detail embeds children and the rendered description.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_detail_embeds_children(pool: PgPool) {
    let token = editor_token(&pool, "pf1").await;
    let slug = create_project(&pool, &token, "Billing Platform", "saas").await;

    let app = build_test_app(pool);
    let response = get(app, &format!("/api/v1/portfolio/{slug}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["title"], "Billing Platform");
    assert_eq!(json["data"]["technologies"].as_array().unwrap().len(), 2);
    assert!(
        json["data"]["description_html"].as_str().unwrap().contains("<strong>Rust</strong>")
    );
}

/// Category listing returns only matching projects; bad categories on create
/// are rejected.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_category_filter(pool: PgPool) {
    let token = editor_token(&pool, "pf2").await;
    create_project(&pool, &token, "Phone App", "mobile").await;
    create_project(&pool, &token, "Dashboard", "web").await;

    let app = build_test_app(pool.clone());
    let response = get(app, "/api/v1/portfolio/category/mobile").await;
    let json = body_json(response).await;
    let projects = json["data"].as_array().unwrap();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0]["title"], "Phone App");

    let app = build_test_app(pool);
    let body = serde_json::json!({
        "title": "Bad",
        "description": "d",
        "category": "blockchain",
    });
    let response = post_json_auth(app, "/api/v1/portfolio", body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Search requires `q` and matches across title and technology names.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_search(pool: PgPool) {
    let token = editor_token(&pool, "pf3").await;
    create_project(&pool, &token, "Analytics Engine", "api").await;

    // Missing query parameter.
    let app = build_test_app(pool.clone());
    let response = get(app, "/api/v1/portfolio/search").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Match on a technology name.
    let app = build_test_app(pool.clone());
    let response = get(app, "/api/v1/portfolio/search?q=postgres").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["count"], 1);
    assert_eq!(json["results"][0]["title"], "Analytics Engine");

    // No match.
    let app = build_test_app(pool);
    let response = get(app, "/api/v1/portfolio/search?q=cobol").await;
    let json = body_json(response).await;
    assert_eq!(json["count"], 0);
}

/// Technology usage is grouped by category with per-technology counts.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_technology_usage(pool: PgPool) {
    let token = editor_token(&pool, "pf4").await;
    create_project(&pool, &token, "Service A", "api").await;
    create_project(&pool, &token, "Service B", "web").await;

    let app = build_test_app(pool);
    let response = get(app, "/api/v1/portfolio/technologies").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    let backend = json["data"]["backend"].as_array().unwrap();
    assert_eq!(backend.len(), 1);
    assert_eq!(backend[0]["name"], "Rust");
    assert_eq!(backend[0]["project_count"], 2);
}

/// Editor stats over an empty table report zero counts and a zero average,
/// not an error or a null.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_stats_empty_table(pool: PgPool) {
    let token = editor_token(&pool, "pf0").await;

    let app = build_test_app(pool);
    let response = get_auth(app, "/api/v1/portfolio/stats", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["total"], 0);
    assert_eq!(json["data"]["average_team_size"].as_f64(), Some(0.0));
}

/// Stats are zeroed for plain users and real for editors.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_stats_existence_hiding(pool: PgPool) {
    let token = editor_token(&pool, "pf5").await;
    create_project(&pool, &token, "Counted Project", "web").await;

    let app = build_test_app(pool.clone());
    let json = common::register_user(app, "pfuser", "password123").await;
    let user_token = json["access_token"].as_str().unwrap().to_string();

    let app = build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/portfolio/stats", &user_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["total"], 0);

    let app = build_test_app(pool);
    let response = get_auth(app, "/api/v1/portfolio/stats", &token).await;
    assert_eq!(body_json(response).await["data"]["total"], 1);
}
