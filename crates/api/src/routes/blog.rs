//! Route definitions for the `/blogs` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::blog;
use crate::state::AppState;

/// Routes mounted at `/blogs`.
///
/// ```text
/// GET    /                   -> list_posts (published only)
/// POST   /                   -> create_post (editor)
/// GET    /featured           -> list_featured
/// GET    /recent             -> list_recent (?limit=)
/// GET    /categories         -> list_categories
/// POST   /categories         -> create_category (editor)
/// GET    /tags               -> list_tags
/// POST   /tags               -> create_tag (editor)
/// GET    /{slug}             -> get_post
/// PATCH  /{slug}             -> update_post (author or editor)
/// DELETE /{slug}             -> delete_post (author or editor)
/// GET    /{slug}/comments    -> list_comments
/// POST   /{slug}/comments    -> create_comment (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(blog::list_posts).post(blog::create_post))
        .route("/featured", get(blog::list_featured))
        .route("/recent", get(blog::list_recent))
        .route("/categories", get(blog::list_categories).post(blog::create_category))
        .route("/tags", get(blog::list_tags).post(blog::create_tag))
        .route(
            "/{slug}",
            get(blog::get_post)
                .patch(blog::update_post)
                .delete(blog::delete_post),
        )
        .route(
            "/{slug}/comments",
            get(blog::list_comments).post(blog::create_comment),
        )
}
