//! Route definitions for the `/portfolio` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::portfolio;
use crate::state::AppState;

/// Routes mounted at `/portfolio`.
///
/// ```text
/// GET    /                      -> list_projects
/// POST   /                      -> create_project (editor)
/// GET    /featured              -> list_featured
/// GET    /search                -> search (?q=)
/// GET    /technologies          -> list_technologies (grouped usage)
/// GET    /stats                 -> stats (requires auth)
/// GET    /category/{category}   -> list_by_category
/// GET    /{slug}                -> get_project
/// PATCH  /{slug}                -> update_project (editor)
/// DELETE /{slug}                -> delete_project (editor)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(portfolio::list_projects).post(portfolio::create_project))
        .route("/featured", get(portfolio::list_featured))
        .route("/search", get(portfolio::search))
        .route("/technologies", get(portfolio::list_technologies))
        .route("/stats", get(portfolio::stats))
        .route("/category/{category}", get(portfolio::list_by_category))
        .route(
            "/{slug}",
            get(portfolio::get_project)
                .patch(portfolio::update_project)
                .delete(portfolio::delete_project),
        )
}
