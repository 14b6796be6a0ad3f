//! Route definitions for the `/careers` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::careers;
use crate::state::AppState;

/// Routes mounted at `/careers`.
///
/// ```text
/// GET    /positions               -> list_positions
/// POST   /positions               -> create_position (editor)
/// GET    /positions/open          -> list_open_positions
/// GET    /positions/{slug}        -> get_position
/// PATCH  /positions/{slug}        -> update_position (editor)
/// DELETE /positions/{slug}        -> delete_position (editor)
/// POST   /positions/{slug}/apply  -> apply (multipart, public)
/// GET    /applications            -> list_applications (requires auth)
/// GET    /applications/{id}       -> get_application (requires auth)
/// PATCH  /applications/{id}       -> update_application (editor)
/// GET    /stats                   -> stats (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/positions",
            get(careers::list_positions).post(careers::create_position),
        )
        .route("/positions/open", get(careers::list_open_positions))
        .route(
            "/positions/{slug}",
            get(careers::get_position)
                .patch(careers::update_position)
                .delete(careers::delete_position),
        )
        .route("/positions/{slug}/apply", post(careers::apply))
        .route("/applications", get(careers::list_applications))
        .route(
            "/applications/{id}",
            get(careers::get_application).patch(careers::update_application),
        )
        .route("/stats", get(careers::stats))
}
