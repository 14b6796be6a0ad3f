//! Route definitions for the `/training` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::training;
use crate::state::AppState;

/// Routes mounted at `/training`.
///
/// ```text
/// GET    /courses           -> list_courses
/// POST   /courses           -> create_course (editor)
/// GET    /courses/featured  -> list_featured
/// GET    /courses/{slug}    -> get_course
/// PATCH  /courses/{slug}    -> update_course (editor)
/// DELETE /courses/{slug}    -> delete_course (editor)
/// GET    /instructors       -> list_instructors
/// GET    /stats             -> stats (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/courses", get(training::list_courses).post(training::create_course))
        .route("/courses/featured", get(training::list_featured))
        .route(
            "/courses/{slug}",
            get(training::get_course)
                .patch(training::update_course)
                .delete(training::delete_course),
        )
        .route("/instructors", get(training::list_instructors))
        .route("/stats", get(training::stats))
}
