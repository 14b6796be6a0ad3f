//! Route definitions for the `/testimonials` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::testimonials;
use crate::state::AppState;

/// Routes mounted at `/testimonials`.
///
/// ```text
/// GET    /                          -> list_testimonials (approved only)
/// POST   /                          -> create_testimonial (editor)
/// GET    /featured                  -> list_featured
/// GET    /type/{type}               -> list_by_type
/// POST   /submit                    -> submit (public intake)
/// GET    /submissions               -> list_submissions (requires auth)
/// GET    /submissions/{id}          -> get_submission (requires auth)
/// PATCH  /submissions/{id}          -> update_submission (editor)
/// POST   /submissions/{id}/approve  -> approve_submission (editor)
/// GET    /stats                     -> stats (requires auth)
/// GET    /{id}                      -> get_testimonial
/// PATCH  /{id}                      -> update_testimonial (editor)
/// DELETE /{id}                      -> delete_testimonial (editor)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(testimonials::list_testimonials).post(testimonials::create_testimonial),
        )
        .route("/featured", get(testimonials::list_featured))
        .route("/type/{type}", get(testimonials::list_by_type))
        .route("/submit", post(testimonials::submit))
        .route("/submissions", get(testimonials::list_submissions))
        .route(
            "/submissions/{id}",
            get(testimonials::get_submission).patch(testimonials::update_submission),
        )
        .route(
            "/submissions/{id}/approve",
            post(testimonials::approve_submission),
        )
        .route("/stats", get(testimonials::stats))
        .route(
            "/{id}",
            get(testimonials::get_testimonial)
                .patch(testimonials::update_testimonial)
                .delete(testimonials::delete_testimonial),
        )
}
