//! Route definitions for the `/contacts` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::contacts;
use crate::state::AppState;

/// Routes mounted at `/contacts`.
///
/// ```text
/// POST   /         -> submit (public intake)
/// GET    /         -> list_contacts (requires auth)
/// GET    /stats    -> stats (requires auth)
/// GET    /{id}     -> get_contact (requires auth)
/// PATCH  /{id}     -> update_contact (editor)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(contacts::list_contacts).post(contacts::submit))
        .route("/stats", get(contacts::stats))
        .route(
            "/{id}",
            get(contacts::get_contact).patch(contacts::update_contact),
        )
}
