//! Route definitions for the `/newsletter` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::newsletter;
use crate::state::AppState;

/// Routes mounted at `/newsletter`.
///
/// ```text
/// POST /subscribe      -> subscribe (public, idempotent)
/// POST /unsubscribe    -> unsubscribe (public)
/// GET  /subscriptions  -> list_subscriptions (requires auth)
/// GET  /stats          -> stats (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/subscribe", post(newsletter::subscribe))
        .route("/unsubscribe", post(newsletter::unsubscribe))
        .route("/subscriptions", get(newsletter::list_subscriptions))
        .route("/stats", get(newsletter::stats))
}
