use std::sync::Arc;

use crate::config::ServerConfig;
use crate::notify::Mailer;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: atrium_db::DbPool,
    /// Server configuration (accessed by middleware and handlers).
    pub config: Arc<ServerConfig>,
    /// Outbound notification mailer. All sends are fire-and-forget.
    pub mailer: Arc<dyn Mailer>,
}
