//! Route definitions for the `/products` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::products;
use crate::state::AppState;

/// Routes mounted at `/products`.
///
/// ```text
/// GET    /            -> list_products
/// POST   /            -> create_product (editor)
/// GET    /featured    -> list_featured
/// GET    /{slug}      -> get_product
/// PATCH  /{slug}      -> update_product (editor)
/// DELETE /{slug}      -> delete_product (editor)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(products::list_products).post(products::create_product))
        .route("/featured", get(products::list_featured))
        .route(
            "/{slug}",
            get(products::get_product)
                .patch(products::update_product)
                .delete(products::delete_product),
        )
}
