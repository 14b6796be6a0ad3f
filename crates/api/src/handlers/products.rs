//! Handlers for the `/products` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use atrium_core::choices::VALID_PRODUCT_STATUSES;
use atrium_core::error::CoreError;
use atrium_core::markdown;
use atrium_core::slug::slugify;
use atrium_core::validation::{self, FieldErrors};
use atrium_db::models::product::{
    CreateProduct, Product, ProductFeature, ProductTechnology, UpdateProduct,
};
use atrium_db::repositories::ProductRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireEditor;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query params accepted by the public product listing.
#[derive(Debug, Default, Deserialize)]
pub struct ProductListParams {
    pub status: Option<String>,
    pub is_featured: Option<bool>,
}

/// Detail shape: the product row plus embedded children and the sanitized
/// HTML rendering of the Markdown description.
#[derive(Debug, Serialize)]
pub struct ProductDetail {
    #[serde(flatten)]
    pub product: Product,
    pub description_html: String,
    pub features: Vec<ProductFeature>,
    pub technologies: Vec<ProductTechnology>,
}

async fn load_detail(state: &AppState, product: Product) -> AppResult<ProductDetail> {
    let features = ProductRepo::list_features(&state.pool, product.id).await?;
    let technologies = ProductRepo::list_technologies(&state.pool, product.id).await?;
    let description_html = markdown::render(&product.description);
    Ok(ProductDetail {
        product,
        description_html,
        features,
        technologies,
    })
}

/// GET /api/v1/products
pub async fn list_products(
    State(state): State<AppState>,
    Query(pagination): Query<PaginationParams>,
    Query(params): Query<ProductListParams>,
) -> AppResult<Json<DataResponse<Vec<Product>>>> {
    let (limit, offset) = pagination.clamp();
    let products = ProductRepo::list(
        &state.pool,
        params.status.as_deref(),
        params.is_featured,
        limit,
        offset,
    )
    .await?;
    Ok(Json(DataResponse { data: products }))
}

/// GET /api/v1/products/featured
pub async fn list_featured(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Product>>>> {
    let products = ProductRepo::list_featured(&state.pool).await?;
    Ok(Json(DataResponse { data: products }))
}

/// GET /api/v1/products/{slug}
pub async fn get_product(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<DataResponse<ProductDetail>>> {
    let product = ProductRepo::find_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| not_found(&slug))?;
    let detail = load_detail(&state, product).await?;
    Ok(Json(DataResponse { data: detail }))
}

/// POST /api/v1/products
pub async fn create_product(
    State(state): State<AppState>,
    RequireEditor(_user): RequireEditor,
    Json(input): Json<CreateProduct>,
) -> AppResult<(StatusCode, Json<DataResponse<ProductDetail>>)> {
    let mut errors = FieldErrors::new();
    validation::require(&mut errors, "name", &input.name);
    validation::require(&mut errors, "description", &input.description);
    if let Some(status) = &input.status {
        validation::require_choice(&mut errors, "status", status, VALID_PRODUCT_STATUSES);
    }
    errors.into_result().map_err(AppError::Core)?;

    let slug = slugify(&input.name);
    let product = ProductRepo::create(&state.pool, &input, &slug).await?;

    tracing::info!(product_id = product.id, slug = %product.slug, "Product created");
    let detail = load_detail(&state, product).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: detail })))
}

/// PATCH /api/v1/products/{slug}
pub async fn update_product(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    RequireEditor(_user): RequireEditor,
    Json(input): Json<UpdateProduct>,
) -> AppResult<Json<DataResponse<ProductDetail>>> {
    let mut errors = FieldErrors::new();
    if let Some(status) = &input.status {
        validation::require_choice(&mut errors, "status", status, VALID_PRODUCT_STATUSES);
    }
    errors.into_result().map_err(AppError::Core)?;

    let existing = ProductRepo::find_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| not_found(&slug))?;

    let product = ProductRepo::update(&state.pool, existing.id, &input)
        .await?
        .ok_or_else(|| not_found(&slug))?;

    tracing::info!(product_id = product.id, "Product updated");
    let detail = load_detail(&state, product).await?;
    Ok(Json(DataResponse { data: detail }))
}

/// DELETE /api/v1/products/{slug}
pub async fn delete_product(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    RequireEditor(_user): RequireEditor,
) -> AppResult<StatusCode> {
    let existing = ProductRepo::find_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| not_found(&slug))?;
    ProductRepo::delete(&state.pool, existing.id).await?;

    tracing::info!(product_id = existing.id, "Product deleted");
    Ok(StatusCode::NO_CONTENT)
}

fn not_found(slug: &str) -> AppError {
    AppError::Core(CoreError::NotFoundSlug {
        entity: "product",
        slug: slug.to_string(),
    })
}
