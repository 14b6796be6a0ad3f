//! Product models and child collections.

use atrium_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `products` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Product {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub tagline: Option<String>,
    pub description: String,
    pub status: String,
    pub featured_image_url: Option<String>,
    pub logo_url: Option<String>,
    pub website_url: Option<String>,
    pub github_url: Option<String>,
    pub demo_url: Option<String>,
    pub is_featured: bool,
    pub sort_order: i32,
    pub user_count: i32,
    pub rating: Option<f64>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `product_features` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProductFeature {
    pub id: DbId,
    pub product_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub sort_order: i32,
}

/// A row from the `product_technologies` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProductTechnology {
    pub id: DbId,
    pub product_id: DbId,
    pub name: String,
    pub category: Option<String>,
    pub sort_order: i32,
}

/// Child feature payload carried inside create/update DTOs.
#[derive(Debug, Deserialize)]
pub struct FeatureInput {
    pub title: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub sort_order: Option<i32>,
}

/// Child technology payload carried inside create/update DTOs.
#[derive(Debug, Deserialize)]
pub struct TechnologyInput {
    pub name: String,
    pub category: Option<String>,
    pub sort_order: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct CreateProduct {
    pub name: String,
    pub tagline: Option<String>,
    pub description: String,
    pub status: Option<String>,
    pub featured_image_url: Option<String>,
    pub logo_url: Option<String>,
    pub website_url: Option<String>,
    pub github_url: Option<String>,
    pub demo_url: Option<String>,
    pub is_featured: Option<bool>,
    pub sort_order: Option<i32>,
    pub user_count: Option<i32>,
    pub rating: Option<f64>,
    #[serde(default)]
    pub features: Vec<FeatureInput>,
    #[serde(default)]
    pub technologies: Vec<TechnologyInput>,
}

/// Partial update. A present `features`/`technologies` list replaces the
/// existing children wholesale.
#[derive(Debug, Deserialize)]
pub struct UpdateProduct {
    pub name: Option<String>,
    pub tagline: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub featured_image_url: Option<String>,
    pub logo_url: Option<String>,
    pub website_url: Option<String>,
    pub github_url: Option<String>,
    pub demo_url: Option<String>,
    pub is_featured: Option<bool>,
    pub sort_order: Option<i32>,
    pub user_count: Option<i32>,
    pub rating: Option<f64>,
    pub features: Option<Vec<FeatureInput>>,
    pub technologies: Option<Vec<TechnologyInput>>,
}
