//! Repository for the `products` table and its child collections.

use sqlx::{PgPool, Postgres, Transaction};

use atrium_core::choices::PRODUCT_STATUS_DEVELOPMENT;
use atrium_core::types::DbId;

use crate::models::product::{
    CreateProduct, FeatureInput, Product, ProductFeature, ProductTechnology, TechnologyInput,
    UpdateProduct,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, slug, tagline, description, status, \
    featured_image_url, logo_url, website_url, github_url, demo_url, \
    is_featured, sort_order, user_count, rating, created_at, updated_at";

pub struct ProductRepo;

impl ProductRepo {
    /// Insert a product and its children in one transaction.
    pub async fn create(
        pool: &PgPool,
        input: &CreateProduct,
        slug: &str,
    ) -> Result<Product, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO products
                (name, slug, tagline, description, status, featured_image_url,
                 logo_url, website_url, github_url, demo_url, is_featured,
                 sort_order, user_count, rating)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
             RETURNING {COLUMNS}"
        );
        let product = sqlx::query_as::<_, Product>(&query)
            .bind(&input.name)
            .bind(slug)
            .bind(&input.tagline)
            .bind(&input.description)
            .bind(input.status.as_deref().unwrap_or(PRODUCT_STATUS_DEVELOPMENT))
            .bind(&input.featured_image_url)
            .bind(&input.logo_url)
            .bind(&input.website_url)
            .bind(&input.github_url)
            .bind(&input.demo_url)
            .bind(input.is_featured.unwrap_or(false))
            .bind(input.sort_order.unwrap_or(0))
            .bind(input.user_count.unwrap_or(0))
            .bind(input.rating)
            .fetch_one(&mut *tx)
            .await?;

        Self::insert_features(&mut tx, product.id, &input.features).await?;
        Self::insert_technologies(&mut tx, product.id, &input.technologies).await?;

        tx.commit().await?;
        Ok(product)
    }

    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products WHERE slug = $1");
        sqlx::query_as::<_, Product>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Public listing with optional status / featured filters, ordered by
    /// sort order then name.
    pub async fn list(
        pool: &PgPool,
        status: Option<&str>,
        is_featured: Option<bool>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Product>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM products
             WHERE ($1::TEXT IS NULL OR status = $1)
               AND ($2::BOOL IS NULL OR is_featured = $2)
             ORDER BY sort_order, name
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(status)
            .bind(is_featured)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn list_featured(pool: &PgPool) -> Result<Vec<Product>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM products
             WHERE is_featured = TRUE
             ORDER BY sort_order, name"
        );
        sqlx::query_as::<_, Product>(&query).fetch_all(pool).await
    }

    pub async fn list_features(
        pool: &PgPool,
        product_id: DbId,
    ) -> Result<Vec<ProductFeature>, sqlx::Error> {
        sqlx::query_as::<_, ProductFeature>(
            "SELECT id, product_id, title, description, icon, sort_order
             FROM product_features WHERE product_id = $1 ORDER BY sort_order, id",
        )
        .bind(product_id)
        .fetch_all(pool)
        .await
    }

    pub async fn list_technologies(
        pool: &PgPool,
        product_id: DbId,
    ) -> Result<Vec<ProductTechnology>, sqlx::Error> {
        sqlx::query_as::<_, ProductTechnology>(
            "SELECT id, product_id, name, category, sort_order
             FROM product_technologies WHERE product_id = $1 ORDER BY sort_order, id",
        )
        .bind(product_id)
        .fetch_all(pool)
        .await
    }

    /// Update a product. Only non-`None` fields are applied; a present child
    /// list replaces the existing children wholesale.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProduct,
    ) -> Result<Option<Product>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE products SET
                name = COALESCE($2, name),
                tagline = COALESCE($3, tagline),
                description = COALESCE($4, description),
                status = COALESCE($5, status),
                featured_image_url = COALESCE($6, featured_image_url),
                logo_url = COALESCE($7, logo_url),
                website_url = COALESCE($8, website_url),
                github_url = COALESCE($9, github_url),
                demo_url = COALESCE($10, demo_url),
                is_featured = COALESCE($11, is_featured),
                sort_order = COALESCE($12, sort_order),
                user_count = COALESCE($13, user_count),
                rating = COALESCE($14, rating),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let product = sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.tagline)
            .bind(&input.description)
            .bind(&input.status)
            .bind(&input.featured_image_url)
            .bind(&input.logo_url)
            .bind(&input.website_url)
            .bind(&input.github_url)
            .bind(&input.demo_url)
            .bind(input.is_featured)
            .bind(input.sort_order)
            .bind(input.user_count)
            .bind(input.rating)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(product) = product else {
            tx.rollback().await?;
            return Ok(None);
        };

        if let Some(features) = &input.features {
            sqlx::query("DELETE FROM product_features WHERE product_id = $1")
                .bind(product.id)
                .execute(&mut *tx)
                .await?;
            Self::insert_features(&mut tx, product.id, features).await?;
        }
        if let Some(technologies) = &input.technologies {
            sqlx::query("DELETE FROM product_technologies WHERE product_id = $1")
                .bind(product.id)
                .execute(&mut *tx)
                .await?;
            Self::insert_technologies(&mut tx, product.id, technologies).await?;
        }

        tx.commit().await?;
        Ok(Some(product))
    }

    /// Delete a product (children cascade). Returns `true` if deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn insert_features(
        tx: &mut Transaction<'_, Postgres>,
        product_id: DbId,
        features: &[FeatureInput],
    ) -> Result<(), sqlx::Error> {
        for (i, feature) in features.iter().enumerate() {
            sqlx::query(
                "INSERT INTO product_features (product_id, title, description, icon, sort_order)
                 VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(product_id)
            .bind(&feature.title)
            .bind(&feature.description)
            .bind(&feature.icon)
            .bind(feature.sort_order.unwrap_or(i as i32))
            .execute(&mut **tx)
            .await?;
        }
        Ok(())
    }

    async fn insert_technologies(
        tx: &mut Transaction<'_, Postgres>,
        product_id: DbId,
        technologies: &[TechnologyInput],
    ) -> Result<(), sqlx::Error> {
        for (i, tech) in technologies.iter().enumerate() {
            sqlx::query(
                "INSERT INTO product_technologies (product_id, name, category, sort_order)
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(product_id)
            .bind(&tech.name)
            .bind(&tech.category)
            .bind(tech.sort_order.unwrap_or(i as i32))
            .execute(&mut **tx)
            .await?;
        }
        Ok(())
    }
}
