//! Repository for the `blog_categories` table.

use sqlx::PgPool;

use crate::models::blog::{BlogCategory, CreateBlogCategory};

const COLUMNS: &str = "id, name, slug, description, color, created_at";

pub struct BlogCategoryRepo;

impl BlogCategoryRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateBlogCategory,
        slug: &str,
    ) -> Result<BlogCategory, sqlx::Error> {
        let query = format!(
            "INSERT INTO blog_categories (name, slug, description, color)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BlogCategory>(&query)
            .bind(&input.name)
            .bind(slug)
            .bind(&input.description)
            .bind(&input.color)
            .fetch_one(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<BlogCategory>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM blog_categories ORDER BY name");
        sqlx::query_as::<_, BlogCategory>(&query).fetch_all(pool).await
    }
}
