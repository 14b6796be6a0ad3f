//! Repository for the `blog_tags` table.

use sqlx::PgPool;

use atrium_core::types::DbId;

use crate::models::blog::{BlogTag, CreateBlogTag};

const COLUMNS: &str = "id, name, slug, created_at";

pub struct BlogTagRepo;

impl BlogTagRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateBlogTag,
        slug: &str,
    ) -> Result<BlogTag, sqlx::Error> {
        let query = format!(
            "INSERT INTO blog_tags (name, slug)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BlogTag>(&query)
            .bind(&input.name)
            .bind(slug)
            .fetch_one(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<BlogTag>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM blog_tags ORDER BY name");
        sqlx::query_as::<_, BlogTag>(&query).fetch_all(pool).await
    }

    /// Tags attached to one post, in name order.
    pub async fn list_for_post(pool: &PgPool, post_id: DbId) -> Result<Vec<BlogTag>, sqlx::Error> {
        sqlx::query_as::<_, BlogTag>(
            "SELECT t.id, t.name, t.slug, t.created_at
             FROM blog_tags t
             JOIN blog_post_tags pt ON pt.tag_id = t.id
             WHERE pt.post_id = $1
             ORDER BY t.name",
        )
        .bind(post_id)
        .fetch_all(pool)
        .await
    }
}
