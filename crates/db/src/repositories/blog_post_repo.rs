//! Repository for the `blog_posts` table and its tag links.

use sqlx::PgPool;

use atrium_core::choices::POST_STATUS_PUBLISHED;
use atrium_core::types::DbId;

use crate::models::blog::{BlogPost, BlogPostFilter, CreateBlogPost, UpdateBlogPost};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, slug, excerpt, content, featured_image_url, \
    author_id, category_id, status, is_featured, read_time, views_count, \
    published_at, created_at, updated_at";

/// Prefixed variant for joined queries.
const P_COLUMNS: &str = "p.id, p.title, p.slug, p.excerpt, p.content, p.featured_image_url, \
    p.author_id, p.category_id, p.status, p.is_featured, p.read_time, p.views_count, \
    p.published_at, p.created_at, p.updated_at";

pub struct BlogPostRepo;

impl BlogPostRepo {
    /// Insert a post and its tag links in one transaction.
    ///
    /// `published_at` is set when the post is created already published.
    pub async fn create(
        pool: &PgPool,
        input: &CreateBlogPost,
        slug: &str,
        author_id: DbId,
        status: &str,
    ) -> Result<BlogPost, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO blog_posts
                (title, slug, excerpt, content, featured_image_url, author_id,
                 category_id, status, is_featured, read_time, published_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
                     CASE WHEN $8 = '{POST_STATUS_PUBLISHED}' THEN NOW() END)
             RETURNING {COLUMNS}"
        );
        let post = sqlx::query_as::<_, BlogPost>(&query)
            .bind(&input.title)
            .bind(slug)
            .bind(&input.excerpt)
            .bind(&input.content)
            .bind(&input.featured_image_url)
            .bind(author_id)
            .bind(input.category_id)
            .bind(status)
            .bind(input.is_featured.unwrap_or(false))
            .bind(input.read_time.unwrap_or(0))
            .fetch_one(&mut *tx)
            .await?;

        for tag_id in &input.tag_ids {
            sqlx::query("INSERT INTO blog_post_tags (post_id, tag_id) VALUES ($1, $2)")
                .bind(post.id)
                .bind(tag_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(post)
    }

    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<BlogPost>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM blog_posts WHERE slug = $1");
        sqlx::query_as::<_, BlogPost>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Public listing: published posts only, newest first, with all the
    /// optional filters applied server-side.
    pub async fn list_published(
        pool: &PgPool,
        filter: &BlogPostFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<BlogPost>, sqlx::Error> {
        let query = format!(
            "SELECT DISTINCT {P_COLUMNS}
             FROM blog_posts p
             LEFT JOIN blog_categories c ON c.id = p.category_id
             LEFT JOIN users u ON u.id = p.author_id
             LEFT JOIN blog_post_tags pt ON pt.post_id = p.id
             LEFT JOIN blog_tags t ON t.id = pt.tag_id
             WHERE p.status = '{POST_STATUS_PUBLISHED}'
               AND ($1::TEXT IS NULL OR c.slug = $1)
               AND ($2::TEXT IS NULL OR t.slug = $2)
               AND ($3::TEXT IS NULL OR u.username = $3)
               AND ($4::BOOL IS NULL OR p.is_featured = $4)
               AND ($5::TEXT IS NULL OR
                    p.title ILIKE '%' || $5 || '%' OR
                    p.excerpt ILIKE '%' || $5 || '%' OR
                    p.content ILIKE '%' || $5 || '%')
               AND ($6::TIMESTAMPTZ IS NULL OR p.published_at >= $6)
               AND ($7::TIMESTAMPTZ IS NULL OR p.published_at <= $7)
             ORDER BY p.published_at DESC
             LIMIT $8 OFFSET $9"
        );
        sqlx::query_as::<_, BlogPost>(&query)
            .bind(&filter.category)
            .bind(&filter.tag)
            .bind(&filter.author)
            .bind(filter.is_featured)
            .bind(&filter.search)
            .bind(filter.published_after)
            .bind(filter.published_before)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Featured published posts, newest first.
    pub async fn list_featured(pool: &PgPool, limit: i64) -> Result<Vec<BlogPost>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM blog_posts
             WHERE status = '{POST_STATUS_PUBLISHED}' AND is_featured = TRUE
             ORDER BY published_at DESC
             LIMIT $1"
        );
        sqlx::query_as::<_, BlogPost>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Most recently published posts.
    pub async fn list_recent(pool: &PgPool, limit: i64) -> Result<Vec<BlogPost>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM blog_posts
             WHERE status = '{POST_STATUS_PUBLISHED}'
             ORDER BY published_at DESC
             LIMIT $1"
        );
        sqlx::query_as::<_, BlogPost>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Bump the view counter. One statement; concurrent bumps never lose
    /// increments.
    pub async fn increment_views(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE blog_posts SET views_count = views_count + 1 WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Update a post. Only non-`None` fields are applied; the slug never
    /// changes. `published_at` is set the first time the status moves to
    /// published and kept thereafter.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateBlogPost,
    ) -> Result<Option<BlogPost>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE blog_posts SET
                title = COALESCE($2, title),
                excerpt = COALESCE($3, excerpt),
                content = COALESCE($4, content),
                featured_image_url = COALESCE($5, featured_image_url),
                category_id = COALESCE($6, category_id),
                status = COALESCE($7, status),
                is_featured = COALESCE($8, is_featured),
                read_time = COALESCE($9, read_time),
                published_at = CASE
                    WHEN published_at IS NULL
                         AND COALESCE($7, status) = '{POST_STATUS_PUBLISHED}'
                    THEN NOW()
                    ELSE published_at
                END,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let post = sqlx::query_as::<_, BlogPost>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.excerpt)
            .bind(&input.content)
            .bind(&input.featured_image_url)
            .bind(input.category_id)
            .bind(&input.status)
            .bind(input.is_featured)
            .bind(input.read_time)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(post) = post else {
            tx.rollback().await?;
            return Ok(None);
        };

        if let Some(tag_ids) = &input.tag_ids {
            sqlx::query("DELETE FROM blog_post_tags WHERE post_id = $1")
                .bind(post.id)
                .execute(&mut *tx)
                .await?;
            for tag_id in tag_ids {
                sqlx::query("INSERT INTO blog_post_tags (post_id, tag_id) VALUES ($1, $2)")
                    .bind(post.id)
                    .bind(tag_id)
                    .execute(&mut *tx)
                    .await?;
            }
        }

        tx.commit().await?;
        Ok(Some(post))
    }

    /// Delete a post (tag links and comments cascade).
    ///
    /// Returns `true` if the row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM blog_posts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
