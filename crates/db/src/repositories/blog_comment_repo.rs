//! Repository for the `blog_comments` table.

use sqlx::PgPool;

use atrium_core::types::DbId;

use crate::models::blog::{BlogComment, CreateBlogComment};

const COLUMNS: &str =
    "id, post_id, author_id, parent_id, content, is_approved, created_at, updated_at";

pub struct BlogCommentRepo;

impl BlogCommentRepo {
    pub async fn create(
        pool: &PgPool,
        post_id: DbId,
        author_id: DbId,
        input: &CreateBlogComment,
    ) -> Result<BlogComment, sqlx::Error> {
        let query = format!(
            "INSERT INTO blog_comments (post_id, author_id, parent_id, content)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BlogComment>(&query)
            .bind(post_id)
            .bind(author_id)
            .bind(input.parent_id)
            .bind(&input.content)
            .fetch_one(pool)
            .await
    }

    /// Approved top-level comments for a post, oldest first. Replies carry
    /// `parent_id` and are threaded client-side.
    pub async fn list_approved_top_level(
        pool: &PgPool,
        post_id: DbId,
    ) -> Result<Vec<BlogComment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM blog_comments
             WHERE post_id = $1 AND is_approved = TRUE AND parent_id IS NULL
             ORDER BY created_at"
        );
        sqlx::query_as::<_, BlogComment>(&query)
            .bind(post_id)
            .fetch_all(pool)
            .await
    }
}
