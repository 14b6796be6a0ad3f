//! Blog models: categories, tags, posts, comments.

use atrium_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `blog_categories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BlogCategory {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub color: Option<String>,
    pub created_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateBlogCategory {
    pub name: String,
    pub description: Option<String>,
    pub color: Option<String>,
}

/// A row from the `blog_tags` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BlogTag {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub created_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateBlogTag {
    pub name: String,
}

/// A row from the `blog_posts` table. `content` is raw Markdown; the
/// rendered HTML projection is added at the response layer.
#[derive(Debug, Clone, FromRow)]
pub struct BlogPost {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub featured_image_url: Option<String>,
    pub author_id: DbId,
    pub category_id: Option<DbId>,
    pub status: String,
    pub is_featured: bool,
    pub read_time: i32,
    pub views_count: i32,
    pub published_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a blog post. The author is always the caller.
#[derive(Debug, Deserialize)]
pub struct CreateBlogPost {
    pub title: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub featured_image_url: Option<String>,
    pub category_id: Option<DbId>,
    pub status: Option<String>,
    pub is_featured: Option<bool>,
    pub read_time: Option<i32>,
    #[serde(default)]
    pub tag_ids: Vec<DbId>,
}

/// DTO for updating a blog post. The slug never changes.
#[derive(Debug, Deserialize)]
pub struct UpdateBlogPost {
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub featured_image_url: Option<String>,
    pub category_id: Option<DbId>,
    pub status: Option<String>,
    pub is_featured: Option<bool>,
    pub read_time: Option<i32>,
    pub tag_ids: Option<Vec<DbId>>,
}

/// Query params accepted by the public post listing.
#[derive(Debug, Default, Deserialize)]
pub struct BlogPostFilter {
    pub category: Option<String>,
    pub tag: Option<String>,
    pub author: Option<String>,
    pub is_featured: Option<bool>,
    pub search: Option<String>,
    pub published_after: Option<Timestamp>,
    pub published_before: Option<Timestamp>,
}

/// A row from the `blog_comments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BlogComment {
    pub id: DbId,
    pub post_id: DbId,
    pub author_id: DbId,
    pub parent_id: Option<DbId>,
    pub content: String,
    pub is_approved: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateBlogComment {
    pub content: String,
    pub parent_id: Option<DbId>,
}
