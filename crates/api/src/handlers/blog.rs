//! Handlers for the `/blogs` resource: categories, tags, posts, comments.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use atrium_core::choices::{POST_STATUS_DRAFT, POST_STATUS_PUBLISHED, VALID_POST_STATUSES};
use atrium_core::error::CoreError;
use atrium_core::markdown;
use atrium_core::slug::slugify;
use atrium_core::types::{DbId, Timestamp};
use atrium_core::validation::{self, FieldErrors};
use atrium_db::models::blog::{
    BlogCategory, BlogComment, BlogPost, BlogPostFilter, BlogTag, CreateBlogCategory,
    CreateBlogComment, CreateBlogPost, CreateBlogTag, UpdateBlogPost,
};
use atrium_db::repositories::{BlogCategoryRepo, BlogCommentRepo, BlogPostRepo, BlogTagRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireEditor;
use crate::query::{LimitParam, PaginationParams};
use crate::response::DataResponse;
use crate::state::AppState;

/// Number of posts returned by the featured endpoint.
const FEATURED_LIMIT: i64 = 3;

/// Default number of posts returned by the recent endpoint.
const RECENT_DEFAULT_LIMIT: i64 = 5;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Post shape used in list responses: raw Markdown omitted, excerpt only.
#[derive(Debug, Serialize)]
pub struct BlogPostSummary {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub featured_image_url: Option<String>,
    pub author_id: DbId,
    pub category_id: Option<DbId>,
    pub status: String,
    pub is_featured: bool,
    pub read_time: i32,
    pub views_count: i32,
    pub published_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl From<BlogPost> for BlogPostSummary {
    fn from(post: BlogPost) -> Self {
        Self {
            id: post.id,
            title: post.title,
            slug: post.slug,
            excerpt: post.excerpt,
            featured_image_url: post.featured_image_url,
            author_id: post.author_id,
            category_id: post.category_id,
            status: post.status,
            is_featured: post.is_featured,
            read_time: post.read_time,
            views_count: post.views_count,
            published_at: post.published_at,
            created_at: post.created_at,
        }
    }
}

/// Full post shape for the detail endpoint: raw Markdown plus the sanitized
/// HTML projection and the post's tags.
#[derive(Debug, Serialize)]
pub struct BlogPostDetail {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub content_html: String,
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
    pub tags: Vec<BlogTag>,
}

impl BlogPostDetail {
    fn from_post(post: BlogPost, tags: Vec<BlogTag>) -> Self {
        let content_html = markdown::render(&post.content);
        Self {
            id: post.id,
            title: post.title,
            slug: post.slug,
            excerpt: post.excerpt,
            content: post.content,
            content_html,
            featured_image_url: post.featured_image_url,
            author_id: post.author_id,
            category_id: post.category_id,
            status: post.status,
            is_featured: post.is_featured,
            read_time: post.read_time,
            views_count: post.views_count,
            published_at: post.published_at,
            created_at: post.created_at,
            updated_at: post.updated_at,
            tags,
        }
    }
}

// ---------------------------------------------------------------------------
// Categories and tags
// ---------------------------------------------------------------------------

/// GET /api/v1/blogs/categories
pub async fn list_categories(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<BlogCategory>>>> {
    let categories = BlogCategoryRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: categories }))
}

/// POST /api/v1/blogs/categories
pub async fn create_category(
    State(state): State<AppState>,
    RequireEditor(_user): RequireEditor,
    Json(input): Json<CreateBlogCategory>,
) -> AppResult<(StatusCode, Json<DataResponse<BlogCategory>>)> {
    let mut errors = FieldErrors::new();
    validation::require(&mut errors, "name", &input.name);
    errors.into_result().map_err(AppError::Core)?;

    let slug = slugify(&input.name);
    let category = BlogCategoryRepo::create(&state.pool, &input, &slug).await?;

    tracing::info!(category_id = category.id, "Blog category created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: category })))
}

/// GET /api/v1/blogs/tags
pub async fn list_tags(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<BlogTag>>>> {
    let tags = BlogTagRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: tags }))
}

/// POST /api/v1/blogs/tags
pub async fn create_tag(
    State(state): State<AppState>,
    RequireEditor(_user): RequireEditor,
    Json(input): Json<CreateBlogTag>,
) -> AppResult<(StatusCode, Json<DataResponse<BlogTag>>)> {
    let mut errors = FieldErrors::new();
    validation::require(&mut errors, "name", &input.name);
    errors.into_result().map_err(AppError::Core)?;

    let slug = slugify(&input.name);
    let tag = BlogTagRepo::create(&state.pool, &input, &slug).await?;

    tracing::info!(tag_id = tag.id, "Blog tag created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: tag })))
}

// ---------------------------------------------------------------------------
// Posts
// ---------------------------------------------------------------------------

/// GET /api/v1/blogs
///
/// Public listing of published posts, newest first. Supports category, tag,
/// author, featured, search, and date-range filters.
pub async fn list_posts(
    State(state): State<AppState>,
    Query(pagination): Query<PaginationParams>,
    Query(filter): Query<BlogPostFilter>,
) -> AppResult<Json<DataResponse<Vec<BlogPostSummary>>>> {
    let (limit, offset) = pagination.clamp();
    let posts = BlogPostRepo::list_published(&state.pool, &filter, limit, offset).await?;
    let data = posts.into_iter().map(BlogPostSummary::from).collect();
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/blogs/featured
pub async fn list_featured(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<BlogPostSummary>>>> {
    let posts = BlogPostRepo::list_featured(&state.pool, FEATURED_LIMIT).await?;
    let data = posts.into_iter().map(BlogPostSummary::from).collect();
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/blogs/recent?limit=
pub async fn list_recent(
    State(state): State<AppState>,
    Query(params): Query<LimitParam>,
) -> AppResult<Json<DataResponse<Vec<BlogPostSummary>>>> {
    let limit = params.clamp_or(RECENT_DEFAULT_LIMIT);
    let posts = BlogPostRepo::list_recent(&state.pool, limit).await?;
    let data = posts.into_iter().map(BlogPostSummary::from).collect();
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/blogs/{slug}
///
/// Unpublished posts are only visible to their author and editors; everyone
/// else gets an undistinguished 404. Each successful read of a published post
/// bumps the view counter.
pub async fn get_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    user: Option<AuthUser>,
) -> AppResult<Json<DataResponse<BlogPostDetail>>> {
    let post = BlogPostRepo::find_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| not_found(&slug))?;

    let published = post.status == POST_STATUS_PUBLISHED;
    if !published {
        let can_see = user
            .as_ref()
            .is_some_and(|u| u.is_editor() || u.user_id == post.author_id);
        if !can_see {
            return Err(not_found(&slug));
        }
    }

    if published {
        BlogPostRepo::increment_views(&state.pool, post.id).await?;
    }

    let tags = BlogTagRepo::list_for_post(&state.pool, post.id).await?;
    Ok(Json(DataResponse {
        data: BlogPostDetail::from_post(post, tags),
    }))
}

/// POST /api/v1/blogs
///
/// Create a post. The author is always the caller; the slug is derived from
/// the title and never changes afterwards.
pub async fn create_post(
    State(state): State<AppState>,
    RequireEditor(user): RequireEditor,
    Json(input): Json<CreateBlogPost>,
) -> AppResult<(StatusCode, Json<DataResponse<BlogPostDetail>>)> {
    let mut errors = FieldErrors::new();
    validation::require(&mut errors, "title", &input.title);
    validation::require(&mut errors, "content", &input.content);
    if let Some(status) = &input.status {
        validation::require_choice(&mut errors, "status", status, VALID_POST_STATUSES);
    }
    errors.into_result().map_err(AppError::Core)?;

    let slug = slugify(&input.title);
    let status = input.status.as_deref().unwrap_or(POST_STATUS_DRAFT);

    let post = BlogPostRepo::create(&state.pool, &input, &slug, user.user_id, status).await?;
    let tags = BlogTagRepo::list_for_post(&state.pool, post.id).await?;

    tracing::info!(post_id = post.id, slug = %post.slug, "Blog post created");
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: BlogPostDetail::from_post(post, tags),
        }),
    ))
}

/// PATCH /api/v1/blogs/{slug}
///
/// Only the author or an editor may update a post.
pub async fn update_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    user: AuthUser,
    Json(input): Json<UpdateBlogPost>,
) -> AppResult<Json<DataResponse<BlogPostDetail>>> {
    let mut errors = FieldErrors::new();
    if let Some(status) = &input.status {
        validation::require_choice(&mut errors, "status", status, VALID_POST_STATUSES);
    }
    errors.into_result().map_err(AppError::Core)?;

    let existing = find_owned_post(&state, &slug, &user).await?;

    let post = BlogPostRepo::update(&state.pool, existing.id, &input)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "blog post",
            id: existing.id,
        })?;
    let tags = BlogTagRepo::list_for_post(&state.pool, post.id).await?;

    tracing::info!(post_id = post.id, "Blog post updated");
    Ok(Json(DataResponse {
        data: BlogPostDetail::from_post(post, tags),
    }))
}

/// DELETE /api/v1/blogs/{slug}
pub async fn delete_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    user: AuthUser,
) -> AppResult<StatusCode> {
    let existing = find_owned_post(&state, &slug, &user).await?;
    BlogPostRepo::delete(&state.pool, existing.id).await?;

    tracing::info!(post_id = existing.id, "Blog post deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Comments
// ---------------------------------------------------------------------------

/// GET /api/v1/blogs/{slug}/comments
///
/// Approved top-level comments on a published post.
pub async fn list_comments(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<DataResponse<Vec<BlogComment>>>> {
    let post = find_published_post(&state, &slug).await?;
    let comments = BlogCommentRepo::list_approved_top_level(&state.pool, post.id).await?;
    Ok(Json(DataResponse { data: comments }))
}

/// POST /api/v1/blogs/{slug}/comments
///
/// Authenticated; comments can only be left on published posts.
pub async fn create_comment(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    user: AuthUser,
    Json(input): Json<CreateBlogComment>,
) -> AppResult<(StatusCode, Json<DataResponse<BlogComment>>)> {
    let mut errors = FieldErrors::new();
    validation::require(&mut errors, "content", &input.content);
    errors.into_result().map_err(AppError::Core)?;

    let post = find_published_post(&state, &slug).await?;
    let comment = BlogCommentRepo::create(&state.pool, post.id, user.user_id, &input).await?;

    tracing::info!(comment_id = comment.id, post_id = post.id, "Comment created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: comment })))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn not_found(slug: &str) -> AppError {
    AppError::Core(CoreError::NotFoundSlug {
        entity: "blog post",
        slug: slug.to_string(),
    })
}

/// Resolve a post by slug, requiring the caller to be its author or an editor.
async fn find_owned_post(state: &AppState, slug: &str, user: &AuthUser) -> AppResult<BlogPost> {
    let post = BlogPostRepo::find_by_slug(&state.pool, slug)
        .await?
        .ok_or_else(|| not_found(slug))?;

    if post.author_id != user.user_id && !user.is_editor() {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the author or an editor may modify this post".into(),
        )));
    }
    Ok(post)
}

/// Resolve a published post by slug, 404 otherwise.
async fn find_published_post(state: &AppState, slug: &str) -> AppResult<BlogPost> {
    BlogPostRepo::find_by_slug(&state.pool, slug)
        .await?
        .filter(|p| p.status == POST_STATUS_PUBLISHED)
        .ok_or_else(|| not_found(slug))
}
