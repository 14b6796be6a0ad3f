//! Handlers for the `/portfolio` resource.

use std::collections::BTreeMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use atrium_core::choices::{VALID_PROJECT_CATEGORIES, VALID_PROJECT_STATUSES};
use atrium_core::error::CoreError;
use atrium_core::markdown;
use atrium_core::slug::slugify;
use atrium_core::validation::{self, FieldErrors};
use atrium_db::models::portfolio::{
    CreatePortfolioProject, PortfolioProject, PortfolioStats, ProjectChallenge, ProjectFilter,
    ProjectResult, ProjectTechnology, TechnologyUsage, UpdatePortfolioProject,
};
use atrium_db::repositories::PortfolioRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireEditor;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query params for the search endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

/// Search response: the query echoed back with the match count and results.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub count: usize,
    pub results: Vec<PortfolioProject>,
}

/// Detail shape: the project row plus embedded children and the sanitized
/// HTML rendering of the Markdown description.
#[derive(Debug, Serialize)]
pub struct ProjectDetail {
    #[serde(flatten)]
    pub project: PortfolioProject,
    pub description_html: String,
    pub technologies: Vec<ProjectTechnology>,
    pub challenges: Vec<ProjectChallenge>,
    pub results: Vec<ProjectResult>,
}

async fn load_detail(state: &AppState, project: PortfolioProject) -> AppResult<ProjectDetail> {
    let technologies = PortfolioRepo::list_project_technologies(&state.pool, project.id).await?;
    let challenges = PortfolioRepo::list_project_challenges(&state.pool, project.id).await?;
    let results = PortfolioRepo::list_project_results(&state.pool, project.id).await?;
    let description_html = markdown::render(&project.description);
    Ok(ProjectDetail {
        project,
        description_html,
        technologies,
        challenges,
        results,
    })
}

/// GET /api/v1/portfolio
pub async fn list_projects(
    State(state): State<AppState>,
    Query(pagination): Query<PaginationParams>,
    Query(filter): Query<ProjectFilter>,
) -> AppResult<Json<DataResponse<Vec<PortfolioProject>>>> {
    let (limit, offset) = pagination.clamp();
    let projects = PortfolioRepo::list(&state.pool, &filter, limit, offset).await?;
    Ok(Json(DataResponse { data: projects }))
}

/// GET /api/v1/portfolio/featured
pub async fn list_featured(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<PortfolioProject>>>> {
    let projects = PortfolioRepo::list_featured(&state.pool).await?;
    Ok(Json(DataResponse { data: projects }))
}

/// GET /api/v1/portfolio/category/{category}
pub async fn list_by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> AppResult<Json<DataResponse<Vec<PortfolioProject>>>> {
    let projects = PortfolioRepo::list_by_category(&state.pool, &category).await?;
    Ok(Json(DataResponse { data: projects }))
}

/// GET /api/v1/portfolio/search?q=
///
/// The query is mandatory; matches title, subtitle, description, client name,
/// and technology names.
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<SearchResponse>> {
    let q = params
        .q
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| AppError::BadRequest("Query parameter 'q' is required".into()))?;

    let results = PortfolioRepo::search(&state.pool, q).await?;
    Ok(Json(SearchResponse {
        query: q.to_string(),
        count: results.len(),
        results,
    }))
}

/// GET /api/v1/portfolio/technologies
///
/// Every technology used across the portfolio, grouped by category, with the
/// number of projects using each.
pub async fn list_technologies(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<BTreeMap<String, Vec<TechnologyUsage>>>>> {
    let rows = PortfolioRepo::technology_usage(&state.pool).await?;

    let mut grouped: BTreeMap<String, Vec<TechnologyUsage>> = BTreeMap::new();
    for (category, usage) in rows {
        grouped
            .entry(category.unwrap_or_else(|| "other".to_string()))
            .or_default()
            .push(usage);
    }
    Ok(Json(DataResponse { data: grouped }))
}

/// GET /api/v1/portfolio/stats
///
/// Anonymous callers get 401; authenticated non-editors get an all-zero
/// snapshot so the endpoint reveals nothing about the data set.
pub async fn stats(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<PortfolioStats>>> {
    if !user.is_editor() {
        return Ok(Json(DataResponse {
            data: PortfolioStats::default(),
        }));
    }
    let stats = PortfolioRepo::stats(&state.pool).await?;
    Ok(Json(DataResponse { data: stats }))
}

/// GET /api/v1/portfolio/{slug}
pub async fn get_project(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<DataResponse<ProjectDetail>>> {
    let project = PortfolioRepo::find_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| not_found(&slug))?;
    let detail = load_detail(&state, project).await?;
    Ok(Json(DataResponse { data: detail }))
}

/// POST /api/v1/portfolio
pub async fn create_project(
    State(state): State<AppState>,
    RequireEditor(_user): RequireEditor,
    Json(input): Json<CreatePortfolioProject>,
) -> AppResult<(StatusCode, Json<DataResponse<ProjectDetail>>)> {
    let mut errors = FieldErrors::new();
    validation::require(&mut errors, "title", &input.title);
    validation::require(&mut errors, "description", &input.description);
    validation::require(&mut errors, "category", &input.category);
    validation::require_choice(&mut errors, "category", &input.category, VALID_PROJECT_CATEGORIES);
    if let Some(status) = &input.status {
        validation::require_choice(&mut errors, "status", status, VALID_PROJECT_STATUSES);
    }
    errors.into_result().map_err(AppError::Core)?;

    let slug = slugify(&input.title);
    let project = PortfolioRepo::create(&state.pool, &input, &slug).await?;

    tracing::info!(project_id = project.id, slug = %project.slug, "Portfolio project created");
    let detail = load_detail(&state, project).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: detail })))
}

/// PATCH /api/v1/portfolio/{slug}
pub async fn update_project(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    RequireEditor(_user): RequireEditor,
    Json(input): Json<UpdatePortfolioProject>,
) -> AppResult<Json<DataResponse<ProjectDetail>>> {
    let mut errors = FieldErrors::new();
    if let Some(category) = &input.category {
        validation::require_choice(&mut errors, "category", category, VALID_PROJECT_CATEGORIES);
    }
    if let Some(status) = &input.status {
        validation::require_choice(&mut errors, "status", status, VALID_PROJECT_STATUSES);
    }
    errors.into_result().map_err(AppError::Core)?;

    let existing = PortfolioRepo::find_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| not_found(&slug))?;

    let project = PortfolioRepo::update(&state.pool, existing.id, &input)
        .await?
        .ok_or_else(|| not_found(&slug))?;

    tracing::info!(project_id = project.id, "Portfolio project updated");
    let detail = load_detail(&state, project).await?;
    Ok(Json(DataResponse { data: detail }))
}

/// DELETE /api/v1/portfolio/{slug}
pub async fn delete_project(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    RequireEditor(_user): RequireEditor,
) -> AppResult<StatusCode> {
    let existing = PortfolioRepo::find_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| not_found(&slug))?;
    PortfolioRepo::delete(&state.pool, existing.id).await?;

    tracing::info!(project_id = existing.id, "Portfolio project deleted");
    Ok(StatusCode::NO_CONTENT)
}

fn not_found(slug: &str) -> AppError {
    AppError::Core(CoreError::NotFoundSlug {
        entity: "portfolio project",
        slug: slug.to_string(),
    })
}
