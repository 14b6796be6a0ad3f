//! Handlers for the `/training` resource: courses and instructors.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use atrium_core::choices::{VALID_COURSE_LEVELS, VALID_COURSE_STATUSES};
use atrium_core::error::CoreError;
use atrium_core::markdown;
use atrium_core::slug::slugify;
use atrium_core::validation::{self, FieldErrors};
use atrium_db::models::training::{
    Course, CourseFilter, CourseInstructor, CourseModule, CourseProject, CourseTechnology,
    CreateCourse, Instructor, TrainingStats, UpdateCourse,
};
use atrium_db::repositories::{CourseRepo, InstructorRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireEditor;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Number of courses returned by the featured endpoint.
const FEATURED_LIMIT: i64 = 3;

/// Detail shape: the course row plus embedded children, attached instructors,
/// the computed discount, and the sanitized HTML description.
#[derive(Debug, Serialize)]
pub struct CourseDetail {
    #[serde(flatten)]
    pub course: Course,
    pub description_html: String,
    pub discount_percentage: Option<i32>,
    pub modules: Vec<CourseModule>,
    pub technologies: Vec<CourseTechnology>,
    pub projects: Vec<CourseProject>,
    pub instructors: Vec<CourseInstructor>,
}

async fn load_detail(state: &AppState, course: Course) -> AppResult<CourseDetail> {
    let modules = CourseRepo::list_modules(&state.pool, course.id).await?;
    let technologies = CourseRepo::list_technologies(&state.pool, course.id).await?;
    let projects = CourseRepo::list_projects(&state.pool, course.id).await?;
    let instructors = CourseRepo::list_instructors(&state.pool, course.id).await?;
    let description_html = markdown::render(&course.description);
    let discount_percentage = course.discount_percentage();
    Ok(CourseDetail {
        course,
        description_html,
        discount_percentage,
        modules,
        technologies,
        projects,
        instructors,
    })
}

/// GET /api/v1/training/courses
pub async fn list_courses(
    State(state): State<AppState>,
    Query(pagination): Query<PaginationParams>,
    Query(filter): Query<CourseFilter>,
) -> AppResult<Json<DataResponse<Vec<Course>>>> {
    let (limit, offset) = pagination.clamp();
    let courses = CourseRepo::list(&state.pool, &filter, limit, offset).await?;
    Ok(Json(DataResponse { data: courses }))
}

/// GET /api/v1/training/courses/featured
pub async fn list_featured(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Course>>>> {
    let courses = CourseRepo::list_featured(&state.pool, FEATURED_LIMIT).await?;
    Ok(Json(DataResponse { data: courses }))
}

/// GET /api/v1/training/courses/{slug}
pub async fn get_course(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<DataResponse<CourseDetail>>> {
    let course = CourseRepo::find_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| not_found(&slug))?;
    let detail = load_detail(&state, course).await?;
    Ok(Json(DataResponse { data: detail }))
}

/// POST /api/v1/training/courses
pub async fn create_course(
    State(state): State<AppState>,
    RequireEditor(_user): RequireEditor,
    Json(input): Json<CreateCourse>,
) -> AppResult<(StatusCode, Json<DataResponse<CourseDetail>>)> {
    let mut errors = FieldErrors::new();
    validation::require(&mut errors, "title", &input.title);
    validation::require(&mut errors, "description", &input.description);
    validation::require_choice(&mut errors, "level", &input.level, VALID_COURSE_LEVELS);
    if let Some(status) = &input.status {
        validation::require_choice(&mut errors, "status", status, VALID_COURSE_STATUSES);
    }
    errors.into_result().map_err(AppError::Core)?;

    let slug = slugify(&input.title);
    let course = CourseRepo::create(&state.pool, &input, &slug).await?;

    tracing::info!(course_id = course.id, slug = %course.slug, "Course created");
    let detail = load_detail(&state, course).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: detail })))
}

/// PATCH /api/v1/training/courses/{slug}
pub async fn update_course(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    RequireEditor(_user): RequireEditor,
    Json(input): Json<UpdateCourse>,
) -> AppResult<Json<DataResponse<CourseDetail>>> {
    let mut errors = FieldErrors::new();
    if let Some(level) = &input.level {
        validation::require_choice(&mut errors, "level", level, VALID_COURSE_LEVELS);
    }
    if let Some(status) = &input.status {
        validation::require_choice(&mut errors, "status", status, VALID_COURSE_STATUSES);
    }
    errors.into_result().map_err(AppError::Core)?;

    let existing = CourseRepo::find_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| not_found(&slug))?;

    let course = CourseRepo::update(&state.pool, existing.id, &input)
        .await?
        .ok_or_else(|| not_found(&slug))?;

    tracing::info!(course_id = course.id, "Course updated");
    let detail = load_detail(&state, course).await?;
    Ok(Json(DataResponse { data: detail }))
}

/// DELETE /api/v1/training/courses/{slug}
pub async fn delete_course(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    RequireEditor(_user): RequireEditor,
) -> AppResult<StatusCode> {
    let existing = CourseRepo::find_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| not_found(&slug))?;
    CourseRepo::delete(&state.pool, existing.id).await?;

    tracing::info!(course_id = existing.id, "Course deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/training/instructors
pub async fn list_instructors(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Instructor>>>> {
    let instructors = InstructorRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: instructors }))
}

/// GET /api/v1/training/stats
pub async fn stats(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<TrainingStats>>> {
    if !user.is_editor() {
        return Ok(Json(DataResponse {
            data: TrainingStats::default(),
        }));
    }
    let stats = CourseRepo::stats(&state.pool).await?;
    Ok(Json(DataResponse { data: stats }))
}

fn not_found(slug: &str) -> AppError {
    AppError::Core(CoreError::NotFoundSlug {
        entity: "course",
        slug: slug.to_string(),
    })
}
