//! Handlers for the `/testimonials` resource: published entries and the
//! public submission queue.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use atrium_core::choices::VALID_TESTIMONIAL_TYPES;
use atrium_core::error::CoreError;
use atrium_core::types::DbId;
use atrium_core::validation::{self, FieldErrors};
use atrium_db::models::testimonial::{
    CreateTestimonial, CreateTestimonialSubmission, SubmitTestimonial, Testimonial,
    TestimonialFilter, TestimonialStats, TestimonialSubmission, UpdateTestimonial,
    UpdateTestimonialSubmission,
};
use atrium_db::repositories::{TestimonialRepo, TestimonialSubmissionRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::client_meta::ClientMeta;
use crate::middleware::rbac::RequireEditor;
use crate::notify::{messages, send_best_effort};
use crate::query::PaginationParams;
use crate::response::{DataResponse, SubmissionResponse};
use crate::state::AppState;

/// Number of entries returned by the featured endpoint.
const FEATURED_LIMIT: i64 = 6;

/// Minimum length of submitted testimonial content.
const MIN_CONTENT_LEN: usize = 20;

/// Query params for the admin submission listing.
#[derive(Debug, Default, Deserialize)]
pub struct SubmissionListParams {
    pub is_approved: Option<bool>,
}

// ---------------------------------------------------------------------------
// Public testimonials
// ---------------------------------------------------------------------------

/// GET /api/v1/testimonials
pub async fn list_testimonials(
    State(state): State<AppState>,
    Query(pagination): Query<PaginationParams>,
    Query(filter): Query<TestimonialFilter>,
) -> AppResult<Json<DataResponse<Vec<Testimonial>>>> {
    let (limit, offset) = pagination.clamp();
    let testimonials = TestimonialRepo::list_approved(&state.pool, &filter, limit, offset).await?;
    Ok(Json(DataResponse { data: testimonials }))
}

/// GET /api/v1/testimonials/featured
pub async fn list_featured(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Testimonial>>>> {
    let testimonials = TestimonialRepo::list_featured(&state.pool, FEATURED_LIMIT).await?;
    Ok(Json(DataResponse { data: testimonials }))
}

/// GET /api/v1/testimonials/type/{type}
pub async fn list_by_type(
    State(state): State<AppState>,
    Path(testimonial_type): Path<String>,
) -> AppResult<Json<DataResponse<Vec<Testimonial>>>> {
    let testimonials = TestimonialRepo::list_by_type(&state.pool, &testimonial_type).await?;
    Ok(Json(DataResponse { data: testimonials }))
}

/// GET /api/v1/testimonials/{id}
pub async fn get_testimonial(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Testimonial>>> {
    let testimonial = TestimonialRepo::find_by_id(&state.pool, id)
        .await?
        .filter(|t| t.is_approved)
        .ok_or_else(|| testimonial_not_found(id))?;
    Ok(Json(DataResponse { data: testimonial }))
}

/// POST /api/v1/testimonials
pub async fn create_testimonial(
    State(state): State<AppState>,
    RequireEditor(_user): RequireEditor,
    Json(input): Json<CreateTestimonial>,
) -> AppResult<(StatusCode, Json<DataResponse<Testimonial>>)> {
    let mut errors = FieldErrors::new();
    validation::require(&mut errors, "name", &input.name);
    validation::require(&mut errors, "content", &input.content);
    if let Some(rating) = input.rating {
        validation::require_rating(&mut errors, "rating", rating);
    }
    if let Some(kind) = &input.testimonial_type {
        validation::require_choice(&mut errors, "testimonial_type", kind, VALID_TESTIMONIAL_TYPES);
    }
    errors.into_result().map_err(AppError::Core)?;

    let testimonial = TestimonialRepo::create(&state.pool, &input).await?;

    tracing::info!(testimonial_id = testimonial.id, "Testimonial created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: testimonial })))
}

/// PATCH /api/v1/testimonials/{id}
pub async fn update_testimonial(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    RequireEditor(_user): RequireEditor,
    Json(input): Json<UpdateTestimonial>,
) -> AppResult<Json<DataResponse<Testimonial>>> {
    let mut errors = FieldErrors::new();
    if let Some(rating) = input.rating {
        validation::require_rating(&mut errors, "rating", rating);
    }
    if let Some(kind) = &input.testimonial_type {
        validation::require_choice(&mut errors, "testimonial_type", kind, VALID_TESTIMONIAL_TYPES);
    }
    errors.into_result().map_err(AppError::Core)?;

    let testimonial = TestimonialRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| testimonial_not_found(id))?;

    tracing::info!(testimonial_id = testimonial.id, "Testimonial updated");
    Ok(Json(DataResponse { data: testimonial }))
}

/// DELETE /api/v1/testimonials/{id}
pub async fn delete_testimonial(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    RequireEditor(_user): RequireEditor,
) -> AppResult<StatusCode> {
    let deleted = TestimonialRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(testimonial_not_found(id));
    }

    tracing::info!(testimonial_id = id, "Testimonial deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Submissions
// ---------------------------------------------------------------------------

/// POST /api/v1/testimonials/submit
///
/// Public intake. All fields are validated up front; nothing is persisted on
/// failure. The stored submission starts unapproved.
pub async fn submit(
    State(state): State<AppState>,
    meta: ClientMeta,
    Json(input): Json<SubmitTestimonial>,
) -> AppResult<(StatusCode, Json<SubmissionResponse>)> {
    let name = input.name.unwrap_or_default();
    let email = input.email.unwrap_or_default();
    let content = input.content.unwrap_or_default();
    let rating = input.rating.unwrap_or(5);

    let mut errors = FieldErrors::new();
    validation::require(&mut errors, "name", &name);
    validation::require_email(&mut errors, "email", &email);
    validation::require_min_len(&mut errors, "content", &content, MIN_CONTENT_LEN);
    validation::require_rating(&mut errors, "rating", rating);
    validation::check_optional_url(&mut errors, "linkedin_url", input.linkedin_url.as_deref());
    errors.into_result().map_err(AppError::Core)?;

    let submission = TestimonialSubmissionRepo::create(
        &state.pool,
        &CreateTestimonialSubmission {
            name,
            email,
            title: input.title,
            company: input.company,
            content,
            rating,
            product_name: input.product_name,
            linkedin_url: input.linkedin_url,
            allow_contact: input.allow_contact.unwrap_or(false),
            ip_address: meta.ip_address,
            user_agent: meta.user_agent,
        },
    )
    .await?;

    tracing::info!(submission_id = submission.id, "Testimonial submission received");

    let (subject, body) = messages::testimonial_confirmation(&submission.name);
    send_best_effort(state.mailer.clone(), submission.email.clone(), subject, body);

    let (subject, body) = messages::testimonial_received(&submission.name, &submission.email);
    send_best_effort(state.mailer.clone(), state.config.admin_email.clone(), subject, body);

    Ok((
        StatusCode::CREATED,
        Json(SubmissionResponse {
            message: "Thank you for your testimonial",
            id: submission.id,
        }),
    ))
}

/// GET /api/v1/testimonials/submissions
///
/// Admin surface: anonymous 401, authenticated non-editors an empty list.
pub async fn list_submissions(
    State(state): State<AppState>,
    user: AuthUser,
    Query(pagination): Query<PaginationParams>,
    Query(params): Query<SubmissionListParams>,
) -> AppResult<Json<DataResponse<Vec<TestimonialSubmission>>>> {
    if !user.is_editor() {
        return Ok(Json(DataResponse { data: Vec::new() }));
    }
    let (limit, offset) = pagination.clamp();
    let submissions =
        TestimonialSubmissionRepo::list(&state.pool, params.is_approved, limit, offset).await?;
    Ok(Json(DataResponse { data: submissions }))
}

/// GET /api/v1/testimonials/submissions/{id}
pub async fn get_submission(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<TestimonialSubmission>>> {
    if !user.is_editor() {
        return Err(submission_not_found(id));
    }
    let submission = TestimonialSubmissionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| submission_not_found(id))?;
    Ok(Json(DataResponse { data: submission }))
}

/// PATCH /api/v1/testimonials/submissions/{id}
pub async fn update_submission(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    RequireEditor(_user): RequireEditor,
    Json(input): Json<UpdateTestimonialSubmission>,
) -> AppResult<Json<DataResponse<TestimonialSubmission>>> {
    let submission = TestimonialSubmissionRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| submission_not_found(id))?;

    tracing::info!(submission_id = submission.id, "Testimonial submission updated");
    Ok(Json(DataResponse { data: submission }))
}

/// POST /api/v1/testimonials/submissions/{id}/approve
///
/// Marks the submission approved and publishes exactly one testimonial built
/// from it. An already-approved submission 404s, so a repeated approval
/// cannot publish a duplicate.
pub async fn approve_submission(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    RequireEditor(_user): RequireEditor,
) -> AppResult<(StatusCode, Json<DataResponse<Testimonial>>)> {
    let testimonial = TestimonialSubmissionRepo::approve(&state.pool, id)
        .await?
        .ok_or_else(|| submission_not_found(id))?;

    tracing::info!(
        submission_id = id,
        testimonial_id = testimonial.id,
        "Testimonial submission approved"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: testimonial })))
}

/// GET /api/v1/testimonials/stats
pub async fn stats(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<TestimonialStats>>> {
    if !user.is_editor() {
        return Ok(Json(DataResponse {
            data: TestimonialStats::default(),
        }));
    }
    let stats = TestimonialRepo::stats(&state.pool).await?;
    Ok(Json(DataResponse { data: stats }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn testimonial_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "testimonial",
        id,
    })
}

fn submission_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "testimonial submission",
        id,
    })
}
