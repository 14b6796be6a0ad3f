//! Handlers for the `/careers` resource: positions, applications, stats.

use std::path::PathBuf;

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use atrium_core::choices::{
    POSITION_STATUS_OPEN, VALID_APPLICATION_STATUSES, VALID_JOB_LEVELS, VALID_JOB_TYPES,
    VALID_POSITION_STATUSES,
};
use atrium_core::error::CoreError;
use atrium_core::markdown;
use atrium_core::slug::slugify;
use atrium_core::types::DbId;
use atrium_core::validation::{self, FieldErrors, MAX_UPLOAD_SIZE, RESUME_MIME_TYPES};
use atrium_db::models::career::{
    CareerStats, CreateJobApplication, CreateJobPosition, JobApplication, JobPosition, JobSkill,
    PositionFilter, UpdateJobApplication, UpdateJobPosition,
};
use atrium_db::repositories::{ApplicationRepo, PositionRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::client_meta::ClientMeta;
use crate::middleware::rbac::RequireEditor;
use crate::notify::{messages, send_best_effort};
use crate::query::PaginationParams;
use crate::response::{DataResponse, SubmissionResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Detail shape: the position row plus skills and rendered Markdown fields.
#[derive(Debug, Serialize)]
pub struct PositionDetail {
    #[serde(flatten)]
    pub position: JobPosition,
    pub description_html: String,
    pub skills: Vec<JobSkill>,
}

/// Query params for the admin application listing.
#[derive(Debug, Default, Deserialize)]
pub struct ApplicationListParams {
    pub position_id: Option<DbId>,
    pub status: Option<String>,
}

/// Raw multipart fields collected before validation.
#[derive(Debug, Default)]
struct ApplicationForm {
    first_name: String,
    last_name: String,
    email: String,
    phone: Option<String>,
    location: Option<String>,
    cover_letter: Option<String>,
    portfolio_url: Option<String>,
    github_url: Option<String>,
    linkedin_url: Option<String>,
    years_of_experience: Option<String>,
    current_salary: Option<String>,
    expected_salary: Option<String>,
    resume: Option<ResumeUpload>,
}

#[derive(Debug)]
struct ResumeUpload {
    filename: String,
    content_type: String,
    data: Vec<u8>,
}

async fn load_detail(state: &AppState, position: JobPosition) -> AppResult<PositionDetail> {
    let skills = PositionRepo::list_skills(&state.pool, position.id).await?;
    let description_html = markdown::render(&position.description);
    Ok(PositionDetail {
        position,
        description_html,
        skills,
    })
}

// ---------------------------------------------------------------------------
// Positions
// ---------------------------------------------------------------------------

/// GET /api/v1/careers/positions
pub async fn list_positions(
    State(state): State<AppState>,
    Query(pagination): Query<PaginationParams>,
    Query(filter): Query<PositionFilter>,
) -> AppResult<Json<DataResponse<Vec<JobPosition>>>> {
    let (limit, offset) = pagination.clamp();
    let positions = PositionRepo::list(&state.pool, &filter, limit, offset).await?;
    Ok(Json(DataResponse { data: positions }))
}

/// GET /api/v1/careers/positions/open
pub async fn list_open_positions(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<JobPosition>>>> {
    let positions = PositionRepo::list_open(&state.pool).await?;
    Ok(Json(DataResponse { data: positions }))
}

/// GET /api/v1/careers/positions/{slug}
pub async fn get_position(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<DataResponse<PositionDetail>>> {
    let position = PositionRepo::find_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| position_not_found(&slug))?;
    let detail = load_detail(&state, position).await?;
    Ok(Json(DataResponse { data: detail }))
}

/// POST /api/v1/careers/positions
///
/// The slug is derived from "title department" so the same role can exist in
/// different departments.
pub async fn create_position(
    State(state): State<AppState>,
    RequireEditor(_user): RequireEditor,
    Json(input): Json<CreateJobPosition>,
) -> AppResult<(StatusCode, Json<DataResponse<PositionDetail>>)> {
    let mut errors = FieldErrors::new();
    validation::require(&mut errors, "title", &input.title);
    validation::require(&mut errors, "department", &input.department);
    validation::require(&mut errors, "location", &input.location);
    validation::require(&mut errors, "description", &input.description);
    validation::require_choice(&mut errors, "job_type", &input.job_type, VALID_JOB_TYPES);
    validation::require_choice(&mut errors, "level", &input.level, VALID_JOB_LEVELS);
    if let Some(status) = &input.status {
        validation::require_choice(&mut errors, "status", status, VALID_POSITION_STATUSES);
    }
    errors.into_result().map_err(AppError::Core)?;

    let slug = slugify(&format!("{} {}", input.title, input.department));
    let position = PositionRepo::create(&state.pool, &input, &slug).await?;

    tracing::info!(position_id = position.id, slug = %position.slug, "Job position created");
    let detail = load_detail(&state, position).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: detail })))
}

/// PATCH /api/v1/careers/positions/{slug}
pub async fn update_position(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    RequireEditor(_user): RequireEditor,
    Json(input): Json<UpdateJobPosition>,
) -> AppResult<Json<DataResponse<PositionDetail>>> {
    let mut errors = FieldErrors::new();
    if let Some(job_type) = &input.job_type {
        validation::require_choice(&mut errors, "job_type", job_type, VALID_JOB_TYPES);
    }
    if let Some(level) = &input.level {
        validation::require_choice(&mut errors, "level", level, VALID_JOB_LEVELS);
    }
    if let Some(status) = &input.status {
        validation::require_choice(&mut errors, "status", status, VALID_POSITION_STATUSES);
    }
    errors.into_result().map_err(AppError::Core)?;

    let existing = PositionRepo::find_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| position_not_found(&slug))?;

    let position = PositionRepo::update(&state.pool, existing.id, &input)
        .await?
        .ok_or_else(|| position_not_found(&slug))?;

    tracing::info!(position_id = position.id, "Job position updated");
    let detail = load_detail(&state, position).await?;
    Ok(Json(DataResponse { data: detail }))
}

/// DELETE /api/v1/careers/positions/{slug}
pub async fn delete_position(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    RequireEditor(_user): RequireEditor,
) -> AppResult<StatusCode> {
    let existing = PositionRepo::find_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| position_not_found(&slug))?;
    PositionRepo::delete(&state.pool, existing.id).await?;

    tracing::info!(position_id = existing.id, "Job position deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Applications
// ---------------------------------------------------------------------------

/// POST /api/v1/careers/positions/{slug}/apply
///
/// Public multipart submission. The position must be open; a closed, paused,
/// or filled position is indistinguishable from an absent one (404). All
/// fields are validated before anything is persisted or written to disk.
pub async fn apply(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    meta: ClientMeta,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<SubmissionResponse>)> {
    let position = PositionRepo::find_by_slug(&state.pool, &slug)
        .await?
        .filter(|p| p.status == POSITION_STATUS_OPEN)
        .ok_or_else(|| position_not_found(&slug))?;

    let form = read_application_form(multipart).await?;

    let mut errors = FieldErrors::new();
    validation::require(&mut errors, "first_name", &form.first_name);
    validation::require(&mut errors, "last_name", &form.last_name);
    validation::require_email(&mut errors, "email", &form.email);
    validation::check_optional_phone(&mut errors, "phone", form.phone.as_deref());
    validation::check_optional_url(&mut errors, "portfolio_url", form.portfolio_url.as_deref());
    validation::check_optional_url(&mut errors, "github_url", form.github_url.as_deref());
    validation::check_optional_url(&mut errors, "linkedin_url", form.linkedin_url.as_deref());
    if let Some(resume) = &form.resume {
        if resume.data.len() > MAX_UPLOAD_SIZE {
            errors.add("resume", "File must be 5 MB or smaller.");
        }
        if !RESUME_MIME_TYPES.contains(&resume.content_type.as_str()) {
            errors.add("resume", "Only PDF, DOC, and DOCX files are accepted.");
        }
    }
    let years_of_experience =
        parse_optional_int(&mut errors, "years_of_experience", form.years_of_experience.as_deref());
    let current_salary =
        parse_optional_int(&mut errors, "current_salary", form.current_salary.as_deref());
    let expected_salary =
        parse_optional_int(&mut errors, "expected_salary", form.expected_salary.as_deref());
    errors.into_result().map_err(AppError::Core)?;

    let resume_path = match &form.resume {
        Some(resume) => Some(store_resume(&state, resume).await?),
        None => None,
    };

    let application = ApplicationRepo::create(
        &state.pool,
        &CreateJobApplication {
            position_id: position.id,
            first_name: form.first_name,
            last_name: form.last_name,
            email: form.email,
            phone: form.phone,
            location: form.location,
            cover_letter: form.cover_letter,
            resume_path,
            portfolio_url: form.portfolio_url,
            github_url: form.github_url,
            linkedin_url: form.linkedin_url,
            years_of_experience,
            current_salary,
            expected_salary,
            ip_address: meta.ip_address,
            user_agent: meta.user_agent,
        },
    )
    .await?;

    tracing::info!(
        application_id = application.id,
        position_id = position.id,
        "Job application received"
    );

    let (subject, body) = messages::application_confirmation(&application.first_name, &position.title);
    send_best_effort(state.mailer.clone(), application.email.clone(), subject, body);

    let applicant_name = format!("{} {}", application.first_name, application.last_name);
    let (subject, body) =
        messages::application_received(&applicant_name, &application.email, &position.title);
    send_best_effort(state.mailer.clone(), state.config.admin_email.clone(), subject, body);

    Ok((
        StatusCode::CREATED,
        Json(SubmissionResponse {
            message: "Application submitted successfully",
            id: application.id,
        }),
    ))
}

/// GET /api/v1/careers/applications
///
/// Admin surface: anonymous callers get 401; authenticated non-editors get
/// an empty list (existence hiding).
pub async fn list_applications(
    State(state): State<AppState>,
    user: AuthUser,
    Query(pagination): Query<PaginationParams>,
    Query(params): Query<ApplicationListParams>,
) -> AppResult<Json<DataResponse<Vec<JobApplication>>>> {
    if !user.is_editor() {
        return Ok(Json(DataResponse { data: Vec::new() }));
    }
    let (limit, offset) = pagination.clamp();
    let applications = ApplicationRepo::list(
        &state.pool,
        params.position_id,
        params.status.as_deref(),
        limit,
        offset,
    )
    .await?;
    Ok(Json(DataResponse { data: applications }))
}

/// GET /api/v1/careers/applications/{id}
///
/// Non-editors get a 404 rather than a 403, hiding whether the row exists.
pub async fn get_application(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<JobApplication>>> {
    if !user.is_editor() {
        return Err(application_not_found(id));
    }
    let application = ApplicationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| application_not_found(id))?;
    Ok(Json(DataResponse { data: application }))
}

/// PATCH /api/v1/careers/applications/{id}
///
/// Only the review status and admin notes are mutable.
pub async fn update_application(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    RequireEditor(_user): RequireEditor,
    Json(input): Json<UpdateJobApplication>,
) -> AppResult<Json<DataResponse<JobApplication>>> {
    let mut errors = FieldErrors::new();
    if let Some(status) = &input.status {
        validation::require_choice(&mut errors, "status", status, VALID_APPLICATION_STATUSES);
    }
    errors.into_result().map_err(AppError::Core)?;

    let application = ApplicationRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| application_not_found(id))?;

    tracing::info!(application_id = application.id, "Job application updated");
    Ok(Json(DataResponse { data: application }))
}

/// GET /api/v1/careers/stats
pub async fn stats(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<CareerStats>>> {
    if !user.is_editor() {
        return Ok(Json(DataResponse {
            data: CareerStats::default(),
        }));
    }
    let stats = ApplicationRepo::stats(&state.pool).await?;
    Ok(Json(DataResponse { data: stats }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Drain the multipart stream into an [`ApplicationForm`].
async fn read_application_form(mut multipart: Multipart) -> AppResult<ApplicationForm> {
    let mut form = ApplicationForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let Some(name) = field.name().map(|n| n.to_string()) else {
            continue;
        };

        if name == "resume" {
            let filename = field.file_name().unwrap_or("resume").to_string();
            let content_type = field.content_type().unwrap_or_default().to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            form.resume = Some(ResumeUpload {
                filename,
                content_type,
                data: data.to_vec(),
            });
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        let trimmed = value.trim().to_string();
        let optional = (!trimmed.is_empty()).then(|| trimmed.clone());

        match name.as_str() {
            "first_name" => form.first_name = trimmed,
            "last_name" => form.last_name = trimmed,
            "email" => form.email = trimmed,
            "phone" => form.phone = optional,
            "location" => form.location = optional,
            "cover_letter" => form.cover_letter = optional,
            "portfolio_url" => form.portfolio_url = optional,
            "github_url" => form.github_url = optional,
            "linkedin_url" => form.linkedin_url = optional,
            "years_of_experience" => form.years_of_experience = optional,
            "current_salary" => form.current_salary = optional,
            "expected_salary" => form.expected_salary = optional,
            _ => {}
        }
    }

    Ok(form)
}

/// Write the resume under the upload dir with a random filename, keeping the
/// original extension. Returns the stored path.
async fn store_resume(state: &AppState, resume: &ResumeUpload) -> AppResult<String> {
    let upload_dir = PathBuf::from(&state.config.upload_dir).join("resumes");
    tokio::fs::create_dir_all(&upload_dir)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to create upload dir: {e}")))?;

    let extension = std::path::Path::new(&resume.filename)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("bin");
    let dest = upload_dir.join(format!("{}.{extension}", Uuid::new_v4()));

    tokio::fs::write(&dest, &resume.data)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to store resume: {e}")))?;

    Ok(dest.to_string_lossy().into_owned())
}

/// Optional numeric form field: absent is fine, a present value must parse
/// as an integer.
fn parse_optional_int(errors: &mut FieldErrors, field: &str, value: Option<&str>) -> Option<i32> {
    let value = value?;
    match value.parse() {
        Ok(n) => Some(n),
        Err(_) => {
            errors.add(field, "Enter a whole number.");
            None
        }
    }
}

fn position_not_found(slug: &str) -> AppError {
    AppError::Core(CoreError::NotFoundSlug {
        entity: "job position",
        slug: slug.to_string(),
    })
}

fn application_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "job application",
        id,
    })
}
