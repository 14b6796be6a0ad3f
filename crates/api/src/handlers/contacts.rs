//! Handlers for the `/contacts` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use atrium_core::choices::{INQUIRY_GENERAL, VALID_CONTACT_STATUSES, VALID_INQUIRY_TYPES};
use atrium_core::error::CoreError;
use atrium_core::types::DbId;
use atrium_core::validation::{self, FieldErrors};
use atrium_db::models::contact::{
    Contact, ContactFilter, ContactStats, CreateContact, SubmitContact, UpdateContact,
};
use atrium_db::repositories::ContactRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::client_meta::ClientMeta;
use crate::middleware::rbac::RequireEditor;
use crate::notify::{messages, send_best_effort};
use crate::query::PaginationParams;
use crate::response::{DataResponse, SubmissionResponse};
use crate::state::AppState;

/// Minimum length of a contact message.
const MIN_MESSAGE_LEN: usize = 10;

/// POST /api/v1/contacts
///
/// Public intake. All fields are validated up front; nothing is persisted on
/// failure. The admin address is notified after the row is committed.
pub async fn submit(
    State(state): State<AppState>,
    meta: ClientMeta,
    Json(input): Json<SubmitContact>,
) -> AppResult<(StatusCode, Json<SubmissionResponse>)> {
    let name = input.name.unwrap_or_default();
    let email = input.email.unwrap_or_default();
    let message = input.message.unwrap_or_default();
    let inquiry_type = input
        .inquiry_type
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| INQUIRY_GENERAL.to_string());

    let mut errors = FieldErrors::new();
    validation::require(&mut errors, "name", &name);
    validation::require_email(&mut errors, "email", &email);
    validation::require_min_len(&mut errors, "message", &message, MIN_MESSAGE_LEN);
    validation::require_choice(&mut errors, "inquiry_type", &inquiry_type, VALID_INQUIRY_TYPES);
    errors.into_result().map_err(AppError::Core)?;

    let contact = ContactRepo::create(
        &state.pool,
        &CreateContact {
            name,
            email,
            inquiry_type,
            message,
            ip_address: meta.ip_address,
            user_agent: meta.user_agent,
        },
    )
    .await?;

    tracing::info!(contact_id = contact.id, "Contact message received");

    let (subject, body) = messages::contact_received(
        &contact.name,
        &contact.email,
        &contact.inquiry_type,
        &contact.message,
    );
    send_best_effort(state.mailer.clone(), state.config.admin_email.clone(), subject, body);

    Ok((
        StatusCode::CREATED,
        Json(SubmissionResponse {
            message: "Thank you for reaching out. We will get back to you soon.",
            id: contact.id,
        }),
    ))
}

/// GET /api/v1/contacts
///
/// Admin surface: anonymous 401, authenticated non-editors an empty list.
pub async fn list_contacts(
    State(state): State<AppState>,
    user: AuthUser,
    Query(pagination): Query<PaginationParams>,
    Query(filter): Query<ContactFilter>,
) -> AppResult<Json<DataResponse<Vec<Contact>>>> {
    if !user.is_editor() {
        return Ok(Json(DataResponse { data: Vec::new() }));
    }
    let (limit, offset) = pagination.clamp();
    let contacts = ContactRepo::list(&state.pool, &filter, limit, offset).await?;
    Ok(Json(DataResponse { data: contacts }))
}

/// GET /api/v1/contacts/{id}
pub async fn get_contact(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Contact>>> {
    if !user.is_editor() {
        return Err(not_found(id));
    }
    let contact = ContactRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: contact }))
}

/// PATCH /api/v1/contacts/{id}
///
/// Only the triage status and admin notes are mutable.
pub async fn update_contact(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    RequireEditor(_user): RequireEditor,
    Json(input): Json<UpdateContact>,
) -> AppResult<Json<DataResponse<Contact>>> {
    let mut errors = FieldErrors::new();
    if let Some(status) = &input.status {
        validation::require_choice(&mut errors, "status", status, VALID_CONTACT_STATUSES);
    }
    errors.into_result().map_err(AppError::Core)?;

    let contact = ContactRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(contact_id = contact.id, status = %contact.status, "Contact updated");
    Ok(Json(DataResponse { data: contact }))
}

/// GET /api/v1/contacts/stats
pub async fn stats(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<ContactStats>>> {
    if !user.is_editor() {
        return Ok(Json(DataResponse {
            data: ContactStats::default(),
        }));
    }
    let stats = ContactRepo::stats(&state.pool).await?;
    Ok(Json(DataResponse { data: stats }))
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "contact",
        id,
    })
}
