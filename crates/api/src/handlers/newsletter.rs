//! Handlers for the `/newsletter` resource.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use atrium_core::validation::{self, FieldErrors};
use atrium_db::models::newsletter::{
    NewsletterStats, NewsletterSubscription, SubscribeRequest, SubscriptionFilter,
    UnsubscribeRequest,
};
use atrium_db::repositories::NewsletterRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::client_meta::ClientMeta;
use crate::notify::{messages, send_best_effort};
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Response for subscribe: echoes the normalized email back.
#[derive(Debug, Serialize)]
pub struct SubscribeResponse {
    pub message: &'static str,
    pub email: String,
}

/// POST /api/v1/newsletter/subscribe
///
/// Idempotent: re-subscribing an active email reuses the row; an inactive
/// row is reactivated. A given email never has two rows.
pub async fn subscribe(
    State(state): State<AppState>,
    meta: ClientMeta,
    Json(input): Json<SubscribeRequest>,
) -> AppResult<(StatusCode, Json<SubscribeResponse>)> {
    let email = input.email.unwrap_or_default().trim().to_lowercase();

    let mut errors = FieldErrors::new();
    validation::require_email(&mut errors, "email", &email);
    errors.into_result().map_err(AppError::Core)?;

    let subscription = NewsletterRepo::subscribe(
        &state.pool,
        &email,
        input.source.as_deref(),
        meta.ip_address.as_deref(),
        meta.user_agent.as_deref(),
    )
    .await?;

    tracing::info!(subscription_id = subscription.id, "Newsletter subscription");

    let (subject, body) = messages::newsletter_welcome(&state.config.site_url);
    send_best_effort(state.mailer.clone(), subscription.email.clone(), subject, body);

    Ok((
        StatusCode::CREATED,
        Json(SubscribeResponse {
            message: "Subscribed successfully",
            email: subscription.email,
        }),
    ))
}

/// POST /api/v1/newsletter/unsubscribe
///
/// Requires an active subscription; unknown or already-inactive emails get
/// 400 and nothing changes.
pub async fn unsubscribe(
    State(state): State<AppState>,
    Json(input): Json<UnsubscribeRequest>,
) -> AppResult<Json<SubscribeResponse>> {
    let email = input.email.unwrap_or_default().trim().to_lowercase();

    let mut errors = FieldErrors::new();
    validation::require_email(&mut errors, "email", &email);
    errors.into_result().map_err(AppError::Core)?;

    let subscription = NewsletterRepo::unsubscribe(&state.pool, &email)
        .await?
        .ok_or_else(|| {
            AppError::BadRequest("No active subscription found for this email".into())
        })?;

    tracing::info!(subscription_id = subscription.id, "Newsletter unsubscribe");

    let (subject, body) = messages::newsletter_unsubscribed();
    send_best_effort(state.mailer.clone(), subscription.email.clone(), subject, body);

    Ok(Json(SubscribeResponse {
        message: "Unsubscribed successfully",
        email: subscription.email,
    }))
}

/// GET /api/v1/newsletter/subscriptions
///
/// Admin surface: anonymous 401, authenticated non-editors an empty list.
pub async fn list_subscriptions(
    State(state): State<AppState>,
    user: AuthUser,
    Query(pagination): Query<PaginationParams>,
    Query(filter): Query<SubscriptionFilter>,
) -> AppResult<Json<DataResponse<Vec<NewsletterSubscription>>>> {
    if !user.is_editor() {
        return Ok(Json(DataResponse { data: Vec::new() }));
    }
    let (limit, offset) = pagination.clamp();
    let subscriptions = NewsletterRepo::list(&state.pool, &filter, limit, offset).await?;
    Ok(Json(DataResponse { data: subscriptions }))
}

/// GET /api/v1/newsletter/stats
pub async fn stats(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<NewsletterStats>>> {
    if !user.is_editor() {
        return Ok(Json(DataResponse {
            data: NewsletterStats::default(),
        }));
    }
    let stats = NewsletterRepo::stats(&state.pool).await?;
    Ok(Json(DataResponse { data: stats }))
}
