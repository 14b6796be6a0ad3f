//! Shared response envelope types for API handlers.
//!
//! All API responses use a `{ "data": ... }` envelope per project conventions.
//! Use [`DataResponse`] instead of ad-hoc `serde_json::json!({ "data": ... })`
//! to get compile-time type safety and consistent serialization.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Acknowledgement body for submission endpoints: a human-readable message
/// plus the identifier of the stored record.
#[derive(Debug, Serialize)]
pub struct SubmissionResponse {
    pub message: &'static str,
    pub id: atrium_core::types::DbId,
}
