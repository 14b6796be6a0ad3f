//! Contact-message models.

use std::collections::BTreeMap;

use atrium_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `contacts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Contact {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub inquiry_type: String,
    pub message: String,
    pub status: String,
    pub admin_notes: Option<String>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Raw public contact payload, validated field by field in the handler.
#[derive(Debug, Deserialize)]
pub struct SubmitContact {
    pub name: Option<String>,
    pub email: Option<String>,
    pub inquiry_type: Option<String>,
    pub message: Option<String>,
}

/// Validated contact fields ready for insert.
#[derive(Debug)]
pub struct CreateContact {
    pub name: String,
    pub email: String,
    pub inquiry_type: String,
    pub message: String,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

/// Admin-mutable fields. The submitter's data is immutable.
#[derive(Debug, Deserialize)]
pub struct UpdateContact {
    pub status: Option<String>,
    pub admin_notes: Option<String>,
}

/// Query params for the admin contact listing.
#[derive(Debug, Default, Deserialize)]
pub struct ContactFilter {
    pub status: Option<String>,
    pub inquiry_type: Option<String>,
}

/// Editor-facing aggregate snapshot.
#[derive(Debug, Default, Serialize)]
pub struct ContactStats {
    pub total: i64,
    pub new: i64,
    pub recent: i64,
    pub by_inquiry_type: BTreeMap<String, i64>,
    pub by_status: BTreeMap<String, i64>,
}
