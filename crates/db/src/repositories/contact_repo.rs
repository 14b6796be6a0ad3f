//! Repository for the `contacts` table.

use std::collections::BTreeMap;

use sqlx::PgPool;

use atrium_core::choices::CONTACT_STATUS_NEW;
use atrium_core::types::DbId;

use crate::models::contact::{Contact, ContactFilter, ContactStats, CreateContact, UpdateContact};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, email, inquiry_type, message, status, \
    admin_notes, ip_address, user_agent, created_at, updated_at";

pub struct ContactRepo;

impl ContactRepo {
    /// Insert a new message with status `new`.
    pub async fn create(pool: &PgPool, input: &CreateContact) -> Result<Contact, sqlx::Error> {
        let query = format!(
            "INSERT INTO contacts (name, email, inquiry_type, message, ip_address, user_agent)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Contact>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.inquiry_type)
            .bind(&input.message)
            .bind(&input.ip_address)
            .bind(&input.user_agent)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Contact>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM contacts WHERE id = $1");
        sqlx::query_as::<_, Contact>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Admin listing, newest first.
    pub async fn list(
        pool: &PgPool,
        filter: &ContactFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Contact>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM contacts
             WHERE ($1::TEXT IS NULL OR status = $1)
               AND ($2::TEXT IS NULL OR inquiry_type = $2)
             ORDER BY created_at DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Contact>(&query)
            .bind(&filter.status)
            .bind(&filter.inquiry_type)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Update the admin-mutable fields only; the submitter's data never
    /// changes.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateContact,
    ) -> Result<Option<Contact>, sqlx::Error> {
        let query = format!(
            "UPDATE contacts SET
                status = COALESCE($2, status),
                admin_notes = COALESCE($3, admin_notes),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Contact>(&query)
            .bind(id)
            .bind(&input.status)
            .bind(&input.admin_notes)
            .fetch_optional(pool)
            .await
    }

    /// One-snapshot aggregate counts for the editor dashboard.
    pub async fn stats(pool: &PgPool) -> Result<ContactStats, sqlx::Error> {
        let (total, new, recent): (i64, i64, i64) = sqlx::query_as(&format!(
            "SELECT COUNT(*),
                    COUNT(*) FILTER (WHERE status = '{CONTACT_STATUS_NEW}'),
                    COUNT(*) FILTER (WHERE created_at >= NOW() - INTERVAL '30 days')
             FROM contacts"
        ))
        .fetch_one(pool)
        .await?;

        let by_inquiry_type: Vec<(String, i64)> =
            sqlx::query_as("SELECT inquiry_type, COUNT(*) FROM contacts GROUP BY inquiry_type")
                .fetch_all(pool)
                .await?;

        let by_status: Vec<(String, i64)> =
            sqlx::query_as("SELECT status, COUNT(*) FROM contacts GROUP BY status")
                .fetch_all(pool)
                .await?;

        Ok(ContactStats {
            total,
            new,
            recent,
            by_inquiry_type: by_inquiry_type.into_iter().collect::<BTreeMap<_, _>>(),
            by_status: by_status.into_iter().collect::<BTreeMap<_, _>>(),
        })
    }
}
