//! Repository for the `job_applications` table.

use std::collections::BTreeMap;

use sqlx::PgPool;

use atrium_core::choices::POSITION_STATUS_OPEN;
use atrium_core::types::DbId;

use crate::models::career::{CareerStats, CreateJobApplication, JobApplication, UpdateJobApplication};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, position_id, first_name, last_name, email, phone, \
    location, cover_letter, resume_path, portfolio_url, github_url, \
    linkedin_url, years_of_experience, current_salary, expected_salary, \
    status, admin_notes, ip_address, user_agent, created_at, updated_at";

pub struct ApplicationRepo;

impl ApplicationRepo {
    /// Insert a new application with status `submitted`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateJobApplication,
    ) -> Result<JobApplication, sqlx::Error> {
        let query = format!(
            "INSERT INTO job_applications
                (position_id, first_name, last_name, email, phone, location,
                 cover_letter, resume_path, portfolio_url, github_url,
                 linkedin_url, years_of_experience, current_salary,
                 expected_salary, ip_address, user_agent)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
                     $11, $12, $13, $14, $15, $16)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, JobApplication>(&query)
            .bind(input.position_id)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.location)
            .bind(&input.cover_letter)
            .bind(&input.resume_path)
            .bind(&input.portfolio_url)
            .bind(&input.github_url)
            .bind(&input.linkedin_url)
            .bind(input.years_of_experience)
            .bind(input.current_salary)
            .bind(input.expected_salary)
            .bind(&input.ip_address)
            .bind(&input.user_agent)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<JobApplication>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM job_applications WHERE id = $1");
        sqlx::query_as::<_, JobApplication>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Admin listing, newest first, optionally scoped to one position or
    /// status.
    pub async fn list(
        pool: &PgPool,
        position_id: Option<DbId>,
        status: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<JobApplication>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM job_applications
             WHERE ($1::BIGINT IS NULL OR position_id = $1)
               AND ($2::TEXT IS NULL OR status = $2)
             ORDER BY created_at DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, JobApplication>(&query)
            .bind(position_id)
            .bind(status)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Update the admin-mutable fields only.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateJobApplication,
    ) -> Result<Option<JobApplication>, sqlx::Error> {
        let query = format!(
            "UPDATE job_applications SET
                status = COALESCE($2, status),
                admin_notes = COALESCE($3, admin_notes),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, JobApplication>(&query)
            .bind(id)
            .bind(&input.status)
            .bind(&input.admin_notes)
            .fetch_optional(pool)
            .await
    }

    /// One-snapshot aggregate counts for the editor dashboard.
    pub async fn stats(pool: &PgPool) -> Result<CareerStats, sqlx::Error> {
        let (total_positions, open_positions): (i64, i64) = sqlx::query_as(&format!(
            "SELECT COUNT(*), COUNT(*) FILTER (WHERE status = '{POSITION_STATUS_OPEN}')
             FROM job_positions"
        ))
        .fetch_one(pool)
        .await?;

        let (total_applications, recent_applications): (i64, i64) = sqlx::query_as(
            "SELECT COUNT(*),
                    COUNT(*) FILTER (WHERE created_at >= NOW() - INTERVAL '30 days')
             FROM job_applications",
        )
        .fetch_one(pool)
        .await?;

        let by_status: Vec<(String, i64)> =
            sqlx::query_as("SELECT status, COUNT(*) FROM job_applications GROUP BY status")
                .fetch_all(pool)
                .await?;

        let by_department: Vec<(String, i64)> =
            sqlx::query_as("SELECT department, COUNT(*) FROM job_positions GROUP BY department")
                .fetch_all(pool)
                .await?;

        let (average_experience,): (f64,) = sqlx::query_as(
            "SELECT COALESCE(AVG(years_of_experience)::float8, 0.0) FROM job_applications",
        )
        .fetch_one(pool)
        .await?;

        Ok(CareerStats {
            total_positions,
            open_positions,
            total_applications,
            recent_applications,
            by_status: by_status.into_iter().collect::<BTreeMap<_, _>>(),
            by_department: by_department.into_iter().collect::<BTreeMap<_, _>>(),
            average_experience,
        })
    }
}
