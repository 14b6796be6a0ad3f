//! Repository for the `testimonial_submissions` queue.

use sqlx::PgPool;

use atrium_core::types::DbId;

use crate::models::testimonial::{
    CreateTestimonialSubmission, Testimonial, TestimonialSubmission, UpdateTestimonialSubmission,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, email, title, company, content, rating, \
    product_name, linkedin_url, allow_contact, is_approved, admin_notes, \
    ip_address, user_agent, created_at, updated_at";

pub struct TestimonialSubmissionRepo;

impl TestimonialSubmissionRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateTestimonialSubmission,
    ) -> Result<TestimonialSubmission, sqlx::Error> {
        let query = format!(
            "INSERT INTO testimonial_submissions
                (name, email, title, company, content, rating, product_name,
                 linkedin_url, allow_contact, ip_address, user_agent)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TestimonialSubmission>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.title)
            .bind(&input.company)
            .bind(&input.content)
            .bind(input.rating)
            .bind(&input.product_name)
            .bind(&input.linkedin_url)
            .bind(input.allow_contact)
            .bind(&input.ip_address)
            .bind(&input.user_agent)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<TestimonialSubmission>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM testimonial_submissions WHERE id = $1");
        sqlx::query_as::<_, TestimonialSubmission>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Admin listing, newest first, optionally scoped to pending-only.
    pub async fn list(
        pool: &PgPool,
        is_approved: Option<bool>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<TestimonialSubmission>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM testimonial_submissions
             WHERE ($1::BOOL IS NULL OR is_approved = $1)
             ORDER BY created_at DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, TestimonialSubmission>(&query)
            .bind(is_approved)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Update the admin-mutable fields only.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTestimonialSubmission,
    ) -> Result<Option<TestimonialSubmission>, sqlx::Error> {
        let query = format!(
            "UPDATE testimonial_submissions SET
                is_approved = COALESCE($2, is_approved),
                admin_notes = COALESCE($3, admin_notes),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TestimonialSubmission>(&query)
            .bind(id)
            .bind(input.is_approved)
            .bind(&input.admin_notes)
            .fetch_optional(pool)
            .await
    }

    /// Approve a submission: mark it approved and publish a testimonial
    /// built from its fields, in one transaction.
    ///
    /// Returns `None` if the submission does not exist or was already
    /// approved, so repeated approvals never publish a second testimonial.
    pub async fn approve(pool: &PgPool, id: DbId) -> Result<Option<Testimonial>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE testimonial_submissions
             SET is_approved = TRUE, updated_at = NOW()
             WHERE id = $1 AND is_approved = FALSE
             RETURNING {COLUMNS}"
        );
        let submission = sqlx::query_as::<_, TestimonialSubmission>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(submission) = submission else {
            tx.rollback().await?;
            return Ok(None);
        };

        let testimonial = sqlx::query_as::<_, Testimonial>(
            "INSERT INTO testimonials
                (name, title, company, content, rating, product_name,
                 linkedin_url, is_approved)
             VALUES ($1, $2, $3, $4, $5, $6, $7, TRUE)
             RETURNING id, name, title, company, avatar_url, content, rating,
                       testimonial_type, product_name, linkedin_url,
                       twitter_url, website_url, is_featured, is_approved,
                       sort_order, created_at, updated_at",
        )
        .bind(&submission.name)
        .bind(&submission.title)
        .bind(&submission.company)
        .bind(&submission.content)
        .bind(submission.rating)
        .bind(&submission.product_name)
        .bind(&submission.linkedin_url)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(testimonial))
    }
}
