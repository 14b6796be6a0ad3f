//! Repository for the `testimonials` table.

use std::collections::BTreeMap;

use sqlx::PgPool;

use atrium_core::choices::TESTIMONIAL_TYPE_CUSTOMER;
use atrium_core::types::DbId;

use crate::models::testimonial::{
    CreateTestimonial, Testimonial, TestimonialFilter, TestimonialStats, UpdateTestimonial,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, title, company, avatar_url, content, rating, \
    testimonial_type, product_name, linkedin_url, twitter_url, website_url, \
    is_featured, is_approved, sort_order, created_at, updated_at";

pub struct TestimonialRepo;

impl TestimonialRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateTestimonial,
    ) -> Result<Testimonial, sqlx::Error> {
        let query = format!(
            "INSERT INTO testimonials
                (name, title, company, avatar_url, content, rating,
                 testimonial_type, product_name, linkedin_url, twitter_url,
                 website_url, is_featured, is_approved, sort_order)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Testimonial>(&query)
            .bind(&input.name)
            .bind(&input.title)
            .bind(&input.company)
            .bind(&input.avatar_url)
            .bind(&input.content)
            .bind(input.rating.unwrap_or(5))
            .bind(input.testimonial_type.as_deref().unwrap_or(TESTIMONIAL_TYPE_CUSTOMER))
            .bind(&input.product_name)
            .bind(&input.linkedin_url)
            .bind(&input.twitter_url)
            .bind(&input.website_url)
            .bind(input.is_featured.unwrap_or(false))
            .bind(input.is_approved.unwrap_or(true))
            .bind(input.sort_order.unwrap_or(0))
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Testimonial>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM testimonials WHERE id = $1");
        sqlx::query_as::<_, Testimonial>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Public listing: approved entries only.
    pub async fn list_approved(
        pool: &PgPool,
        filter: &TestimonialFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Testimonial>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM testimonials
             WHERE is_approved = TRUE
               AND ($1::TEXT IS NULL OR testimonial_type = $1)
               AND ($2::INT IS NULL OR rating = $2)
               AND ($3::BOOL IS NULL OR is_featured = $3)
             ORDER BY sort_order, created_at DESC
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, Testimonial>(&query)
            .bind(&filter.testimonial_type)
            .bind(filter.rating)
            .bind(filter.is_featured)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn list_featured(pool: &PgPool, limit: i64) -> Result<Vec<Testimonial>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM testimonials
             WHERE is_approved = TRUE AND is_featured = TRUE
             ORDER BY sort_order, created_at DESC
             LIMIT $1"
        );
        sqlx::query_as::<_, Testimonial>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    pub async fn list_by_type(
        pool: &PgPool,
        testimonial_type: &str,
    ) -> Result<Vec<Testimonial>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM testimonials
             WHERE is_approved = TRUE AND testimonial_type = $1
             ORDER BY sort_order, created_at DESC"
        );
        sqlx::query_as::<_, Testimonial>(&query)
            .bind(testimonial_type)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTestimonial,
    ) -> Result<Option<Testimonial>, sqlx::Error> {
        let query = format!(
            "UPDATE testimonials SET
                name = COALESCE($2, name),
                title = COALESCE($3, title),
                company = COALESCE($4, company),
                avatar_url = COALESCE($5, avatar_url),
                content = COALESCE($6, content),
                rating = COALESCE($7, rating),
                testimonial_type = COALESCE($8, testimonial_type),
                product_name = COALESCE($9, product_name),
                linkedin_url = COALESCE($10, linkedin_url),
                twitter_url = COALESCE($11, twitter_url),
                website_url = COALESCE($12, website_url),
                is_featured = COALESCE($13, is_featured),
                is_approved = COALESCE($14, is_approved),
                sort_order = COALESCE($15, sort_order),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Testimonial>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.title)
            .bind(&input.company)
            .bind(&input.avatar_url)
            .bind(&input.content)
            .bind(input.rating)
            .bind(&input.testimonial_type)
            .bind(&input.product_name)
            .bind(&input.linkedin_url)
            .bind(&input.twitter_url)
            .bind(&input.website_url)
            .bind(input.is_featured)
            .bind(input.is_approved)
            .bind(input.sort_order)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM testimonials WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// One-snapshot aggregate counts for the editor dashboard.
    pub async fn stats(pool: &PgPool) -> Result<TestimonialStats, sqlx::Error> {
        let (total, featured_count): (i64, i64) = sqlx::query_as(
            "SELECT COUNT(*) FILTER (WHERE is_approved),
                    COUNT(*) FILTER (WHERE is_approved AND is_featured)
             FROM testimonials",
        )
        .fetch_one(pool)
        .await?;

        let (pending_submissions,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM testimonial_submissions WHERE is_approved = FALSE",
        )
        .fetch_one(pool)
        .await?;

        let (average_rating,): (f64,) = sqlx::query_as(
            "SELECT COALESCE(AVG(rating)::float8, 0.0) FROM testimonials WHERE is_approved",
        )
        .fetch_one(pool)
        .await?;

        let by_type: Vec<(String, i64)> = sqlx::query_as(
            "SELECT testimonial_type, COUNT(*) FROM testimonials
             WHERE is_approved GROUP BY testimonial_type",
        )
        .fetch_all(pool)
        .await?;

        let by_rating: Vec<(String, i64)> = sqlx::query_as(
            "SELECT rating::TEXT, COUNT(*) FROM testimonials
             WHERE is_approved GROUP BY rating",
        )
        .fetch_all(pool)
        .await?;

        Ok(TestimonialStats {
            total,
            pending_submissions,
            average_rating,
            by_type: by_type.into_iter().collect::<BTreeMap<_, _>>(),
            by_rating: by_rating.into_iter().collect::<BTreeMap<_, _>>(),
            featured_count,
        })
    }
}
