//! Repository for the `job_positions` table and its skill children.

use sqlx::{PgPool, Postgres, Transaction};

use atrium_core::choices::{POSITION_STATUS_OPEN, SKILL_TYPE_REQUIRED};
use atrium_core::types::DbId;

use crate::models::career::{
    CreateJobPosition, JobPosition, JobSkill, JobSkillInput, PositionFilter, UpdateJobPosition,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, slug, department, job_type, level, location, \
    description, requirements, responsibilities, benefits, salary_min, \
    salary_max, salary_currency, equity_offered, application_deadline, \
    status, is_featured, sort_order, created_at, updated_at";

pub struct PositionRepo;

impl PositionRepo {
    /// Insert a position and its skills in one transaction.
    pub async fn create(
        pool: &PgPool,
        input: &CreateJobPosition,
        slug: &str,
    ) -> Result<JobPosition, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO job_positions
                (title, slug, department, job_type, level, location, description,
                 requirements, responsibilities, benefits, salary_min, salary_max,
                 salary_currency, equity_offered, application_deadline, status,
                 is_featured, sort_order)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12,
                     $13, $14, $15, $16, $17, $18)
             RETURNING {COLUMNS}"
        );
        let position = sqlx::query_as::<_, JobPosition>(&query)
            .bind(&input.title)
            .bind(slug)
            .bind(&input.department)
            .bind(&input.job_type)
            .bind(&input.level)
            .bind(&input.location)
            .bind(&input.description)
            .bind(&input.requirements)
            .bind(&input.responsibilities)
            .bind(&input.benefits)
            .bind(input.salary_min)
            .bind(input.salary_max)
            .bind(input.salary_currency.as_deref().unwrap_or("USD"))
            .bind(input.equity_offered.unwrap_or(false))
            .bind(input.application_deadline)
            .bind(input.status.as_deref().unwrap_or(POSITION_STATUS_OPEN))
            .bind(input.is_featured.unwrap_or(false))
            .bind(input.sort_order.unwrap_or(0))
            .fetch_one(&mut *tx)
            .await?;

        Self::insert_skills(&mut tx, position.id, &input.skills).await?;

        tx.commit().await?;
        Ok(position)
    }

    pub async fn find_by_slug(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<JobPosition>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM job_positions WHERE slug = $1");
        sqlx::query_as::<_, JobPosition>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(
        pool: &PgPool,
        filter: &PositionFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<JobPosition>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM job_positions
             WHERE ($1::TEXT IS NULL OR department = $1)
               AND ($2::TEXT IS NULL OR job_type = $2)
               AND ($3::TEXT IS NULL OR level = $3)
               AND ($4::TEXT IS NULL OR status = $4)
               AND ($5::BOOL IS NULL OR is_featured = $5)
             ORDER BY sort_order, created_at DESC
             LIMIT $6 OFFSET $7"
        );
        sqlx::query_as::<_, JobPosition>(&query)
            .bind(&filter.department)
            .bind(&filter.job_type)
            .bind(&filter.level)
            .bind(&filter.status)
            .bind(filter.is_featured)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Positions currently accepting applications.
    pub async fn list_open(pool: &PgPool) -> Result<Vec<JobPosition>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM job_positions
             WHERE status = '{POSITION_STATUS_OPEN}'
             ORDER BY sort_order, created_at DESC"
        );
        sqlx::query_as::<_, JobPosition>(&query).fetch_all(pool).await
    }

    pub async fn list_skills(pool: &PgPool, position_id: DbId) -> Result<Vec<JobSkill>, sqlx::Error> {
        sqlx::query_as::<_, JobSkill>(
            "SELECT id, position_id, name, skill_type, experience_years, sort_order
             FROM job_skills WHERE position_id = $1 ORDER BY sort_order, id",
        )
        .bind(position_id)
        .fetch_all(pool)
        .await
    }

    /// Update a position. Only non-`None` fields are applied; a present
    /// skill list replaces the existing skills wholesale.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateJobPosition,
    ) -> Result<Option<JobPosition>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE job_positions SET
                title = COALESCE($2, title),
                department = COALESCE($3, department),
                job_type = COALESCE($4, job_type),
                level = COALESCE($5, level),
                location = COALESCE($6, location),
                description = COALESCE($7, description),
                requirements = COALESCE($8, requirements),
                responsibilities = COALESCE($9, responsibilities),
                benefits = COALESCE($10, benefits),
                salary_min = COALESCE($11, salary_min),
                salary_max = COALESCE($12, salary_max),
                salary_currency = COALESCE($13, salary_currency),
                equity_offered = COALESCE($14, equity_offered),
                application_deadline = COALESCE($15, application_deadline),
                status = COALESCE($16, status),
                is_featured = COALESCE($17, is_featured),
                sort_order = COALESCE($18, sort_order),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let position = sqlx::query_as::<_, JobPosition>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.department)
            .bind(&input.job_type)
            .bind(&input.level)
            .bind(&input.location)
            .bind(&input.description)
            .bind(&input.requirements)
            .bind(&input.responsibilities)
            .bind(&input.benefits)
            .bind(input.salary_min)
            .bind(input.salary_max)
            .bind(&input.salary_currency)
            .bind(input.equity_offered)
            .bind(input.application_deadline)
            .bind(&input.status)
            .bind(input.is_featured)
            .bind(input.sort_order)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(position) = position else {
            tx.rollback().await?;
            return Ok(None);
        };

        if let Some(skills) = &input.skills {
            sqlx::query("DELETE FROM job_skills WHERE position_id = $1")
                .bind(position.id)
                .execute(&mut *tx)
                .await?;
            Self::insert_skills(&mut tx, position.id, skills).await?;
        }

        tx.commit().await?;
        Ok(Some(position))
    }

    /// Delete a position (skills and applications cascade).
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM job_positions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn insert_skills(
        tx: &mut Transaction<'_, Postgres>,
        position_id: DbId,
        skills: &[JobSkillInput],
    ) -> Result<(), sqlx::Error> {
        for (i, skill) in skills.iter().enumerate() {
            sqlx::query(
                "INSERT INTO job_skills (position_id, name, skill_type, experience_years, sort_order)
                 VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(position_id)
            .bind(&skill.name)
            .bind(skill.skill_type.as_deref().unwrap_or(SKILL_TYPE_REQUIRED))
            .bind(skill.experience_years)
            .bind(skill.sort_order.unwrap_or(i as i32))
            .execute(&mut **tx)
            .await?;
        }
        Ok(())
    }
}
