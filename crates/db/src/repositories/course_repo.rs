//! Repository for the `courses` table and its child collections.

use std::collections::BTreeMap;

use sqlx::{PgPool, Postgres, Transaction};

use atrium_core::choices::COURSE_STATUS_ACTIVE;
use atrium_core::types::DbId;

use crate::models::training::{
    Course, CourseFilter, CourseInstructor, CourseInstructorInput, CourseModule,
    CourseModuleInput, CourseProject, CourseProjectInput, CourseTechnology,
    CourseTechnologyInput, CreateCourse, TrainingStats, UpdateCourse,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, slug, subtitle, description, level, status, \
    duration, price, original_price, featured_image_url, preview_video_url, \
    student_count, rating, completion_rate, meta_description, is_featured, \
    sort_order, created_at, updated_at";

pub struct CourseRepo;

impl CourseRepo {
    /// Insert a course and its children in one transaction.
    pub async fn create(
        pool: &PgPool,
        input: &CreateCourse,
        slug: &str,
    ) -> Result<Course, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO courses
                (title, slug, subtitle, description, level, status, duration,
                 price, original_price, featured_image_url, preview_video_url,
                 student_count, rating, completion_rate, meta_description,
                 is_featured, sort_order)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12,
                     $13, $14, $15, $16, $17)
             RETURNING {COLUMNS}"
        );
        let course = sqlx::query_as::<_, Course>(&query)
            .bind(&input.title)
            .bind(slug)
            .bind(&input.subtitle)
            .bind(&input.description)
            .bind(&input.level)
            .bind(input.status.as_deref().unwrap_or(COURSE_STATUS_ACTIVE))
            .bind(&input.duration)
            .bind(input.price)
            .bind(input.original_price)
            .bind(&input.featured_image_url)
            .bind(&input.preview_video_url)
            .bind(input.student_count.unwrap_or(0))
            .bind(input.rating)
            .bind(input.completion_rate)
            .bind(&input.meta_description)
            .bind(input.is_featured.unwrap_or(false))
            .bind(input.sort_order.unwrap_or(0))
            .fetch_one(&mut *tx)
            .await?;

        Self::insert_modules(&mut tx, course.id, &input.modules).await?;
        Self::insert_technologies(&mut tx, course.id, &input.technologies).await?;
        Self::insert_projects(&mut tx, course.id, &input.projects).await?;
        Self::insert_instructors(&mut tx, course.id, &input.instructors).await?;

        tx.commit().await?;
        Ok(course)
    }

    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Course>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM courses WHERE slug = $1");
        sqlx::query_as::<_, Course>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(
        pool: &PgPool,
        filter: &CourseFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Course>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM courses
             WHERE ($1::TEXT IS NULL OR level = $1)
               AND ($2::TEXT IS NULL OR status = $2)
               AND ($3::BOOL IS NULL OR is_featured = $3)
             ORDER BY sort_order, title
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(&filter.level)
            .bind(&filter.status)
            .bind(filter.is_featured)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Featured active courses.
    pub async fn list_featured(pool: &PgPool, limit: i64) -> Result<Vec<Course>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM courses
             WHERE status = '{COURSE_STATUS_ACTIVE}' AND is_featured = TRUE
             ORDER BY sort_order, title
             LIMIT $1"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    pub async fn list_modules(pool: &PgPool, course_id: DbId) -> Result<Vec<CourseModule>, sqlx::Error> {
        sqlx::query_as::<_, CourseModule>(
            "SELECT id, course_id, title, description, duration, sort_order
             FROM course_modules WHERE course_id = $1 ORDER BY sort_order, id",
        )
        .bind(course_id)
        .fetch_all(pool)
        .await
    }

    pub async fn list_technologies(
        pool: &PgPool,
        course_id: DbId,
    ) -> Result<Vec<CourseTechnology>, sqlx::Error> {
        sqlx::query_as::<_, CourseTechnology>(
            "SELECT id, course_id, name, sort_order
             FROM course_technologies WHERE course_id = $1 ORDER BY sort_order, id",
        )
        .bind(course_id)
        .fetch_all(pool)
        .await
    }

    pub async fn list_projects(
        pool: &PgPool,
        course_id: DbId,
    ) -> Result<Vec<CourseProject>, sqlx::Error> {
        sqlx::query_as::<_, CourseProject>(
            "SELECT id, course_id, title, description, difficulty, sort_order
             FROM course_projects WHERE course_id = $1 ORDER BY sort_order, id",
        )
        .bind(course_id)
        .fetch_all(pool)
        .await
    }

    /// Instructors attached to a course, with their per-course role.
    pub async fn list_instructors(
        pool: &PgPool,
        course_id: DbId,
    ) -> Result<Vec<CourseInstructor>, sqlx::Error> {
        sqlx::query_as::<_, CourseInstructor>(
            "SELECT i.id, i.name, i.title, i.bio, i.avatar_url, i.experience_years,
                    i.github_url, i.linkedin_url, i.twitter_url, i.website_url,
                    ci.role
             FROM instructors i
             JOIN course_instructors ci ON ci.instructor_id = i.id
             WHERE ci.course_id = $1
             ORDER BY i.name",
        )
        .bind(course_id)
        .fetch_all(pool)
        .await
    }

    /// Update a course. Only non-`None` fields are applied; a present child
    /// list replaces the existing children wholesale.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCourse,
    ) -> Result<Option<Course>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE courses SET
                title = COALESCE($2, title),
                subtitle = COALESCE($3, subtitle),
                description = COALESCE($4, description),
                level = COALESCE($5, level),
                status = COALESCE($6, status),
                duration = COALESCE($7, duration),
                price = COALESCE($8, price),
                original_price = COALESCE($9, original_price),
                featured_image_url = COALESCE($10, featured_image_url),
                preview_video_url = COALESCE($11, preview_video_url),
                student_count = COALESCE($12, student_count),
                rating = COALESCE($13, rating),
                completion_rate = COALESCE($14, completion_rate),
                meta_description = COALESCE($15, meta_description),
                is_featured = COALESCE($16, is_featured),
                sort_order = COALESCE($17, sort_order),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let course = sqlx::query_as::<_, Course>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.subtitle)
            .bind(&input.description)
            .bind(&input.level)
            .bind(&input.status)
            .bind(&input.duration)
            .bind(input.price)
            .bind(input.original_price)
            .bind(&input.featured_image_url)
            .bind(&input.preview_video_url)
            .bind(input.student_count)
            .bind(input.rating)
            .bind(input.completion_rate)
            .bind(&input.meta_description)
            .bind(input.is_featured)
            .bind(input.sort_order)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(course) = course else {
            tx.rollback().await?;
            return Ok(None);
        };

        if let Some(modules) = &input.modules {
            sqlx::query("DELETE FROM course_modules WHERE course_id = $1")
                .bind(course.id)
                .execute(&mut *tx)
                .await?;
            Self::insert_modules(&mut tx, course.id, modules).await?;
        }
        if let Some(technologies) = &input.technologies {
            sqlx::query("DELETE FROM course_technologies WHERE course_id = $1")
                .bind(course.id)
                .execute(&mut *tx)
                .await?;
            Self::insert_technologies(&mut tx, course.id, technologies).await?;
        }
        if let Some(projects) = &input.projects {
            sqlx::query("DELETE FROM course_projects WHERE course_id = $1")
                .bind(course.id)
                .execute(&mut *tx)
                .await?;
            Self::insert_projects(&mut tx, course.id, projects).await?;
        }
        if let Some(instructors) = &input.instructors {
            sqlx::query("DELETE FROM course_instructors WHERE course_id = $1")
                .bind(course.id)
                .execute(&mut *tx)
                .await?;
            Self::insert_instructors(&mut tx, course.id, instructors).await?;
        }

        tx.commit().await?;
        Ok(Some(course))
    }

    /// Delete a course (children and instructor links cascade).
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// One-snapshot aggregate counts for the editor dashboard.
    pub async fn stats(pool: &PgPool) -> Result<TrainingStats, sqlx::Error> {
        let (total, active, total_students): (i64, i64, i64) = sqlx::query_as(&format!(
            "SELECT COUNT(*),
                    COUNT(*) FILTER (WHERE status = '{COURSE_STATUS_ACTIVE}'),
                    COALESCE(SUM(student_count), 0)::BIGINT
             FROM courses"
        ))
        .fetch_one(pool)
        .await?;

        let by_level: Vec<(String, i64)> =
            sqlx::query_as("SELECT level, COUNT(*) FROM courses GROUP BY level")
                .fetch_all(pool)
                .await?;

        let (average_rating,): (f64,) =
            sqlx::query_as("SELECT COALESCE(AVG(rating)::float8, 0.0) FROM courses")
                .fetch_one(pool)
                .await?;

        Ok(TrainingStats {
            total,
            active,
            by_level: by_level.into_iter().collect::<BTreeMap<_, _>>(),
            total_students,
            average_rating,
        })
    }

    async fn insert_modules(
        tx: &mut Transaction<'_, Postgres>,
        course_id: DbId,
        modules: &[CourseModuleInput],
    ) -> Result<(), sqlx::Error> {
        for (i, module) in modules.iter().enumerate() {
            sqlx::query(
                "INSERT INTO course_modules (course_id, title, description, duration, sort_order)
                 VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(course_id)
            .bind(&module.title)
            .bind(&module.description)
            .bind(&module.duration)
            .bind(module.sort_order.unwrap_or(i as i32))
            .execute(&mut **tx)
            .await?;
        }
        Ok(())
    }

    async fn insert_technologies(
        tx: &mut Transaction<'_, Postgres>,
        course_id: DbId,
        technologies: &[CourseTechnologyInput],
    ) -> Result<(), sqlx::Error> {
        for (i, tech) in technologies.iter().enumerate() {
            sqlx::query(
                "INSERT INTO course_technologies (course_id, name, sort_order)
                 VALUES ($1, $2, $3)",
            )
            .bind(course_id)
            .bind(&tech.name)
            .bind(tech.sort_order.unwrap_or(i as i32))
            .execute(&mut **tx)
            .await?;
        }
        Ok(())
    }

    async fn insert_projects(
        tx: &mut Transaction<'_, Postgres>,
        course_id: DbId,
        projects: &[CourseProjectInput],
    ) -> Result<(), sqlx::Error> {
        for (i, project) in projects.iter().enumerate() {
            sqlx::query(
                "INSERT INTO course_projects (course_id, title, description, difficulty, sort_order)
                 VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(course_id)
            .bind(&project.title)
            .bind(&project.description)
            .bind(&project.difficulty)
            .bind(project.sort_order.unwrap_or(i as i32))
            .execute(&mut **tx)
            .await?;
        }
        Ok(())
    }

    async fn insert_instructors(
        tx: &mut Transaction<'_, Postgres>,
        course_id: DbId,
        instructors: &[CourseInstructorInput],
    ) -> Result<(), sqlx::Error> {
        for link in instructors {
            sqlx::query(
                "INSERT INTO course_instructors (course_id, instructor_id, role)
                 VALUES ($1, $2, $3)",
            )
            .bind(course_id)
            .bind(link.instructor_id)
            .bind(&link.role)
            .execute(&mut **tx)
            .await?;
        }
        Ok(())
    }
}
