//! Repository for the `portfolio_projects` table and its child collections.

use std::collections::BTreeMap;

use sqlx::{PgPool, Postgres, Transaction};

use atrium_core::choices::PROJECT_STATUS_COMPLETED;
use atrium_core::types::DbId;

use crate::models::portfolio::{
    CreatePortfolioProject, PortfolioProject, PortfolioStats, ProjectChallenge,
    ProjectChallengeInput, ProjectFilter, ProjectResult, ProjectResultInput, ProjectTechnology,
    ProjectTechnologyInput, TechnologyUsage, UpdatePortfolioProject,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, slug, subtitle, description, category, status, \
    featured_image_url, gallery_urls, live_url, github_url, case_study_url, \
    client_name, duration, duration_weeks, team_size, user_count, \
    performance_metric, business_impact, is_featured, sort_order, \
    created_at, updated_at";

pub struct PortfolioRepo;

impl PortfolioRepo {
    /// Insert a project and its children in one transaction.
    pub async fn create(
        pool: &PgPool,
        input: &CreatePortfolioProject,
        slug: &str,
    ) -> Result<PortfolioProject, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO portfolio_projects
                (title, slug, subtitle, description, category, status,
                 featured_image_url, gallery_urls, live_url, github_url,
                 case_study_url, client_name, duration, duration_weeks,
                 team_size, user_count, performance_metric, business_impact,
                 is_featured, sort_order)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
                     $11, $12, $13, $14, $15, $16, $17, $18, $19, $20)
             RETURNING {COLUMNS}"
        );
        let project = sqlx::query_as::<_, PortfolioProject>(&query)
            .bind(&input.title)
            .bind(slug)
            .bind(&input.subtitle)
            .bind(&input.description)
            .bind(&input.category)
            .bind(input.status.as_deref().unwrap_or(PROJECT_STATUS_COMPLETED))
            .bind(&input.featured_image_url)
            .bind(&input.gallery_urls)
            .bind(&input.live_url)
            .bind(&input.github_url)
            .bind(&input.case_study_url)
            .bind(&input.client_name)
            .bind(&input.duration)
            .bind(input.duration_weeks)
            .bind(input.team_size)
            .bind(input.user_count)
            .bind(&input.performance_metric)
            .bind(&input.business_impact)
            .bind(input.is_featured.unwrap_or(false))
            .bind(input.sort_order.unwrap_or(0))
            .fetch_one(&mut *tx)
            .await?;

        Self::insert_technologies(&mut tx, project.id, &input.technologies).await?;
        Self::insert_challenges(&mut tx, project.id, &input.challenges).await?;
        Self::insert_results(&mut tx, project.id, &input.results).await?;

        tx.commit().await?;
        Ok(project)
    }

    pub async fn find_by_slug(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<PortfolioProject>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM portfolio_projects WHERE slug = $1");
        sqlx::query_as::<_, PortfolioProject>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(
        pool: &PgPool,
        filter: &ProjectFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<PortfolioProject>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM portfolio_projects
             WHERE ($1::TEXT IS NULL OR category = $1)
               AND ($2::TEXT IS NULL OR status = $2)
               AND ($3::TEXT IS NULL OR client_name ILIKE '%' || $3 || '%')
               AND ($4::BOOL IS NULL OR is_featured = $4)
             ORDER BY sort_order, created_at DESC
             LIMIT $5 OFFSET $6"
        );
        sqlx::query_as::<_, PortfolioProject>(&query)
            .bind(&filter.category)
            .bind(&filter.status)
            .bind(&filter.client)
            .bind(filter.is_featured)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn list_featured(pool: &PgPool) -> Result<Vec<PortfolioProject>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM portfolio_projects
             WHERE is_featured = TRUE
             ORDER BY sort_order, created_at DESC"
        );
        sqlx::query_as::<_, PortfolioProject>(&query)
            .fetch_all(pool)
            .await
    }

    pub async fn list_by_category(
        pool: &PgPool,
        category: &str,
    ) -> Result<Vec<PortfolioProject>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM portfolio_projects
             WHERE category = $1
             ORDER BY sort_order, created_at DESC"
        );
        sqlx::query_as::<_, PortfolioProject>(&query)
            .bind(category)
            .fetch_all(pool)
            .await
    }

    /// Free-text search across the project text fields and technology names.
    pub async fn search(pool: &PgPool, q: &str) -> Result<Vec<PortfolioProject>, sqlx::Error> {
        sqlx::query_as::<_, PortfolioProject>(
            "SELECT DISTINCT p.id, p.title, p.slug, p.subtitle, p.description,
                    p.category, p.status, p.featured_image_url, p.gallery_urls,
                    p.live_url, p.github_url, p.case_study_url, p.client_name,
                    p.duration, p.duration_weeks, p.team_size, p.user_count,
                    p.performance_metric, p.business_impact, p.is_featured,
                    p.sort_order, p.created_at, p.updated_at
             FROM portfolio_projects p
             LEFT JOIN project_technologies t ON t.project_id = p.id
             WHERE p.title ILIKE '%' || $1 || '%'
                OR p.subtitle ILIKE '%' || $1 || '%'
                OR p.description ILIKE '%' || $1 || '%'
                OR p.client_name ILIKE '%' || $1 || '%'
                OR t.name ILIKE '%' || $1 || '%'
             ORDER BY p.sort_order, p.created_at DESC",
        )
        .bind(q)
        .fetch_all(pool)
        .await
    }

    /// Technology index: every technology with its category and how many
    /// projects use it.
    pub async fn technology_usage(pool: &PgPool) -> Result<Vec<(Option<String>, TechnologyUsage)>, sqlx::Error> {
        let rows = sqlx::query_as::<_, (Option<String>, String, i64)>(
            "SELECT category, name, COUNT(DISTINCT project_id)
             FROM project_technologies
             GROUP BY category, name
             ORDER BY category NULLS LAST, name",
        )
        .fetch_all(pool)
        .await?;
        Ok(rows
            .into_iter()
            .map(|(category, name, project_count)| {
                (category, TechnologyUsage { name, project_count })
            })
            .collect())
    }

    pub async fn list_project_technologies(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<ProjectTechnology>, sqlx::Error> {
        sqlx::query_as::<_, ProjectTechnology>(
            "SELECT id, project_id, name, category, sort_order
             FROM project_technologies WHERE project_id = $1 ORDER BY sort_order, id",
        )
        .bind(project_id)
        .fetch_all(pool)
        .await
    }

    pub async fn list_project_challenges(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<ProjectChallenge>, sqlx::Error> {
        sqlx::query_as::<_, ProjectChallenge>(
            "SELECT id, project_id, title, description, solution, sort_order
             FROM project_challenges WHERE project_id = $1 ORDER BY sort_order, id",
        )
        .bind(project_id)
        .fetch_all(pool)
        .await
    }

    pub async fn list_project_results(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<ProjectResult>, sqlx::Error> {
        sqlx::query_as::<_, ProjectResult>(
            "SELECT id, project_id, title, description, metric, sort_order
             FROM project_results WHERE project_id = $1 ORDER BY sort_order, id",
        )
        .bind(project_id)
        .fetch_all(pool)
        .await
    }

    /// Update a project. Only non-`None` fields are applied; a present child
    /// list replaces the existing children wholesale.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePortfolioProject,
    ) -> Result<Option<PortfolioProject>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE portfolio_projects SET
                title = COALESCE($2, title),
                subtitle = COALESCE($3, subtitle),
                description = COALESCE($4, description),
                category = COALESCE($5, category),
                status = COALESCE($6, status),
                featured_image_url = COALESCE($7, featured_image_url),
                gallery_urls = COALESCE($8, gallery_urls),
                live_url = COALESCE($9, live_url),
                github_url = COALESCE($10, github_url),
                case_study_url = COALESCE($11, case_study_url),
                client_name = COALESCE($12, client_name),
                duration = COALESCE($13, duration),
                duration_weeks = COALESCE($14, duration_weeks),
                team_size = COALESCE($15, team_size),
                user_count = COALESCE($16, user_count),
                performance_metric = COALESCE($17, performance_metric),
                business_impact = COALESCE($18, business_impact),
                is_featured = COALESCE($19, is_featured),
                sort_order = COALESCE($20, sort_order),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let project = sqlx::query_as::<_, PortfolioProject>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.subtitle)
            .bind(&input.description)
            .bind(&input.category)
            .bind(&input.status)
            .bind(&input.featured_image_url)
            .bind(&input.gallery_urls)
            .bind(&input.live_url)
            .bind(&input.github_url)
            .bind(&input.case_study_url)
            .bind(&input.client_name)
            .bind(&input.duration)
            .bind(input.duration_weeks)
            .bind(input.team_size)
            .bind(input.user_count)
            .bind(&input.performance_metric)
            .bind(&input.business_impact)
            .bind(input.is_featured)
            .bind(input.sort_order)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(project) = project else {
            tx.rollback().await?;
            return Ok(None);
        };

        if let Some(technologies) = &input.technologies {
            sqlx::query("DELETE FROM project_technologies WHERE project_id = $1")
                .bind(project.id)
                .execute(&mut *tx)
                .await?;
            Self::insert_technologies(&mut tx, project.id, technologies).await?;
        }
        if let Some(challenges) = &input.challenges {
            sqlx::query("DELETE FROM project_challenges WHERE project_id = $1")
                .bind(project.id)
                .execute(&mut *tx)
                .await?;
            Self::insert_challenges(&mut tx, project.id, challenges).await?;
        }
        if let Some(results) = &input.results {
            sqlx::query("DELETE FROM project_results WHERE project_id = $1")
                .bind(project.id)
                .execute(&mut *tx)
                .await?;
            Self::insert_results(&mut tx, project.id, results).await?;
        }

        tx.commit().await?;
        Ok(Some(project))
    }

    /// Delete a project (children cascade). Returns `true` if deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM portfolio_projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// One-snapshot aggregate counts for the editor dashboard.
    pub async fn stats(pool: &PgPool) -> Result<PortfolioStats, sqlx::Error> {
        let (total, featured_count): (i64, i64) = sqlx::query_as(
            "SELECT COUNT(*), COUNT(*) FILTER (WHERE is_featured)
             FROM portfolio_projects",
        )
        .fetch_one(pool)
        .await?;

        let by_category: Vec<(String, i64)> = sqlx::query_as(
            "SELECT category, COUNT(*) FROM portfolio_projects GROUP BY category",
        )
        .fetch_all(pool)
        .await?;

        let by_status: Vec<(String, i64)> = sqlx::query_as(
            "SELECT status, COUNT(*) FROM portfolio_projects GROUP BY status",
        )
        .fetch_all(pool)
        .await?;

        let (average_team_size,): (f64,) = sqlx::query_as(
            "SELECT COALESCE(AVG(team_size)::float8, 0.0) FROM portfolio_projects",
        )
        .fetch_one(pool)
        .await?;

        Ok(PortfolioStats {
            total,
            by_category: by_category.into_iter().collect::<BTreeMap<_, _>>(),
            by_status: by_status.into_iter().collect::<BTreeMap<_, _>>(),
            featured_count,
            average_team_size,
        })
    }

    async fn insert_technologies(
        tx: &mut Transaction<'_, Postgres>,
        project_id: DbId,
        technologies: &[ProjectTechnologyInput],
    ) -> Result<(), sqlx::Error> {
        for (i, tech) in technologies.iter().enumerate() {
            sqlx::query(
                "INSERT INTO project_technologies (project_id, name, category, sort_order)
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(project_id)
            .bind(&tech.name)
            .bind(&tech.category)
            .bind(tech.sort_order.unwrap_or(i as i32))
            .execute(&mut **tx)
            .await?;
        }
        Ok(())
    }

    async fn insert_challenges(
        tx: &mut Transaction<'_, Postgres>,
        project_id: DbId,
        challenges: &[ProjectChallengeInput],
    ) -> Result<(), sqlx::Error> {
        for (i, challenge) in challenges.iter().enumerate() {
            sqlx::query(
                "INSERT INTO project_challenges (project_id, title, description, solution, sort_order)
                 VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(project_id)
            .bind(&challenge.title)
            .bind(&challenge.description)
            .bind(&challenge.solution)
            .bind(challenge.sort_order.unwrap_or(i as i32))
            .execute(&mut **tx)
            .await?;
        }
        Ok(())
    }

    async fn insert_results(
        tx: &mut Transaction<'_, Postgres>,
        project_id: DbId,
        results: &[ProjectResultInput],
    ) -> Result<(), sqlx::Error> {
        for (i, result) in results.iter().enumerate() {
            sqlx::query(
                "INSERT INTO project_results (project_id, title, description, metric, sort_order)
                 VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(project_id)
            .bind(&result.title)
            .bind(&result.description)
            .bind(&result.metric)
            .bind(result.sort_order.unwrap_or(i as i32))
            .execute(&mut **tx)
            .await?;
        }
        Ok(())
    }
}
