//! Portfolio project models and child collections.

use std::collections::BTreeMap;

use atrium_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `portfolio_projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PortfolioProject {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub subtitle: Option<String>,
    pub description: String,
    pub category: String,
    pub status: String,
    pub featured_image_url: Option<String>,
    pub gallery_urls: Option<Vec<String>>,
    pub live_url: Option<String>,
    pub github_url: Option<String>,
    pub case_study_url: Option<String>,
    pub client_name: Option<String>,
    pub duration: Option<String>,
    pub duration_weeks: Option<i32>,
    pub team_size: Option<i32>,
    pub user_count: Option<i32>,
    pub performance_metric: Option<String>,
    pub business_impact: Option<String>,
    pub is_featured: bool,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectTechnology {
    pub id: DbId,
    pub project_id: DbId,
    pub name: String,
    pub category: Option<String>,
    pub sort_order: i32,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectChallenge {
    pub id: DbId,
    pub project_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub solution: Option<String>,
    pub sort_order: i32,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectResult {
    pub id: DbId,
    pub project_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub metric: Option<String>,
    pub sort_order: i32,
}

#[derive(Debug, Deserialize)]
pub struct ProjectTechnologyInput {
    pub name: String,
    pub category: Option<String>,
    pub sort_order: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct ProjectChallengeInput {
    pub title: String,
    pub description: Option<String>,
    pub solution: Option<String>,
    pub sort_order: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct ProjectResultInput {
    pub title: String,
    pub description: Option<String>,
    pub metric: Option<String>,
    pub sort_order: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct CreatePortfolioProject {
    pub title: String,
    pub subtitle: Option<String>,
    pub description: String,
    pub category: String,
    pub status: Option<String>,
    pub featured_image_url: Option<String>,
    pub gallery_urls: Option<Vec<String>>,
    pub live_url: Option<String>,
    pub github_url: Option<String>,
    pub case_study_url: Option<String>,
    pub client_name: Option<String>,
    pub duration: Option<String>,
    pub duration_weeks: Option<i32>,
    pub team_size: Option<i32>,
    pub user_count: Option<i32>,
    pub performance_metric: Option<String>,
    pub business_impact: Option<String>,
    pub is_featured: Option<bool>,
    pub sort_order: Option<i32>,
    #[serde(default)]
    pub technologies: Vec<ProjectTechnologyInput>,
    #[serde(default)]
    pub challenges: Vec<ProjectChallengeInput>,
    #[serde(default)]
    pub results: Vec<ProjectResultInput>,
}

/// Partial update; present child lists replace the existing children.
#[derive(Debug, Deserialize)]
pub struct UpdatePortfolioProject {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub featured_image_url: Option<String>,
    pub gallery_urls: Option<Vec<String>>,
    pub live_url: Option<String>,
    pub github_url: Option<String>,
    pub case_study_url: Option<String>,
    pub client_name: Option<String>,
    pub duration: Option<String>,
    pub duration_weeks: Option<i32>,
    pub team_size: Option<i32>,
    pub user_count: Option<i32>,
    pub performance_metric: Option<String>,
    pub business_impact: Option<String>,
    pub is_featured: Option<bool>,
    pub sort_order: Option<i32>,
    pub technologies: Option<Vec<ProjectTechnologyInput>>,
    pub challenges: Option<Vec<ProjectChallengeInput>>,
    pub results: Option<Vec<ProjectResultInput>>,
}

/// Query params for the public project listing.
#[derive(Debug, Default, Deserialize)]
pub struct ProjectFilter {
    pub category: Option<String>,
    pub status: Option<String>,
    pub client: Option<String>,
    pub is_featured: Option<bool>,
}

/// One technology in the grouped technology index, with how many projects
/// use it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TechnologyUsage {
    pub name: String,
    pub project_count: i64,
}

/// Editor-facing aggregate snapshot.
#[derive(Debug, Default, Serialize)]
pub struct PortfolioStats {
    pub total: i64,
    pub by_category: BTreeMap<String, i64>,
    pub by_status: BTreeMap<String, i64>,
    pub featured_count: i64,
    pub average_team_size: f64,
}
