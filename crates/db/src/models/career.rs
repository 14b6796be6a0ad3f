//! Career models: positions, skills, applications.

use std::collections::BTreeMap;

use atrium_core::types::{DbId, Timestamp};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `job_positions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct JobPosition {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub department: String,
    pub job_type: String,
    pub level: String,
    pub location: String,
    pub description: String,
    pub requirements: Option<String>,
    pub responsibilities: Option<String>,
    pub benefits: Option<String>,
    pub salary_min: Option<i32>,
    pub salary_max: Option<i32>,
    pub salary_currency: String,
    pub equity_offered: bool,
    pub application_deadline: Option<NaiveDate>,
    pub status: String,
    pub is_featured: bool,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `job_skills` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct JobSkill {
    pub id: DbId,
    pub position_id: DbId,
    pub name: String,
    pub skill_type: String,
    pub experience_years: Option<i32>,
    pub sort_order: i32,
}

#[derive(Debug, Deserialize)]
pub struct JobSkillInput {
    pub name: String,
    pub skill_type: Option<String>,
    pub experience_years: Option<i32>,
    pub sort_order: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct CreateJobPosition {
    pub title: String,
    pub department: String,
    pub job_type: String,
    pub level: String,
    pub location: String,
    pub description: String,
    pub requirements: Option<String>,
    pub responsibilities: Option<String>,
    pub benefits: Option<String>,
    pub salary_min: Option<i32>,
    pub salary_max: Option<i32>,
    pub salary_currency: Option<String>,
    pub equity_offered: Option<bool>,
    pub application_deadline: Option<NaiveDate>,
    pub status: Option<String>,
    pub is_featured: Option<bool>,
    pub sort_order: Option<i32>,
    #[serde(default)]
    pub skills: Vec<JobSkillInput>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateJobPosition {
    pub title: Option<String>,
    pub department: Option<String>,
    pub job_type: Option<String>,
    pub level: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub responsibilities: Option<String>,
    pub benefits: Option<String>,
    pub salary_min: Option<i32>,
    pub salary_max: Option<i32>,
    pub salary_currency: Option<String>,
    pub equity_offered: Option<bool>,
    pub application_deadline: Option<NaiveDate>,
    pub status: Option<String>,
    pub is_featured: Option<bool>,
    pub sort_order: Option<i32>,
    pub skills: Option<Vec<JobSkillInput>>,
}

/// Query params for the public position listing.
#[derive(Debug, Default, Deserialize)]
pub struct PositionFilter {
    pub department: Option<String>,
    pub job_type: Option<String>,
    pub level: Option<String>,
    pub status: Option<String>,
    pub is_featured: Option<bool>,
}

/// A row from the `job_applications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct JobApplication {
    pub id: DbId,
    pub position_id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub cover_letter: Option<String>,
    pub resume_path: Option<String>,
    pub portfolio_url: Option<String>,
    pub github_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub years_of_experience: Option<i32>,
    pub current_salary: Option<i32>,
    pub expected_salary: Option<i32>,
    pub status: String,
    pub admin_notes: Option<String>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Validated application fields, assembled by the handler from the
/// multipart form before insert.
#[derive(Debug)]
pub struct CreateJobApplication {
    pub position_id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub cover_letter: Option<String>,
    pub resume_path: Option<String>,
    pub portfolio_url: Option<String>,
    pub github_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub years_of_experience: Option<i32>,
    pub current_salary: Option<i32>,
    pub expected_salary: Option<i32>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

/// Admin-mutable application fields. Applicant data is immutable.
#[derive(Debug, Deserialize)]
pub struct UpdateJobApplication {
    pub status: Option<String>,
    pub admin_notes: Option<String>,
}

/// Editor-facing aggregate snapshot.
#[derive(Debug, Default, Serialize)]
pub struct CareerStats {
    pub total_positions: i64,
    pub open_positions: i64,
    pub total_applications: i64,
    pub recent_applications: i64,
    pub by_status: BTreeMap<String, i64>,
    pub by_department: BTreeMap<String, i64>,
    pub average_experience: f64,
}
