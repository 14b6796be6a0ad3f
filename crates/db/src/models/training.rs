//! Training models: courses, their children, instructors.

use std::collections::BTreeMap;

use atrium_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `courses` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Course {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub subtitle: Option<String>,
    pub description: String,
    pub level: String,
    pub status: String,
    pub duration: Option<String>,
    pub price: Option<f64>,
    pub original_price: Option<f64>,
    pub featured_image_url: Option<String>,
    pub preview_video_url: Option<String>,
    pub student_count: i32,
    pub rating: Option<f64>,
    pub completion_rate: Option<f64>,
    pub meta_description: Option<String>,
    pub is_featured: bool,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Course {
    /// Percentage off the original price, rounded to whole percent.
    /// `None` unless both prices are set and the discount is real.
    pub fn discount_percentage(&self) -> Option<i32> {
        let (price, original) = (self.price?, self.original_price?);
        if original > 0.0 && price < original {
            Some((((original - price) / original) * 100.0).round() as i32)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CourseModule {
    pub id: DbId,
    pub course_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub duration: Option<String>,
    pub sort_order: i32,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CourseTechnology {
    pub id: DbId,
    pub course_id: DbId,
    pub name: String,
    pub sort_order: i32,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CourseProject {
    pub id: DbId,
    pub course_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub difficulty: Option<String>,
    pub sort_order: i32,
}

/// A row from the `instructors` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Instructor {
    pub id: DbId,
    pub name: String,
    pub title: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub experience_years: Option<i32>,
    pub github_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub twitter_url: Option<String>,
    pub website_url: Option<String>,
    pub created_at: Timestamp,
}

/// An instructor attached to a course, with their role on it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CourseInstructor {
    pub id: DbId,
    pub name: String,
    pub title: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub experience_years: Option<i32>,
    pub github_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub twitter_url: Option<String>,
    pub website_url: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CourseModuleInput {
    pub title: String,
    pub description: Option<String>,
    pub duration: Option<String>,
    pub sort_order: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct CourseTechnologyInput {
    pub name: String,
    pub sort_order: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct CourseProjectInput {
    pub title: String,
    pub description: Option<String>,
    pub difficulty: Option<String>,
    pub sort_order: Option<i32>,
}

/// Instructor attachment carried inside course create/update DTOs.
#[derive(Debug, Deserialize)]
pub struct CourseInstructorInput {
    pub instructor_id: DbId,
    pub role: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateCourse {
    pub title: String,
    pub subtitle: Option<String>,
    pub description: String,
    pub level: String,
    pub status: Option<String>,
    pub duration: Option<String>,
    pub price: Option<f64>,
    pub original_price: Option<f64>,
    pub featured_image_url: Option<String>,
    pub preview_video_url: Option<String>,
    pub student_count: Option<i32>,
    pub rating: Option<f64>,
    pub completion_rate: Option<f64>,
    pub meta_description: Option<String>,
    pub is_featured: Option<bool>,
    pub sort_order: Option<i32>,
    #[serde(default)]
    pub modules: Vec<CourseModuleInput>,
    #[serde(default)]
    pub technologies: Vec<CourseTechnologyInput>,
    #[serde(default)]
    pub projects: Vec<CourseProjectInput>,
    #[serde(default)]
    pub instructors: Vec<CourseInstructorInput>,
}

/// Partial update; present child lists replace the existing children.
#[derive(Debug, Deserialize)]
pub struct UpdateCourse {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub level: Option<String>,
    pub status: Option<String>,
    pub duration: Option<String>,
    pub price: Option<f64>,
    pub original_price: Option<f64>,
    pub featured_image_url: Option<String>,
    pub preview_video_url: Option<String>,
    pub student_count: Option<i32>,
    pub rating: Option<f64>,
    pub completion_rate: Option<f64>,
    pub meta_description: Option<String>,
    pub is_featured: Option<bool>,
    pub sort_order: Option<i32>,
    pub modules: Option<Vec<CourseModuleInput>>,
    pub technologies: Option<Vec<CourseTechnologyInput>>,
    pub projects: Option<Vec<CourseProjectInput>>,
    pub instructors: Option<Vec<CourseInstructorInput>>,
}

/// Query params for the public course listing.
#[derive(Debug, Default, Deserialize)]
pub struct CourseFilter {
    pub level: Option<String>,
    pub status: Option<String>,
    pub is_featured: Option<bool>,
}

/// Editor-facing aggregate snapshot.
#[derive(Debug, Default, Serialize)]
pub struct TrainingStats {
    pub total: i64,
    pub active: i64,
    pub by_level: BTreeMap<String, i64>,
    pub total_students: i64,
    pub average_rating: f64,
}
