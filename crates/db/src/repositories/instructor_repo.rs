//! Repository for the `instructors` table.

use sqlx::PgPool;

use crate::models::training::Instructor;

const COLUMNS: &str = "id, name, title, bio, avatar_url, experience_years, \
    github_url, linkedin_url, twitter_url, website_url, created_at";

pub struct InstructorRepo;

impl InstructorRepo {
    pub async fn list(pool: &PgPool) -> Result<Vec<Instructor>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM instructors ORDER BY name");
        sqlx::query_as::<_, Instructor>(&query).fetch_all(pool).await
    }
}
