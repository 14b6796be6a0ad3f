//! Testimonial models: published entries and the submission queue.

use std::collections::BTreeMap;

use atrium_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `testimonials` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Testimonial {
    pub id: DbId,
    pub name: String,
    pub title: Option<String>,
    pub company: Option<String>,
    pub avatar_url: Option<String>,
    pub content: String,
    pub rating: i32,
    pub testimonial_type: String,
    pub product_name: Option<String>,
    pub linkedin_url: Option<String>,
    pub twitter_url: Option<String>,
    pub website_url: Option<String>,
    pub is_featured: bool,
    pub is_approved: bool,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateTestimonial {
    pub name: String,
    pub title: Option<String>,
    pub company: Option<String>,
    pub avatar_url: Option<String>,
    pub content: String,
    pub rating: Option<i32>,
    pub testimonial_type: Option<String>,
    pub product_name: Option<String>,
    pub linkedin_url: Option<String>,
    pub twitter_url: Option<String>,
    pub website_url: Option<String>,
    pub is_featured: Option<bool>,
    pub is_approved: Option<bool>,
    pub sort_order: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTestimonial {
    pub name: Option<String>,
    pub title: Option<String>,
    pub company: Option<String>,
    pub avatar_url: Option<String>,
    pub content: Option<String>,
    pub rating: Option<i32>,
    pub testimonial_type: Option<String>,
    pub product_name: Option<String>,
    pub linkedin_url: Option<String>,
    pub twitter_url: Option<String>,
    pub website_url: Option<String>,
    pub is_featured: Option<bool>,
    pub is_approved: Option<bool>,
    pub sort_order: Option<i32>,
}

/// Query params for the public testimonial listing.
#[derive(Debug, Default, Deserialize)]
pub struct TestimonialFilter {
    #[serde(rename = "type")]
    pub testimonial_type: Option<String>,
    pub rating: Option<i32>,
    pub is_featured: Option<bool>,
}

/// A row from the `testimonial_submissions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TestimonialSubmission {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub title: Option<String>,
    pub company: Option<String>,
    pub content: String,
    pub rating: i32,
    pub product_name: Option<String>,
    pub linkedin_url: Option<String>,
    pub allow_contact: bool,
    pub is_approved: bool,
    pub admin_notes: Option<String>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Raw public submission payload, validated field by field in the handler.
#[derive(Debug, Deserialize)]
pub struct SubmitTestimonial {
    pub name: Option<String>,
    pub email: Option<String>,
    pub title: Option<String>,
    pub company: Option<String>,
    pub content: Option<String>,
    pub rating: Option<i32>,
    pub product_name: Option<String>,
    pub linkedin_url: Option<String>,
    pub allow_contact: Option<bool>,
}

/// Validated submission fields ready for insert.
#[derive(Debug)]
pub struct CreateTestimonialSubmission {
    pub name: String,
    pub email: String,
    pub title: Option<String>,
    pub company: Option<String>,
    pub content: String,
    pub rating: i32,
    pub product_name: Option<String>,
    pub linkedin_url: Option<String>,
    pub allow_contact: bool,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

/// Admin-mutable submission fields.
#[derive(Debug, Deserialize)]
pub struct UpdateTestimonialSubmission {
    pub is_approved: Option<bool>,
    pub admin_notes: Option<String>,
}

/// Editor-facing aggregate snapshot.
#[derive(Debug, Default, Serialize)]
pub struct TestimonialStats {
    pub total: i64,
    pub pending_submissions: i64,
    pub average_rating: f64,
    pub by_type: BTreeMap<String, i64>,
    pub by_rating: BTreeMap<String, i64>,
    pub featured_count: i64,
}
