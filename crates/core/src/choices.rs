//! Status and choice vocabularies for every resource.
//!
//! Each entity stores its status as a TEXT column; the valid value sets
//! live here so the API layer can reject out-of-set input before it
//! reaches the database, and so the "publicly visible" value for each
//! published-content entity is named in exactly one place.

// ---------------------------------------------------------------------------
// Contacts
// ---------------------------------------------------------------------------

pub const CONTACT_STATUS_NEW: &str = "new";
pub const CONTACT_STATUS_IN_PROGRESS: &str = "in_progress";
pub const CONTACT_STATUS_RESOLVED: &str = "resolved";
pub const CONTACT_STATUS_CLOSED: &str = "closed";

pub const VALID_CONTACT_STATUSES: &[&str] = &[
    CONTACT_STATUS_NEW,
    CONTACT_STATUS_IN_PROGRESS,
    CONTACT_STATUS_RESOLVED,
    CONTACT_STATUS_CLOSED,
];

pub const INQUIRY_GENERAL: &str = "general";

pub const VALID_INQUIRY_TYPES: &[&str] =
    &["general", "product", "partnership", "career", "press"];

// ---------------------------------------------------------------------------
// Blog posts
// ---------------------------------------------------------------------------

pub const POST_STATUS_DRAFT: &str = "draft";
pub const POST_STATUS_PUBLISHED: &str = "published";
pub const POST_STATUS_ARCHIVED: &str = "archived";

pub const VALID_POST_STATUSES: &[&str] = &[
    POST_STATUS_DRAFT,
    POST_STATUS_PUBLISHED,
    POST_STATUS_ARCHIVED,
];

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

pub const PRODUCT_STATUS_LIVE: &str = "live";
pub const PRODUCT_STATUS_DEVELOPMENT: &str = "development";

pub const VALID_PRODUCT_STATUSES: &[&str] =
    &["live", "beta", "development", "coming_soon", "archived"];

// ---------------------------------------------------------------------------
// Portfolio projects
// ---------------------------------------------------------------------------

pub const PROJECT_STATUS_COMPLETED: &str = "completed";

pub const VALID_PROJECT_CATEGORIES: &[&str] = &["web", "mobile", "saas", "api", "other"];

pub const VALID_PROJECT_STATUSES: &[&str] =
    &["completed", "in_progress", "maintenance", "archived"];

// ---------------------------------------------------------------------------
// Careers
// ---------------------------------------------------------------------------

pub const POSITION_STATUS_OPEN: &str = "open";

pub const VALID_POSITION_STATUSES: &[&str] = &["open", "closed", "paused", "filled"];

pub const VALID_JOB_TYPES: &[&str] =
    &["full_time", "part_time", "contract", "internship", "freelance"];

pub const VALID_JOB_LEVELS: &[&str] =
    &["entry", "junior", "mid", "senior", "lead", "principal"];

pub const SKILL_TYPE_REQUIRED: &str = "required";

pub const VALID_SKILL_TYPES: &[&str] =
    &[SKILL_TYPE_REQUIRED, "preferred", "nice_to_have"];

pub const APPLICATION_STATUS_SUBMITTED: &str = "submitted";

pub const VALID_APPLICATION_STATUSES: &[&str] = &[
    "submitted",
    "reviewing",
    "interview",
    "offer",
    "hired",
    "rejected",
    "withdrawn",
];

// ---------------------------------------------------------------------------
// Testimonials
// ---------------------------------------------------------------------------

pub const TESTIMONIAL_TYPE_CUSTOMER: &str = "customer";

pub const VALID_TESTIMONIAL_TYPES: &[&str] =
    &["customer", "user", "student", "partner", "employee"];

// ---------------------------------------------------------------------------
// Training courses
// ---------------------------------------------------------------------------

pub const COURSE_STATUS_ACTIVE: &str = "active";

pub const VALID_COURSE_STATUSES: &[&str] = &["active", "coming_soon", "archived"];

pub const VALID_COURSE_LEVELS: &[&str] =
    &["beginner", "intermediate", "advanced", "expert"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_members_of_their_sets() {
        assert!(VALID_CONTACT_STATUSES.contains(&CONTACT_STATUS_NEW));
        assert!(VALID_INQUIRY_TYPES.contains(&INQUIRY_GENERAL));
        assert!(VALID_POST_STATUSES.contains(&POST_STATUS_PUBLISHED));
        assert!(VALID_POSITION_STATUSES.contains(&POSITION_STATUS_OPEN));
        assert!(VALID_APPLICATION_STATUSES.contains(&APPLICATION_STATUS_SUBMITTED));
        assert!(VALID_TESTIMONIAL_TYPES.contains(&TESTIMONIAL_TYPE_CUSTOMER));
        assert!(VALID_COURSE_STATUSES.contains(&COURSE_STATUS_ACTIVE));
    }
}
