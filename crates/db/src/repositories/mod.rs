//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod application_repo;
pub mod blog_category_repo;
pub mod blog_comment_repo;
pub mod blog_post_repo;
pub mod blog_tag_repo;
pub mod contact_repo;
pub mod course_repo;
pub mod instructor_repo;
pub mod newsletter_repo;
pub mod portfolio_repo;
pub mod position_repo;
pub mod product_repo;
pub mod session_repo;
pub mod testimonial_repo;
pub mod testimonial_submission_repo;
pub mod user_repo;

pub use application_repo::ApplicationRepo;
pub use blog_category_repo::BlogCategoryRepo;
pub use blog_comment_repo::BlogCommentRepo;
pub use blog_post_repo::BlogPostRepo;
pub use blog_tag_repo::BlogTagRepo;
pub use contact_repo::ContactRepo;
pub use course_repo::CourseRepo;
pub use instructor_repo::InstructorRepo;
pub use newsletter_repo::NewsletterRepo;
pub use portfolio_repo::PortfolioRepo;
pub use position_repo::PositionRepo;
pub use product_repo::ProductRepo;
pub use session_repo::SessionRepo;
pub use testimonial_repo::TestimonialRepo;
pub use testimonial_submission_repo::TestimonialSubmissionRepo;
pub use user_repo::UserRepo;
