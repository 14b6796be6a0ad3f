pub mod auth;
pub mod blog;
pub mod careers;
pub mod contacts;
pub mod health;
pub mod newsletter;
pub mod portfolio;
pub mod products;
pub mod testimonials;
pub mod training;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                          register (public)
/// /auth/login                             login (public)
/// /auth/refresh                           refresh (public)
/// /auth/logout                            logout (requires auth)
/// /auth/profile                           get, update own profile
/// /auth/password/change                   change password (requires auth)
/// /auth/team                              public team listing
///
/// /blogs                                  list (published), create (editor)
/// /blogs/featured                         featured posts
/// /blogs/recent                           recent posts (?limit=)
/// /blogs/categories                       list, create (editor)
/// /blogs/tags                             list, create (editor)
/// /blogs/{slug}                           get, update, delete (author/editor)
/// /blogs/{slug}/comments                  list, create (requires auth)
///
/// /products                               list, create (editor)
/// /products/featured                      featured products
/// /products/{slug}                        get, update, delete (editor)
///
/// /portfolio                              list, create (editor)
/// /portfolio/featured                     featured projects
/// /portfolio/search                       full-text search (?q=)
/// /portfolio/technologies                 technology usage, grouped
/// /portfolio/stats                        aggregates (requires auth)
/// /portfolio/category/{category}          list by category
/// /portfolio/{slug}                       get, update, delete (editor)
///
/// /careers/positions                      list, create (editor)
/// /careers/positions/open                 open positions only
/// /careers/positions/{slug}               get, update, delete (editor)
/// /careers/positions/{slug}/apply         submit application (multipart)
/// /careers/applications                   list (requires auth)
/// /careers/applications/{id}              get, update status (editor)
/// /careers/stats                          aggregates (requires auth)
///
/// /testimonials                           list (approved), create (editor)
/// /testimonials/featured                  featured entries
/// /testimonials/type/{type}               list by type
/// /testimonials/submit                    public intake
/// /testimonials/submissions               list queue (requires auth)
/// /testimonials/submissions/{id}          get, update (editor)
/// /testimonials/submissions/{id}/approve  approve and publish (editor)
/// /testimonials/stats                     aggregates (requires auth)
/// /testimonials/{id}                      get, update, delete (editor)
///
/// /contacts                               submit (public), list (requires auth)
/// /contacts/stats                         aggregates (requires auth)
/// /contacts/{id}                          get, update status (editor)
///
/// /newsletter/subscribe                   subscribe (public, idempotent)
/// /newsletter/unsubscribe                 unsubscribe (public)
/// /newsletter/subscriptions               list (requires auth)
/// /newsletter/stats                       aggregates (requires auth)
///
/// /training/courses                       list, create (editor)
/// /training/courses/featured              featured active courses
/// /training/courses/{slug}                get, update, delete (editor)
/// /training/instructors                   public instructor listing
/// /training/stats                         aggregates (requires auth)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication, profile, and the public team listing.
        .nest("/auth", auth::router())
        // Blog posts, categories, tags, comments.
        .nest("/blogs", blog::router())
        // Product catalog.
        .nest("/products", products::router())
        // Portfolio projects, search, technology usage.
        .nest("/portfolio", portfolio::router())
        // Job positions and applications.
        .nest("/careers", careers::router())
        // Published testimonials and the submission queue.
        .nest("/testimonials", testimonials::router())
        // Contact form intake and triage.
        .nest("/contacts", contacts::router())
        // Newsletter subscription lifecycle.
        .nest("/newsletter", newsletter::router())
        // Training courses and instructors.
        .nest("/training", training::router())
}
