//! HTTP request handlers, one module per resource.

pub mod auth;
pub mod blog;
pub mod careers;
pub mod contacts;
pub mod newsletter;
pub mod portfolio;
pub mod products;
pub mod testimonials;
pub mod training;
