//! Atrium domain logic.
//!
//! Pure (database-free) building blocks shared by the storage and API
//! layers: the error taxonomy, role and status vocabularies, slug
//! derivation, Markdown rendering, and field-level input validation.

pub mod choices;
pub mod error;
pub mod markdown;
pub mod roles;
pub mod slug;
pub mod types;
pub mod validation;
