//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches
//! - Response / stats structs where the API shape differs from the row

pub mod blog;
pub mod career;
pub mod contact;
pub mod newsletter;
pub mod portfolio;
pub mod product;
pub mod session;
pub mod testimonial;
pub mod training;
pub mod user;
