//! Authentication and authorization middleware extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from a JWT Bearer token.
//! - [`rbac::RequireEditor`] -- Requires `editor` or `admin` role.
//! - [`client_meta::ClientMeta`] -- Captures the caller's IP and user agent.

pub mod auth;
pub mod client_meta;
pub mod rbac;
