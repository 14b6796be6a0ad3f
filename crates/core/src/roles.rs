//! Well-known role name constants.
//!
//! These must match the CHECK constraint in `20260301000001_create_users_table.sql`.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_EDITOR: &str = "editor";
pub const ROLE_USER: &str = "user";

/// All valid role names.
pub const VALID_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_EDITOR, ROLE_USER];

/// Whether the role grants content-management (admin surface) access.
///
/// Admins and editors share the elevated surface; every admin-only check in
/// the handlers goes through this single predicate so the rule cannot drift
/// between modules.
pub fn is_editor(role: &str) -> bool {
    role == ROLE_ADMIN || role == ROLE_EDITOR
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_and_editor_are_editors() {
        assert!(is_editor(ROLE_ADMIN));
        assert!(is_editor(ROLE_EDITOR));
        assert!(!is_editor(ROLE_USER));
        assert!(!is_editor("reviewer"));
    }
}
