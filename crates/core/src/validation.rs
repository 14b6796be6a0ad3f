//! Field-level input validation for submission and admin payloads.
//!
//! Handlers collect every failure into a [`FieldErrors`] map and reject the
//! whole payload at once, so a client sees all invalid fields in a single
//! response instead of fixing them one at a time.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use validator::ValidateEmail;

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?1?\d{9,15}$").expect("phone regex is valid"));

/// Maximum accepted resume upload size (5 MiB).
pub const MAX_UPLOAD_SIZE: usize = 5 * 1024 * 1024;

/// MIME types accepted for resume uploads.
pub const RESUME_MIME_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

/// Field name to error messages, ordered by field name for stable output.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Consume into a `Result`, erring when any field failed.
    pub fn into_result(self) -> Result<(), crate::error::CoreError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(crate::error::CoreError::FieldValidation(self))
        }
    }
}

/// Reject empty or whitespace-only values.
pub fn require(errors: &mut FieldErrors, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.add(field, "This field is required.");
    }
}

/// Reject values shorter than `min` characters (after trimming).
pub fn require_min_len(errors: &mut FieldErrors, field: &str, value: &str, min: usize) {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.add(field, "This field is required.");
    } else if trimmed.chars().count() < min {
        errors.add(field, format!("Must be at least {min} characters long."));
    }
}

pub fn require_email(errors: &mut FieldErrors, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.add(field, "This field is required.");
    } else if !value.validate_email() {
        errors.add(field, "Enter a valid email address.");
    }
}

/// Reject values outside the given choice set. Empty values are left to
/// [`require`] so a missing field reports one error, not two.
pub fn require_choice(errors: &mut FieldErrors, field: &str, value: &str, valid: &[&str]) {
    if !value.is_empty() && !valid.contains(&value) {
        errors.add(field, format!("\"{value}\" is not a valid choice."));
    }
}

pub fn require_rating(errors: &mut FieldErrors, field: &str, value: i32) {
    if !(1..=5).contains(&value) {
        errors.add(field, "Rating must be between 1 and 5.");
    }
}

/// Optional URL field: empty is fine, a present value must parse as http(s).
pub fn check_optional_url(errors: &mut FieldErrors, field: &str, value: Option<&str>) {
    let Some(value) = value else { return };
    if value.is_empty() {
        return;
    }
    if !(value.starts_with("http://") || value.starts_with("https://"))
        || value.len() <= "https://".len()
    {
        errors.add(field, "Enter a valid URL.");
    }
}

/// Optional phone field: digits with an optional leading `+`, 9 to 15 long.
pub fn check_optional_phone(errors: &mut FieldErrors, field: &str, value: Option<&str>) {
    let Some(value) = value else { return };
    if value.is_empty() {
        return;
    }
    if !PHONE_RE.is_match(value) {
        errors.add(field, "Enter a valid phone number.");
    }
}
