// Validation utilities module
// Explicit validation functions per input type, decoupled from the
// data structures themselves. Each returns the full list of field-level
// violations rather than stopping at the first failure.

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

use crate::auth::models::{LoginRequest, RegisterRequest};
use crate::movies::models::CreateMovie;

/// A single field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: &'static str,
    pub message: String,
}

impl FieldViolation {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Renders a violation list into the `details` string of a 400 response
pub fn describe_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// IMDb identifiers look like "tt0133093"
fn imdb_id_regex() -> &'static Regex {
    static IMDB_ID: OnceLock<Regex> = OnceLock::new();
    IMDB_ID.get_or_init(|| Regex::new(r"^tt\d{7,8}$").expect("invalid imdb id pattern"))
}

/// Validates a registration request
///
/// Password bounds: minimum 8 characters, maximum 128 so the hash input
/// stays well inside the algorithm's limits.
pub fn validate_register(request: &RegisterRequest) -> Result<(), Vec<FieldViolation>> {
    let mut violations = Vec::new();

    if !validator::validate_email(&request.email) {
        violations.push(FieldViolation::new("email", "must be a valid email address"));
    }
    if request.password.len() < 8 {
        violations.push(FieldViolation::new(
            "password",
            "must be at least 8 characters",
        ));
    } else if request.password.len() > 128 {
        violations.push(FieldViolation::new(
            "password",
            "must be at most 128 characters",
        ));
    }
    if request.first_name.is_empty() || request.first_name.len() > 100 {
        violations.push(FieldViolation::new(
            "first_name",
            "must be between 1 and 100 characters",
        ));
    }
    if request.last_name.is_empty() || request.last_name.len() > 100 {
        violations.push(FieldViolation::new(
            "last_name",
            "must be between 1 and 100 characters",
        ));
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

/// Validates a login request
pub fn validate_login(request: &LoginRequest) -> Result<(), Vec<FieldViolation>> {
    let mut violations = Vec::new();

    if !validator::validate_email(&request.email) {
        violations.push(FieldViolation::new("email", "must be a valid email address"));
    }
    if request.password.is_empty() {
        violations.push(FieldViolation::new("password", "must not be empty"));
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

/// Validates a movie creation request
pub fn validate_create_movie(request: &CreateMovie) -> Result<(), Vec<FieldViolation>> {
    let mut violations = Vec::new();

    if !imdb_id_regex().is_match(&request.imdb_id) {
        violations.push(FieldViolation::new(
            "imdb_id",
            "must match the form tt0000000",
        ));
    }
    if request.title.is_empty() || request.title.len() > 300 {
        violations.push(FieldViolation::new(
            "title",
            "must be between 1 and 300 characters",
        ));
    }
    if request.genre.is_empty() || request.genre.len() > 100 {
        violations.push(FieldViolation::new(
            "genre",
            "must be between 1 and 100 characters",
        ));
    }
    if !(1870..=2100).contains(&request.year) {
        violations.push(FieldViolation::new("year", "must be between 1870 and 2100"));
    }
    if !(0.0..=10.0).contains(&request.rating) {
        violations.push(FieldViolation::new("rating", "must be between 0.0 and 10.0"));
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}
