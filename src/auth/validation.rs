use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

pub const NAME_MAX: usize = 40;
pub const USERNAME_MAX: usize = 20;
pub const EMAIL_MAX: usize = 255;
pub const PASSWORD_MAX: usize = 20;

/// Why a submitted form was refused. Only ever logged; the client sees a redirect.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} is required")]
    Missing { field: &'static str },
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
    #[error("username must only contain alpha-numeric characters")]
    NotAlphanumeric,
    #[error("email must be a valid email")]
    InvalidEmail,
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Trimmed, lower-cased email used as the lookup key everywhere.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Non-empty and at most `max` characters (not bytes).
pub fn bounded(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::Missing { field });
    }
    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(())
}

pub fn name(value: &str) -> Result<(), ValidationError> {
    bounded("name", value, NAME_MAX)
}

pub fn username(value: &str) -> Result<(), ValidationError> {
    if !value.is_empty() && !value.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ValidationError::NotAlphanumeric);
    }
    bounded("username", value, USERNAME_MAX)
}

/// Well-formed address within the length cap.
pub fn email(value: &str) -> Result<(), ValidationError> {
    bounded("email", value, EMAIL_MAX)?;
    if !is_valid_email(value) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

/// Lookup key only: present and within the cap, format unchecked.
pub fn email_key(value: &str) -> Result<(), ValidationError> {
    bounded("email", value, EMAIL_MAX)
}

pub fn password(value: &str) -> Result<(), ValidationError> {
    bounded("password", value, PASSWORD_MAX)
}
