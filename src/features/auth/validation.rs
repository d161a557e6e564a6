//! Local checks run before any auth call touches the network.

use crate::api::ApiError;
use regex::Regex;

pub const CODE_LENGTH: usize = 6;

#[must_use]
pub fn valid_email(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").map_or(false, |re| re.is_match(email))
}

#[must_use]
pub fn valid_code(code: &str) -> bool {
    code.len() == CODE_LENGTH && code.bytes().all(|b| b.is_ascii_digit())
}

/// Returns the trimmed value or a validation error naming the field.
pub(crate) fn required<'a>(value: &'a str, field: &str) -> Result<&'a str, ApiError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ApiError::Validation(format!("{field} is required")))
    } else {
        Ok(trimmed)
    }
}

pub(crate) fn registration(email: &str, username: &str) -> Result<(String, String), ApiError> {
    let email = required(email, "Email")?;
    let username = required(username, "Username")?;
    if !valid_email(email) {
        return Err(ApiError::Validation("Email address is not valid".to_string()));
    }
    Ok((email.to_string(), username.to_string()))
}

pub(crate) fn credentials(username: &str, password: &str) -> Result<String, ApiError> {
    let username = required(username, "Username")?;
    if password.is_empty() {
        return Err(ApiError::Validation("Password is required".to_string()));
    }
    Ok(username.to_string())
}

pub(crate) fn code(code: &str) -> Result<String, ApiError> {
    let code = code.trim();
    if valid_code(code) {
        Ok(code.to_string())
    } else {
        Err(ApiError::Validation(format!(
            "Code must contain {CODE_LENGTH} digits"
        )))
    }
}

pub(crate) fn passwords(password: &str, password2: &str) -> Result<(), ApiError> {
    if password.is_empty() || password2.is_empty() {
        return Err(ApiError::Validation("Both passwords are required".to_string()));
    }
    if password != password2 {
        return Err(ApiError::Validation("Passwords do not match".to_string()));
    }
    Ok(())
}
