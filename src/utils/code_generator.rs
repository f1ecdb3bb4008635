//! Short code generation and validation utilities.
//!
//! Generated codes come from the OS random source; custom codes chosen by
//! users are validated against the route table so they can never shadow a
//! page of the application.

use crate::error::AppError;
use base64::Engine as _;
use serde_json::json;

/// Random bytes per generated code (encodes to 8 characters).
const CODE_LENGTH_BYTES: usize = 6;

/// Custom code length bounds.
pub const CUSTOM_CODE_MIN_LEN: usize = 4;
pub const CUSTOM_CODE_MAX_LEN: usize = 32;

/// Longest code the redirect path will look up.
pub const MAX_CODE_LEN: usize = CUSTOM_CODE_MAX_LEN;

/// Codes that collide with application routes.
pub const RESERVED_CODES: &[&str] = &[
    "api",
    "dashboard",
    "health",
    "sign-in",
    "sign-out",
    "sign-up",
    "static",
    "admin",
];

/// Generates a random short code.
///
/// Encodes 6 bytes from `getrandom` as URL-safe base64 without padding,
/// producing an 8-character code over `[A-Za-z0-9_-]`.
///
/// # Errors
///
/// Returns [`AppError::Internal`] if the system random source fails.
pub fn generate_code() -> Result<String, AppError> {
    let mut buffer = [0u8; CODE_LENGTH_BYTES];

    getrandom::fill(&mut buffer).map_err(|e| {
        AppError::internal(
            "Failed to generate short code",
            json!({ "reason": e.to_string() }),
        )
    })?;

    Ok(base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer))
}

/// Returns true for codes that collide with application routes.
pub fn is_reserved(code: &str) -> bool {
    RESERVED_CODES
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(code))
}

/// Validates a user-provided custom short code.
///
/// # Rules
///
/// - Length: 4-32 characters
/// - Allowed characters: lowercase letters, digits, hyphens
/// - Cannot start or end with a hyphen
/// - Cannot be a reserved route name
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any rule is violated.
pub fn validate_custom_code(code: &str) -> Result<(), AppError> {
    if code.len() < CUSTOM_CODE_MIN_LEN || code.len() > CUSTOM_CODE_MAX_LEN {
        return Err(AppError::bad_request(
            format!(
                "Custom code must be {CUSTOM_CODE_MIN_LEN}-{CUSTOM_CODE_MAX_LEN} characters"
            ),
            json!({ "field": "code", "provided_length": code.len() }),
        ));
    }

    if !code
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(AppError::bad_request(
            "Custom code can only contain lowercase letters, digits, and hyphens",
            json!({ "field": "code", "code": code }),
        ));
    }

    if code.starts_with('-') || code.ends_with('-') {
        return Err(AppError::bad_request(
            "Custom code cannot start or end with a hyphen",
            json!({ "field": "code", "code": code }),
        ));
    }

    if is_reserved(code) {
        return Err(AppError::bad_request(
            "This code is reserved",
            json!({ "field": "code", "code": code }),
        ));
    }

    Ok(())
}
