//! Custom error types for the URL shortener application.
//!
//! Implements proper error handling with automatic HTTP response conversion.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use std::fmt;

use crate::models::ErrorResponse;

/// Application-level errors
#[derive(Debug)]
pub enum AppError {
    /// Invalid input data (blank fields, duplicate email, missing "www.")
    ValidationError(String),
    /// Not logged in, bad credentials, or not the owner of the resource
    AuthError(String),
    /// Short code was not found
    NotFound(String),
    /// Internal server error
    InternalError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            AppError::AuthError(msg) => write!(f, "Forbidden: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

// ============================================================================
// Constructor Methods
// ============================================================================

impl AppError {
    /// Registration with an empty or whitespace-only email or password
    pub fn blank_credentials() -> Self {
        AppError::ValidationError("Email and Password fields cannot be empty!".into())
    }

    /// Registration with an email that is already taken
    pub fn email_taken() -> Self {
        AppError::ValidationError("Email already exists!".into())
    }

    /// Login with an unknown email or a wrong password
    pub fn invalid_credentials() -> Self {
        AppError::AuthError("Incorrect Email or Password!".into())
    }

    /// Anonymous caller on a route that requires a session
    pub fn not_logged_in() -> Self {
        AppError::AuthError("Must be logged in first!".into())
    }

    /// Authenticated caller acting on someone else's link
    pub fn not_owner(action: &str) -> Self {
        AppError::AuthError(format!("Cannot {} URLs you didn't make!", action))
    }

    /// Long URL without the required "www." marker
    pub fn missing_www() -> Self {
        AppError::ValidationError("URLs must contain \"www.\"".into())
    }

    /// Unknown short code
    pub fn link_not_found(short_code: &str) -> Self {
        AppError::NotFound(format!("Shortened URL '{}' doesn't exist!", short_code))
    }

    /// Both generation attempts collided with existing entries
    pub fn code_space_exhausted() -> Self {
        AppError::InternalError("Failed to generate a unique code".into())
    }

    /// Create an InternalError with a message
    pub fn internal(message: impl Into<String>) -> Self {
        AppError::InternalError(message.into())
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::AuthError(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let (error_code, message) = match self {
            AppError::ValidationError(msg) => ("VALIDATION_ERROR", msg.clone()),
            AppError::AuthError(msg) => ("AUTH_ERROR", msg.clone()),
            AppError::NotFound(msg) => ("NOT_FOUND", msg.clone()),
            AppError::InternalError(msg) => ("INTERNAL_ERROR", msg.clone()),
        };

        HttpResponse::build(self.status_code()).json(ErrorResponse::new(message, error_code))
    }
}

/// Convert session read failures to AppError
impl From<actix_session::SessionGetError> for AppError {
    fn from(err: actix_session::SessionGetError) -> Self {
        log::error!("Session read error: {:?}", err);
        AppError::InternalError(format!("Session error: {}", err))
    }
}

/// Convert session write failures to AppError
impl From<actix_session::SessionInsertError> for AppError {
    fn from(err: actix_session::SessionInsertError) -> Self {
        log::error!("Session write error: {:?}", err);
        AppError::InternalError(format!("Session error: {}", err))
    }
}

/// Convert blocking-pool failures to AppError
impl From<actix_web::error::BlockingError> for AppError {
    fn from(err: actix_web::error::BlockingError) -> Self {
        log::error!("Blocking task error: {:?}", err);
        AppError::InternalError(format!("Blocking task error: {}", err))
    }
}

/// Convert password hashing failures to AppError
impl From<argon2::password_hash::Error> for AppError {
    fn from(err: argon2::password_hash::Error) -> Self {
        log::error!("Password hash error: {:?}", err);
        AppError::InternalError(format!("Password hash error: {}", err))
    }
}
