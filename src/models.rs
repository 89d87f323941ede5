//! Data models and DTOs (Data Transfer Objects) for the URL shortener.
//!
//! Contains the in-memory entities, form payloads and the typed view
//! models returned by the page routes.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::constants::{VISIT_MONTH_FORMAT, VISIT_TIME_FORMAT};

// ============================================================================
// Registry Models
// ============================================================================

/// A registered account
#[derive(Debug, Clone)]
pub struct User {
    /// Opaque six-character id
    pub id: String,
    /// Login email, unique across all users
    pub email: String,
    /// Argon2 PHC string
    pub password_hash: String,
}

/// A short alias for a long URL
#[derive(Debug, Clone)]
pub struct ShortLink {
    /// The short code (e.g., "b2xVn2")
    pub short_code: String,
    /// Destination, always starts with a scheme
    pub long_url: String,
    /// Id of the user who created the link
    pub owner_id: String,
    /// Number of redirects served
    pub click_count: u64,
    /// One token per distinct visiting session
    pub visitor_tokens: Vec<String>,
    /// When each redirect happened, oldest first
    pub visit_timestamps: Vec<DateTime<Utc>>,
}

impl ShortLink {
    /// Create a link with empty analytics
    pub fn new(short_code: String, long_url: String, owner_id: String) -> Self {
        Self {
            short_code,
            long_url,
            owner_id,
            click_count: 0,
            visitor_tokens: Vec::new(),
            visit_timestamps: Vec::new(),
        }
    }
}

// ============================================================================
// Form DTOs
// ============================================================================

/// Form body for registration and login
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CredentialsForm {
    #[validate(custom(function = "validate_not_blank"))]
    pub email: String,
    #[validate(custom(function = "validate_not_blank"))]
    pub password: String,
}

/// Form body for creating a short link
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUrlForm {
    #[serde(rename = "longURL")]
    pub long_url: String,
}

/// Rejects empty and whitespace-only fields
fn validate_not_blank(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        Err(validator::ValidationError::new("blank"))
    } else {
        Ok(())
    }
}

// ============================================================================
// View Models
// ============================================================================

/// Public view of a user, never carries the password hash
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserView {
    pub id: String,
    pub email: String,
}

impl UserView {
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            email: user.email.clone(),
        }
    }
}

/// A short link as shown on the index and detail pages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkView {
    /// The short code
    pub short_code: String,
    /// The full redirect URL ({base_url}/u/{code})
    pub short_url: String,
    /// The destination URL
    pub long_url: String,
    /// Total redirects
    pub click_count: u64,
    /// Distinct visiting sessions
    pub unique_visitors: usize,
    /// Rendered visit times, oldest first
    pub visits: Vec<String>,
}

impl LinkView {
    /// Create a LinkView from a ShortLink and base URL
    pub fn from_link(link: &ShortLink, base_url: &str) -> Self {
        Self {
            short_code: link.short_code.clone(),
            short_url: format!("{}/u/{}", base_url, link.short_code),
            long_url: link.long_url.clone(),
            click_count: link.click_count,
            unique_visitors: link.visitor_tokens.len(),
            visits: link.visit_timestamps.iter().map(format_visit).collect(),
        }
    }
}

/// View for the registration, login and new-link forms
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormView {
    pub user: Option<UserView>,
}

/// View for `GET /urls`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrlIndexView {
    pub user: Option<UserView>,
    /// The caller's links keyed by short code
    pub urls: BTreeMap<String, LinkView>,
}

/// View for `GET /urls/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrlShowView {
    pub user: UserView,
    pub link: LinkView,
}

/// Generic API error response
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code (for programmatic handling)
    pub code: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.into(),
        }
    }
}

/// Render a visit time like "October 14th, 2026, 7:05 AM UTC"
pub fn format_visit(at: &DateTime<Utc>) -> String {
    let day = at.day();
    format!(
        "{} {}{}, {} UTC",
        at.format(VISIT_MONTH_FORMAT),
        day,
        ordinal_suffix(day),
        at.format(VISIT_TIME_FORMAT)
    )
}

fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}
