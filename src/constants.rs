//! Application-wide constants.
//!
//! Centralizes magic numbers and strings for better maintainability.

// ============================================================================
// ID Generation Constants
// ============================================================================

/// Length of generated short codes, user ids and visitor tokens
pub const CODE_LENGTH: usize = 6;

/// Lowercase half of the code alphabet (digits + a-z)
pub const CHARSET_LOWER: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Uppercase half of the code alphabet (digits + A-Z)
pub const CHARSET_UPPER: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

// ============================================================================
// URL Validation Constants
// ============================================================================

/// Every long URL must contain this marker
pub const REQUIRED_URL_MARKER: &str = "www.";

/// Scheme prepended to long URLs that lack one
pub const DEFAULT_SCHEME_PREFIX: &str = "http://";

/// Separator between a scheme and the rest of a URL
pub const SCHEME_SEPARATOR: &str = "://";

// ============================================================================
// Session Constants
// ============================================================================

/// Session key holding the logged-in user's id
pub const SESSION_USER_ID_KEY: &str = "user_id";

/// Session key holding the anonymous unique-visitor token
pub const SESSION_VISITOR_KEY: &str = "unique_visitor";

/// Minimum key material actix-web's cookie `Key` accepts
pub const MIN_SESSION_SECRET_BYTES: usize = 64;

/// Query parameter used by HTML forms to tunnel PUT/DELETE through POST
pub const METHOD_OVERRIDE_PARAM: &str = "_method";

// ============================================================================
// Display Constants
// ============================================================================

/// chrono format for the month of a rendered visit timestamp
pub const VISIT_MONTH_FORMAT: &str = "%B";

/// chrono format for the year and clock time of a rendered visit timestamp
pub const VISIT_TIME_FORMAT: &str = "%Y, %-I:%M %p";

// ============================================================================
// Demo Data
// ============================================================================

/// Sample accounts installed when `SEED_DEMO_DATA` is set: (id, email, password)
pub const DEMO_USERS: [(&str, &str, &str); 2] = [
    ("x5RsDv", "user1@example.com", "purple-monkey-dinosaur"),
    ("ui98nm", "user2@example.com", "dishwasher-funk"),
];

/// Sample links installed when `SEED_DEMO_DATA` is set: (code, long url, owner id)
pub const DEMO_LINKS: [(&str, &str, &str); 2] = [
    ("b2xVn2", "http://www.lighthouselabs.ca", "x5RsDv"),
    ("9sm5xK", "http://www.google.com", "ui98nm"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_charsets_share_digits() {
        assert_eq!(&CHARSET_LOWER[..10], &CHARSET_UPPER[..10]);
        assert!(CHARSET_LOWER[10..].iter().all(|c| c.is_ascii_lowercase()));
        assert!(CHARSET_UPPER[10..].iter().all(|c| c.is_ascii_uppercase()));
    }

    #[test]
    fn test_demo_links_reference_demo_users() {
        for (_, long_url, owner) in DEMO_LINKS {
            assert!(DEMO_USERS.iter().any(|(id, _, _)| *id == owner));
            assert!(long_url.contains(REQUIRED_URL_MARKER));
        }
    }
}
