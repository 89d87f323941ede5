//! Test utilities and helpers.
//!
//! Provides common test infrastructure used across multiple test modules.
//! This module is only compiled when running tests.

#![cfg(test)]

use crate::config::Config;
use crate::models::{ShortLink, User};
use crate::session::SessionContext;
use crate::store::Store;

/// Create an empty store. Each call creates a fresh instance.
pub fn setup_test_store() -> Store {
    Store::new()
}

/// Create a test configuration with a fixed session key.
pub fn test_config() -> Config {
    Config {
        session_secret: Some("test-session-secret-".repeat(4)),
        ..Config::default()
    }
}

/// Register a test user through the auth service.
pub fn create_test_user(store: &Store, email: &str, password: &str) -> User {
    let mut session = SessionContext::default();
    crate::services::register_user(store, &mut session, email, password)
        .expect("Failed to create test user")
}

/// Create a test link owned by `owner_id`.
pub fn create_test_link(store: &Store, owner_id: &str, long_url: &str) -> ShortLink {
    crate::services::create_url(store, long_url, owner_id).expect("Failed to create test URL")
}

/// Extension trait for test assertions.
pub trait TestAssertions {
    /// Assert that a result is Ok.
    fn assert_ok(&self);
    /// Assert that a result is Err.
    fn assert_err(&self);
}

impl<T, E: std::fmt::Debug> TestAssertions for Result<T, E> {
    fn assert_ok(&self) {
        assert!(self.is_ok(), "Expected Ok, got Err: {:?}", self.as_ref().err());
    }

    fn assert_err(&self) {
        assert!(self.is_err(), "Expected Err, got Ok");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_test_config_has_usable_secret() {
        let config = test_config();
        assert!(config.session_secret.unwrap().len() >= crate::constants::MIN_SESSION_SECRET_BYTES);
    }

    #[test]
    fn test_create_test_user_and_link() {
        let store = setup_test_store();
        let user = create_test_user(&store, "test@example.com", "pw1");
        let link = create_test_link(&store, &user.id, "www.example.com");

        assert_eq!(link.owner_id, user.id);
        assert_eq!(link.long_url, "http://www.example.com");
    }

    #[test]
    fn test_assertions() {
        let ok_result: Result<i32, &str> = Ok(42);
        ok_result.assert_ok();

        let err_result: Result<i32, &str> = Err("error");
        err_result.assert_err();
    }
}
