//! Shared utilities used across all service domains.
//!
//! Contains code generation, collision handling, URL normalization and
//! password hashing.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::Rng;

use crate::constants::{
    CHARSET_LOWER, CHARSET_UPPER, CODE_LENGTH, DEFAULT_SCHEME_PREFIX, REQUIRED_URL_MARKER,
    SCHEME_SEPARATOR,
};
use crate::errors::AppError;

// ============================================================================
// ID Generation
// ============================================================================

/// Generate a random six-character code
///
/// Each position flips a coin between the lowercase and uppercase charset,
/// then samples uniformly inside it. Digits live in both charsets, so each
/// digit is twice as likely as any single letter.
pub fn generate_code() -> String {
    let mut rng = rand::thread_rng();
    (0..CODE_LENGTH)
        .map(|_| {
            let charset = if rng.gen_bool(0.5) {
                CHARSET_UPPER
            } else {
                CHARSET_LOWER
            };
            charset[rng.gen_range(0..charset.len())] as char
        })
        .collect()
}

/// Pick a code not rejected by `exists`, regenerating at most once
pub fn allocate_code(
    exists: impl Fn(&str) -> bool,
    mut generate: impl FnMut() -> String,
) -> Result<String, AppError> {
    let code = generate();
    if !exists(&code) {
        return Ok(code);
    }

    log::debug!("Generated code '{}' collided, regenerating", code);
    let code = generate();
    if exists(&code) {
        log::error!("Generated code '{}' collided twice", code);
        return Err(AppError::code_space_exhausted());
    }
    Ok(code)
}

// ============================================================================
// URL Normalization
// ============================================================================

/// Validate a submitted long URL and make sure it carries a scheme
pub fn normalize_long_url(raw: &str) -> Result<String, AppError> {
    let trimmed = raw.trim();
    if !trimmed.contains(REQUIRED_URL_MARKER) {
        return Err(AppError::missing_www());
    }

    if has_scheme(trimmed) {
        Ok(trimmed.to_string())
    } else {
        Ok(format!("{}{}", DEFAULT_SCHEME_PREFIX, trimmed))
    }
}

/// True when the URL starts with `<scheme>://`
fn has_scheme(url: &str) -> bool {
    let Some((scheme, _)) = url.split_once(SCHEME_SEPARATOR) else {
        return false;
    };
    let mut chars = scheme.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        _ => false,
    }
}

// ============================================================================
// Password Hashing
// ============================================================================

/// Hash a password with a random salt using Argon2id
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Check a password against a stored Argon2 hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    let parsed_hash = PasswordHash::new(hash)?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
