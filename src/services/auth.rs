//! User registration, login and logout services.

use super::helpers::{allocate_code, generate_code, hash_password, verify_password};
use crate::errors::AppError;
use crate::models::User;
use crate::session::SessionContext;
use crate::store::Store;

// ============================================================================
// User Management
// ============================================================================

/// Register a new user and log them in
///
/// Fails with a ValidationError for blank credentials or a taken email.
/// The registry is left untouched on failure.
pub fn register_user(
    store: &Store,
    session: &mut SessionContext,
    email: &str,
    password: &str,
) -> Result<User, AppError> {
    let email = email.trim();
    if email.is_empty() || password.trim().is_empty() {
        return Err(AppError::blank_credentials());
    }

    // Hashing stays outside the registry lock
    let password_hash = hash_password(password)?;

    let mut registries = store.lock();
    if registries.user_by_email(email).is_some() {
        log::warn!("Registration rejected, email already exists: {}", email);
        return Err(AppError::email_taken());
    }

    let id = allocate_code(|c| registries.users.contains_key(c), generate_code)?;
    let user = User {
        id: id.clone(),
        email: email.to_string(),
        password_hash,
    };
    registries.users.insert(id.clone(), user.clone());
    drop(registries);

    session.user_id = Some(id.clone());
    log::info!("Registered new user: {} (ID: {})", email, id);

    Ok(user)
}

/// Check credentials and log the user in
pub fn login_user(
    store: &Store,
    session: &mut SessionContext,
    email: &str,
    password: &str,
) -> Result<User, AppError> {
    let user = store.lock().user_by_email(email.trim()).cloned();

    let Some(user) = user else {
        log::warn!("Login failed, unknown email: {}", email);
        return Err(AppError::invalid_credentials());
    };

    if !verify_password(password, &user.password_hash)? {
        log::warn!("Login failed, wrong password for user {}", user.id);
        return Err(AppError::invalid_credentials());
    }

    session.user_id = Some(user.id.clone());
    log::info!("User {} logged in", user.id);

    Ok(user)
}

/// Clear the session identity, a no-op when already logged out
pub fn logout_user(session: &mut SessionContext) {
    if let Some(id) = session.user_id.take() {
        log::info!("User {} logged out", id);
    }
}

/// Get a user by ID
pub fn get_user_by_id(store: &Store, user_id: &str) -> Option<User> {
    store.lock().users.get(user_id).cloned()
}

/// The user the session belongs to, if it still exists
pub fn current_user(store: &Store, session: &SessionContext) -> Option<User> {
    session
        .user_id
        .as_deref()
        .and_then(|id| get_user_by_id(store, id))
}
