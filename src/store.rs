//! In-memory store for users and short links.
//!
//! Both registries sit behind a single mutex so that every request sees
//! and applies create/read/update/delete operations atomically. Nothing
//! is persisted; the store lives for the lifetime of the process.

use std::collections::HashMap;

use parking_lot::{Mutex, MutexGuard};

use crate::constants::{DEMO_LINKS, DEMO_USERS};
use crate::errors::AppError;
use crate::models::{ShortLink, User};
use crate::services::hash_password;

/// The two registries guarded by [`Store`]
#[derive(Debug, Default)]
pub struct Registries {
    /// Users keyed by id
    pub users: HashMap<String, User>,
    /// Short links keyed by short code
    pub links: HashMap<String, ShortLink>,
}

impl Registries {
    /// Look up a link, failing with NotFound for unknown codes
    pub fn link(&self, short_code: &str) -> Result<&ShortLink, AppError> {
        self.links
            .get(short_code)
            .ok_or_else(|| AppError::link_not_found(short_code))
    }

    /// Mutable variant of [`Registries::link`]
    pub fn link_mut(&mut self, short_code: &str) -> Result<&mut ShortLink, AppError> {
        self.links
            .get_mut(short_code)
            .ok_or_else(|| AppError::link_not_found(short_code))
    }

    pub fn user_by_email(&self, email: &str) -> Option<&User> {
        self.users.values().find(|user| user.email == email)
    }

    /// All links whose owner is `user_id`
    pub fn links_owned_by<'a>(
        &'a self,
        user_id: &'a str,
    ) -> impl Iterator<Item = &'a ShortLink> + 'a {
        self.links
            .values()
            .filter(move |link| link.owner_id == user_id)
    }
}

/// Process-wide store shared by all workers
#[derive(Debug, Default)]
pub struct Store {
    inner: Mutex<Registries>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock both registries for the duration of one operation
    pub fn lock(&self) -> MutexGuard<'_, Registries> {
        self.inner.lock()
    }
}

/// Install the sample users and links
///
/// Existing entries with the same keys are left untouched.
pub fn seed_demo_data(store: &Store) -> Result<(), AppError> {
    let mut hashed = Vec::with_capacity(DEMO_USERS.len());
    for (id, email, password) in DEMO_USERS {
        hashed.push((id, email, hash_password(password)?));
    }

    let mut registries = store.lock();
    for (id, email, password_hash) in hashed {
        registries.users.entry(id.to_string()).or_insert_with(|| User {
            id: id.to_string(),
            email: email.to_string(),
            password_hash,
        });
    }
    for (code, long_url, owner) in DEMO_LINKS {
        registries.links.entry(code.to_string()).or_insert_with(|| {
            ShortLink::new(code.to_string(), long_url.to_string(), owner.to_string())
        });
    }

    log::info!(
        "Seeded {} demo users and {} demo links",
        DEMO_USERS.len(),
        DEMO_LINKS.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::verify_password;

    #[test]
    fn test_link_lookup_reports_not_found() {
        let store = Store::new();
        let mut registries = store.lock();

        assert!(matches!(registries.link("nope00"), Err(AppError::NotFound(_))));
        assert!(matches!(
            registries.link_mut("nope00"),
            Err(AppError::NotFound(_))
        ));

        registries.links.insert(
            "abc123".into(),
            ShortLink::new("abc123".into(), "http://www.example.com".into(), "u1".into()),
        );
        assert_eq!(
            registries.link("abc123").unwrap().long_url,
            "http://www.example.com"
        );
    }

    #[test]
    fn test_links_owned_by() {
        let store = Store::new();
        let mut registries = store.lock();
        for (code, owner) in [("aaaaaa", "u1"), ("bbbbbb", "u2"), ("cccccc", "u1")] {
            registries.links.insert(
                code.into(),
                ShortLink::new(code.into(), "http://www.example.com".into(), owner.into()),
            );
        }

        assert_eq!(registries.links_owned_by("u1").count(), 2);
        assert_eq!(registries.links_owned_by("u2").count(), 1);
        assert_eq!(registries.links_owned_by("nobody").count(), 0);
    }

    #[test]
    fn test_seed_demo_data() {
        let store = Store::new();
        seed_demo_data(&store).unwrap();

        let registries = store.lock();
        assert_eq!(registries.users.len(), 2);
        assert_eq!(registries.links.len(), 2);

        let user = registries.user_by_email("user1@example.com").unwrap();
        assert_eq!(user.id, "x5RsDv");
        assert!(verify_password("purple-monkey-dinosaur", &user.password_hash).unwrap());

        let link = registries.link("b2xVn2").unwrap();
        assert_eq!(link.owner_id, "x5RsDv");
        assert_eq!(link.click_count, 0);
    }
}
