//! Short link CRUD and ownership services.

use std::collections::BTreeMap;

use super::helpers::{allocate_code, generate_code, normalize_long_url};
use crate::errors::AppError;
use crate::models::ShortLink;
use crate::store::Store;

/// Owner-only operations on a link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkAction {
    Show,
    Edit,
    Delete,
}

impl LinkAction {
    /// Verb used in the "Cannot ... URLs you didn't make!" message
    fn verb(self) -> &'static str {
        match self {
            LinkAction::Show | LinkAction::Edit => "edit",
            LinkAction::Delete => "delete",
        }
    }

    /// Metric label
    pub fn label(self) -> &'static str {
        match self {
            LinkAction::Show => "show",
            LinkAction::Edit => "edit",
            LinkAction::Delete => "delete",
        }
    }
}

/// Require an authenticated requester who owns the link
fn authorize_owner(
    link: &ShortLink,
    requester_id: Option<&str>,
    action: LinkAction,
) -> Result<(), AppError> {
    let Some(requester_id) = requester_id else {
        return Err(AppError::not_logged_in());
    };
    if link.owner_id != requester_id {
        log::warn!(
            "User {} denied {} on '{}' owned by {}",
            requester_id,
            action.label(),
            link.short_code,
            link.owner_id
        );
        return Err(AppError::not_owner(action.verb()));
    }
    Ok(())
}

/// Create a new short link owned by `owner_id`
pub fn create_url(store: &Store, long_url: &str, owner_id: &str) -> Result<ShortLink, AppError> {
    let long_url = normalize_long_url(long_url)?;

    let mut registries = store.lock();
    let short_code = allocate_code(|c| registries.links.contains_key(c), generate_code)?;
    let link = ShortLink::new(short_code.clone(), long_url, owner_id.to_string());
    registries.links.insert(short_code.clone(), link.clone());

    log::info!(
        "Created short URL: {} -> {} (user: {})",
        short_code,
        link.long_url,
        owner_id
    );

    Ok(link)
}

/// All links owned by the user, keyed by short code
///
/// Anonymous callers and unknown ids get an empty map.
pub fn list_urls_for_user(store: &Store, user_id: Option<&str>) -> BTreeMap<String, ShortLink> {
    let Some(user_id) = user_id else {
        return BTreeMap::new();
    };

    store
        .lock()
        .links_owned_by(user_id)
        .map(|link| (link.short_code.clone(), link.clone()))
        .collect()
}

/// Get a link by its short code (no ownership check)
pub fn get_url(store: &Store, short_code: &str) -> Result<ShortLink, AppError> {
    store.lock().link(short_code).cloned()
}

/// Get a link for its owner's detail page
pub fn get_owned_url(
    store: &Store,
    short_code: &str,
    requester_id: Option<&str>,
) -> Result<ShortLink, AppError> {
    if requester_id.is_none() {
        return Err(AppError::not_logged_in());
    }

    let registries = store.lock();
    let link = registries.link(short_code)?;
    authorize_owner(link, requester_id, LinkAction::Show)?;
    Ok(link.clone())
}

/// Point an existing link at a new long URL
///
/// Click count, visitors and visit history are preserved, and so is the
/// recorded owner.
pub fn update_url(
    store: &Store,
    short_code: &str,
    new_long_url: &str,
    editor_id: Option<&str>,
) -> Result<ShortLink, AppError> {
    if editor_id.is_none() {
        return Err(AppError::not_logged_in());
    }

    let mut registries = store.lock();
    let link = registries.link_mut(short_code)?;
    authorize_owner(link, editor_id, LinkAction::Edit)?;

    link.long_url = normalize_long_url(new_long_url)?;
    log::info!("Updated short URL: {} -> {}", short_code, link.long_url);

    Ok(link.clone())
}

/// Remove a link entirely
pub fn delete_url(
    store: &Store,
    short_code: &str,
    requester_id: Option<&str>,
) -> Result<(), AppError> {
    if requester_id.is_none() {
        return Err(AppError::not_logged_in());
    }

    let mut registries = store.lock();
    authorize_owner(registries.link(short_code)?, requester_id, LinkAction::Delete)?;
    registries.links.remove(short_code);

    log::info!(
        "Deleted short URL: {} (user: {})",
        short_code,
        requester_id.unwrap_or_default()
    );
    Ok(())
}
