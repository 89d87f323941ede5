//! Redirect resolution and visit tracking.

use chrono::Utc;

use super::helpers::generate_code;
use crate::errors::AppError;
use crate::session::SessionContext;
use crate::store::Store;

/// Resolve a short code to its long URL and record the visit
///
/// Every call counts a click and a timestamp. The session gets a visitor
/// token on its first redirect, and only that redirect's link records it.
pub fn resolve_url(
    store: &Store,
    session: &mut SessionContext,
    short_code: &str,
) -> Result<String, AppError> {
    let mut registries = store.lock();
    let link = registries.link_mut(short_code)?;

    link.click_count += 1;
    link.visit_timestamps.push(Utc::now());

    if session.visitor_token.is_none() {
        let token = generate_code();
        link.visitor_tokens.push(token.clone());
        session.visitor_token = Some(token);
    }

    log::info!(
        "Redirecting {} -> {} (clicks: {})",
        short_code,
        link.long_url,
        link.click_count
    );

    Ok(link.long_url.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::get_url;
    use crate::test_utils::{create_test_link, create_test_user, setup_test_store, TestAssertions};

    #[test]
    fn test_resolve_counts_clicks_and_visits() {
        let store = setup_test_store();
        let user = create_test_user(&store, "a@x.com", "pw1");
        let link = create_test_link(&store, &user.id, "www.example.com");

        let mut session = SessionContext::default();
        let long_url = resolve_url(&store, &mut session, &link.short_code).unwrap();
        assert_eq!(long_url, "http://www.example.com");

        let stored = get_url(&store, &link.short_code).unwrap();
        assert_eq!(stored.click_count, 1);
        assert_eq!(stored.visit_timestamps.len(), 1);
        assert_eq!(stored.visitor_tokens.len(), 1);
        assert_eq!(session.visitor_token.as_ref(), Some(&stored.visitor_tokens[0]));
    }

    #[test]
    fn test_repeat_visits_in_one_session_are_one_visitor() {
        let store = setup_test_store();
        let user = create_test_user(&store, "a@x.com", "pw1");
        let link = create_test_link(&store, &user.id, "www.example.com");

        let mut session = SessionContext::default();
        for _ in 0..3 {
            resolve_url(&store, &mut session, &link.short_code).unwrap();
        }

        let stored = get_url(&store, &link.short_code).unwrap();
        assert_eq!(stored.click_count, 3);
        assert_eq!(stored.visit_timestamps.len(), 3);
        assert_eq!(stored.visitor_tokens.len(), 1);
    }

    #[test]
    fn test_distinct_sessions_are_distinct_visitors() {
        let store = setup_test_store();
        let user = create_test_user(&store, "a@x.com", "pw1");
        let link = create_test_link(&store, &user.id, "www.example.com");

        let mut first = SessionContext::default();
        let mut second = SessionContext::default();
        resolve_url(&store, &mut first, &link.short_code).unwrap();
        resolve_url(&store, &mut second, &link.short_code).unwrap();

        let stored = get_url(&store, &link.short_code).unwrap();
        assert_eq!(stored.click_count, 2);
        assert_eq!(stored.visitor_tokens.len(), 2);
        for session in [&first, &second] {
            let token = session.visitor_token.as_ref().unwrap();
            assert!(stored.visitor_tokens.contains(token));
        }
    }

    #[test]
    fn test_session_with_token_adds_no_visitor() {
        let store = setup_test_store();
        let user = create_test_user(&store, "a@x.com", "pw1");
        let link = create_test_link(&store, &user.id, "www.example.com");

        let mut session = SessionContext {
            user_id: None,
            visitor_token: Some("tok001".into()),
        };
        resolve_url(&store, &mut session, &link.short_code).unwrap();

        let stored = get_url(&store, &link.short_code).unwrap();
        assert_eq!(stored.click_count, 1);
        assert!(stored.visitor_tokens.is_empty());
        assert_eq!(session.visitor_token.as_deref(), Some("tok001"));
    }

    #[test]
    fn test_token_is_recorded_only_on_first_link() {
        let store = setup_test_store();
        let user = create_test_user(&store, "a@x.com", "pw1");
        let first_link = create_test_link(&store, &user.id, "www.example.com");
        let second_link = create_test_link(&store, &user.id, "www.example.org");

        let mut session = SessionContext::default();
        resolve_url(&store, &mut session, &first_link.short_code).unwrap();
        resolve_url(&store, &mut session, &second_link.short_code).unwrap();

        let first = get_url(&store, &first_link.short_code).unwrap();
        assert_eq!(first.visitor_tokens.len(), 1);
        assert_eq!(session.visitor_token.as_ref(), Some(&first.visitor_tokens[0]));

        // The second link still counts the click but not a new visitor
        let second = get_url(&store, &second_link.short_code).unwrap();
        assert_eq!(second.click_count, 1);
        assert!(second.visitor_tokens.is_empty());
    }

    #[test]
    fn test_resolve_unknown_code() {
        let store = setup_test_store();
        let mut session = SessionContext::default();

        let result = resolve_url(&store, &mut session, "zzzzzz");

        result.assert_err();
        assert!(matches!(result, Err(AppError::NotFound(_))));
        assert!(session.visitor_token.is_none());
    }
}
