//! Cookie-backed sessions.
//!
//! The session cookie carries the logged-in user's id and the anonymous
//! unique-visitor token. Handlers load it into a plain [`SessionContext`],
//! hand that to the services, and write it back afterwards.

use actix_session::{
    config::CookieContentSecurity, storage::CookieSessionStore, Session, SessionExt,
    SessionMiddleware,
};
use actix_web::{cookie::Key, dev::Payload, web, FromRequest, HttpRequest};
use std::future::{ready, Ready};

use crate::config::Config;
use crate::constants::{SESSION_USER_ID_KEY, SESSION_VISITOR_KEY};
use crate::errors::AppError;
use crate::services;
use crate::store::Store;

/// Explicit per-request view of the session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
    /// Id of the logged-in user
    pub user_id: Option<String>,
    /// Assigned on the session's first redirect
    pub visitor_token: Option<String>,
}

impl SessionContext {
    /// Read the context out of the cookie session
    pub fn load(session: &Session) -> Result<Self, AppError> {
        Ok(Self {
            user_id: session.get::<String>(SESSION_USER_ID_KEY)?,
            visitor_token: session.get::<String>(SESSION_VISITOR_KEY)?,
        })
    }

    /// Write the context back into the cookie session
    pub fn save(&self, session: &Session) -> Result<(), AppError> {
        for (key, value) in [
            (SESSION_USER_ID_KEY, &self.user_id),
            (SESSION_VISITOR_KEY, &self.visitor_token),
        ] {
            match value {
                Some(value) => session.insert(key, value)?,
                None => {
                    session.remove(key);
                }
            }
        }
        Ok(())
    }
}

/// Build the cookie session middleware
///
/// `key` must be shared by every worker so any of them can read the cookie.
pub fn session_middleware(key: Key, config: &Config) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name(config.session_cookie_name.clone())
        .cookie_secure(config.cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .build()
}

/// Authenticated user extractor for protecting endpoints.
///
/// Add this to handler parameters to require a logged-in session whose
/// user still exists in the store. Fails with a 403 otherwise.
pub struct AuthenticatedUser {
    pub user_id: String,
}

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, AppError> {
    let store = req
        .app_data::<web::Data<Store>>()
        .ok_or_else(|| AppError::internal("Store not available"))?;

    let context = SessionContext::load(&req.get_session())?;
    match services::current_user(store, &context) {
        Some(user) => Ok(AuthenticatedUser { user_id: user.id }),
        None => Err(AppError::not_logged_in()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_test_user, setup_test_store, test_config};
    use actix_web::{get, test, App, HttpResponse};

    #[get("/protected")]
    async fn protected_endpoint(user: AuthenticatedUser) -> HttpResponse {
        HttpResponse::Ok().json(serde_json::json!({
            "user_id": user.user_id
        }))
    }

    #[get("/login-as/{id}")]
    async fn login_as(session: Session, path: web::Path<String>) -> Result<HttpResponse, AppError> {
        let context = SessionContext {
            user_id: Some(path.into_inner()),
            visitor_token: None,
        };
        context.save(&session)?;
        Ok(HttpResponse::Ok().finish())
    }

    #[get("/context")]
    async fn show_context(session: Session) -> Result<HttpResponse, AppError> {
        let context = SessionContext::load(&session)?;
        Ok(HttpResponse::Ok().json(serde_json::json!({
            "user_id": context.user_id,
            "visitor_token": context.visitor_token,
        })))
    }

    #[actix_rt::test]
    async fn test_missing_session_returns_403() {
        let store = setup_test_store();
        let config = test_config();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(store))
                .wrap(session_middleware(config.session_key(), &config))
                .service(protected_endpoint),
        )
        .await;

        let req = test::TestRequest::get().uri("/protected").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 403);
    }

    #[actix_rt::test]
    async fn test_session_for_existing_user_passes() {
        let store = setup_test_store();
        let user = create_test_user(&store, "a@x.com", "pw1");
        let config = test_config();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(store))
                .wrap(session_middleware(config.session_key(), &config))
                .service(protected_endpoint)
                .service(login_as),
        )
        .await;

        let req = test::TestRequest::get()
            .uri(&format!("/login-as/{}", user.id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        let cookie = resp
            .response()
            .cookies()
            .find(|c| c.name() == config.session_cookie_name)
            .map(|c| c.into_owned())
            .expect("session cookie");

        let req = test::TestRequest::get()
            .uri("/protected")
            .cookie(cookie)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["user_id"], user.id);
    }

    #[actix_rt::test]
    async fn test_session_for_unknown_user_returns_403() {
        let store = setup_test_store();
        let config = test_config();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(store))
                .wrap(session_middleware(config.session_key(), &config))
                .service(protected_endpoint)
                .service(login_as),
        )
        .await;

        let req = test::TestRequest::get().uri("/login-as/ghost1").to_request();
        let resp = test::call_service(&app, req).await;
        let cookie = resp
            .response()
            .cookies()
            .find(|c| c.name() == config.session_cookie_name)
            .map(|c| c.into_owned())
            .expect("session cookie");

        let req = test::TestRequest::get()
            .uri("/protected")
            .cookie(cookie)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 403);
    }

    #[actix_rt::test]
    async fn test_context_round_trips_through_cookie() {
        let config = test_config();
        let app = test::init_service(
            App::new()
                .wrap(session_middleware(config.session_key(), &config))
                .service(login_as)
                .service(show_context),
        )
        .await;

        let req = test::TestRequest::get().uri("/context").to_request();
        let resp = test::call_service(&app, req).await;
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert!(body["user_id"].is_null());

        let req = test::TestRequest::get().uri("/login-as/abc123").to_request();
        let resp = test::call_service(&app, req).await;
        let cookie = resp
            .response()
            .cookies()
            .find(|c| c.name() == config.session_cookie_name)
            .map(|c| c.into_owned())
            .expect("session cookie");

        let req = test::TestRequest::get()
            .uri("/context")
            .cookie(cookie)
            .to_request();
        let resp = test::call_service(&app, req).await;
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["user_id"], "abc123");
        assert!(body["visitor_token"].is_null());
    }
}
