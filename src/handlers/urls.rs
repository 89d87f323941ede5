//! URL endpoint handlers: listing, creation, detail, edit and delete.

use std::collections::HashMap;

use actix_session::Session;
use actix_web::{delete, get, post, put, web, HttpResponse};

use super::{redirect_to, session_user};
use crate::config::Config;
use crate::errors::AppError;
use crate::metrics::AppMetrics;
use crate::models::{CreateUrlForm, FormView, LinkView, UrlIndexView, UrlShowView};
use crate::services::{self, LinkAction};
use crate::session::{AuthenticatedUser, SessionContext};
use crate::store::Store;

/// Count refused owner-only operations before passing the error on
fn record_denial(metrics: &Option<web::Data<AppMetrics>>, action: &str, err: &AppError) {
    if let (Some(m), AppError::AuthError(_)) = (metrics, err) {
        m.record_denial(action);
    }
}

/// List the caller's links, empty for anonymous sessions
#[get("/urls")]
pub(super) async fn list_urls(
    store: web::Data<Store>,
    config: web::Data<Config>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let context = SessionContext::load(&session)?;
    let user = session_user(&store, &context);

    let urls = services::list_urls_for_user(&store, user.as_ref().map(|u| u.id.as_str()))
        .into_iter()
        .map(|(code, link)| (code, LinkView::from_link(&link, &config.base_url)))
        .collect();

    Ok(HttpResponse::Ok().json(UrlIndexView { user, urls }))
}

/// Show the creation form
#[get("/urls/new")]
pub(super) async fn new_url_page(
    store: web::Data<Store>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let context = SessionContext::load(&session)?;
    match session_user(&store, &context) {
        Some(user) => Ok(HttpResponse::Ok().json(FormView { user: Some(user) })),
        None => Ok(redirect_to("/login")),
    }
}

/// Create a new short URL owned by the caller
#[post("/urls/new")]
pub(super) async fn create_url(
    user: Result<AuthenticatedUser, AppError>,
    store: web::Data<Store>,
    metrics: Option<web::Data<AppMetrics>>,
    form: Result<web::Form<CreateUrlForm>, actix_web::Error>,
) -> Result<HttpResponse, AppError> {
    // Anonymous callers get 403 even when the form is malformed
    let user = user.inspect_err(|e| record_denial(&metrics, "create", e))?;
    let form = form.map_err(|e| AppError::ValidationError(format!("Invalid form: {}", e)))?;

    let link = services::create_url(&store, &form.long_url, &user.user_id)?;

    if let Some(ref m) = metrics {
        m.record_url_created();
    }

    Ok(redirect_to(&format!("/urls/{}", link.short_code)))
}

/// Show a link's detail page to its owner
#[get("/urls/{id}")]
pub(super) async fn show_url(
    store: web::Data<Store>,
    config: web::Data<Config>,
    metrics: Option<web::Data<AppMetrics>>,
    session: Session,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let short_code = path.into_inner();
    let context = SessionContext::load(&session)?;
    let user = session_user(&store, &context);

    let link = services::get_owned_url(&store, &short_code, user.as_ref().map(|u| u.id.as_str()))
        .inspect_err(|e| record_denial(&metrics, LinkAction::Show.label(), e))?;

    // Ownership was checked against this user
    let user = user.ok_or_else(AppError::not_logged_in)?;

    Ok(HttpResponse::Ok().json(UrlShowView {
        user,
        link: LinkView::from_link(&link, &config.base_url),
    }))
}

/// Point a link at a new long URL
///
/// The new URL comes from the `longURL` field, or from the field named
/// after the short code.
#[put("/urls/{id}")]
pub(super) async fn update_url(
    store: web::Data<Store>,
    metrics: Option<web::Data<AppMetrics>>,
    session: Session,
    path: web::Path<String>,
    form: web::Form<HashMap<String, String>>,
) -> Result<HttpResponse, AppError> {
    let short_code = path.into_inner();
    let context = SessionContext::load(&session)?;
    let editor = session_user(&store, &context).map(|u| u.id);

    let new_long_url = form
        .get("longURL")
        .or_else(|| form.get(&short_code))
        .map(String::as_str)
        .unwrap_or_default();

    services::update_url(&store, &short_code, new_long_url, editor.as_deref())
        .inspect_err(|e| record_denial(&metrics, LinkAction::Edit.label(), e))?;

    Ok(redirect_to("/urls"))
}

/// Delete a link
#[delete("/urls/{id}")]
pub(super) async fn delete_url(
    store: web::Data<Store>,
    metrics: Option<web::Data<AppMetrics>>,
    session: Session,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let short_code = path.into_inner();
    let context = SessionContext::load(&session)?;
    let requester = session_user(&store, &context).map(|u| u.id);

    services::delete_url(&store, &short_code, requester.as_deref())
        .inspect_err(|e| record_denial(&metrics, LinkAction::Delete.label(), e))?;

    Ok(redirect_to("/urls"))
}

/// The edit button leads to the detail page
#[get("/urls/{id}/edit")]
pub(super) async fn edit_url_page(path: web::Path<String>) -> HttpResponse {
    redirect_to(&format!("/urls/{}", path.into_inner()))
}
