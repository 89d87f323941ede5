//! Auth endpoint handlers: landing page, registration, login and logout.

use actix_session::Session;
use actix_web::{get, post, web, HttpResponse};
use validator::Validate;

use super::{redirect_to, session_user};
use crate::errors::AppError;
use crate::metrics::AppMetrics;
use crate::models::{CredentialsForm, FormView};
use crate::services;
use crate::session::SessionContext;
use crate::store::Store;

/// Send logged-in sessions to their links and everyone else to login
#[get("/")]
pub(super) async fn home(
    store: web::Data<Store>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let context = SessionContext::load(&session)?;
    if session_user(&store, &context).is_some() {
        Ok(redirect_to("/urls"))
    } else {
        Ok(redirect_to("/login"))
    }
}

/// Show the registration form
#[get("/register")]
pub(super) async fn register_page(
    store: web::Data<Store>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    anonymous_form(&store, &session)
}

/// Register a new user and log them in
#[post("/register")]
pub(super) async fn register(
    store: web::Data<Store>,
    metrics: Option<web::Data<AppMetrics>>,
    session: Session,
    form: web::Form<CredentialsForm>,
) -> Result<HttpResponse, AppError> {
    form.validate().map_err(|_| AppError::blank_credentials())?;

    let mut context = SessionContext::load(&session)?;
    let CredentialsForm { email, password } = form.into_inner();

    // Argon2 runs on the blocking pool
    let store = store.into_inner();
    let (result, context) = web::block(move || {
        let result = services::register_user(&store, &mut context, &email, &password);
        (result, context)
    })
    .await?;
    result?;
    context.save(&session)?;

    if let Some(ref m) = metrics {
        m.record_registration();
    }

    Ok(redirect_to("/urls"))
}

/// Show the login form
#[get("/login")]
pub(super) async fn login_page(
    store: web::Data<Store>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    anonymous_form(&store, &session)
}

/// Check credentials and log the user in
#[post("/login")]
pub(super) async fn login(
    store: web::Data<Store>,
    metrics: Option<web::Data<AppMetrics>>,
    session: Session,
    form: web::Form<CredentialsForm>,
) -> Result<HttpResponse, AppError> {
    let mut context = SessionContext::load(&session)?;
    let CredentialsForm { email, password } = form.into_inner();

    let store = store.into_inner();
    let (result, context) = web::block(move || {
        let result = services::login_user(&store, &mut context, &email, &password);
        (result, context)
    })
    .await?;

    if let Some(ref m) = metrics {
        m.record_login(if result.is_ok() { "success" } else { "failure" });
    }

    result?;
    context.save(&session)?;
    Ok(redirect_to("/urls"))
}

/// Clear the session identity
#[post("/logout")]
pub(super) async fn logout(session: Session) -> Result<HttpResponse, AppError> {
    let mut context = SessionContext::load(&session)?;
    services::logout_user(&mut context);
    context.save(&session)?;

    Ok(redirect_to("/urls"))
}

/// Logged-in users are sent to /urls instead of the form
fn anonymous_form(store: &Store, session: &Session) -> Result<HttpResponse, AppError> {
    let context = SessionContext::load(session)?;
    if session_user(store, &context).is_some() {
        return Ok(redirect_to("/urls"));
    }

    Ok(HttpResponse::Ok().json(FormView { user: None }))
}
