//! Redirect endpoint handler.

use actix_session::Session;
use actix_web::{get, http::header, web, HttpResponse};

use crate::errors::AppError;
use crate::metrics::AppMetrics;
use crate::services;
use crate::session::SessionContext;
use crate::store::Store;

/// Redirect to the long URL
///
/// Public: anyone holding the short link can follow it. Each call records a
/// click, and the session gets a visitor token on its first redirect.
#[get("/u/{short_code}")]
pub(super) async fn redirect_to_url(
    store: web::Data<Store>,
    metrics: Option<web::Data<AppMetrics>>,
    session: Session,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let short_code = path.into_inner();

    let mut context = SessionContext::load(&session)?;
    let long_url = services::resolve_url(&store, &mut context, &short_code)?;
    context.save(&session)?;

    if let Some(ref m) = metrics {
        m.record_redirect();
    }

    Ok(HttpResponse::Found()
        .insert_header((header::LOCATION, long_url))
        .finish())
}
