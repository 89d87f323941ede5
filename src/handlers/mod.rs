//! HTTP request handlers for the URL shortener.
//!
//! Defines all route handlers and configures the routing table.

mod auth;
mod health;
mod redirect;
mod urls;

use actix_web::{http::header, web, HttpResponse};

use crate::models::UserView;
use crate::services;
use crate::session::SessionContext;
use crate::store::Store;

/// Configure all application routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(auth::home)
        .service(auth::register_page)
        .service(auth::register)
        .service(auth::login_page)
        .service(auth::login)
        .service(auth::logout)
        .service(urls::list_urls)
        // Register /urls/new before the /urls/{id} routes
        .service(urls::new_url_page)
        .service(urls::create_url)
        .service(urls::show_url)
        .service(urls::update_url)
        .service(urls::delete_url)
        .service(urls::edit_url_page)
        .service(redirect::redirect_to_url)
        .service(health::health_check)
        .service(health::metrics);
}

/// `302 Found` to `location`
fn redirect_to(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// The logged-in user, or None when the session's id is unknown
fn session_user(store: &Store, context: &SessionContext) -> Option<UserView> {
    services::current_user(store, context).map(|user| UserView::from_user(&user))
}
