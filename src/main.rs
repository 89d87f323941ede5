//! # TinyApp
//!
//! A small URL shortener with user accounts, built with Rust and Actix-web.
//!
//! ## Features
//! - Register, log in and log out with cookie sessions
//! - Create short URLs that only their owner can edit or delete
//! - Redirect short URLs to their long URLs
//! - Track clicks, unique visitors and visit times
//! - Rate limiting for abuse protection
//! - Prometheus metrics

mod config;
mod constants;
mod errors;
mod handlers;
mod metrics;
mod middleware;
mod models;
mod services;
mod session;
mod store;
#[cfg(test)]
mod test_utils;

use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::{middleware::from_fn, middleware::Logger, web, App, HttpServer};
use log::info;
use prometheus::Registry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize environment variables from .env file
    dotenv::dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    // Load configuration
    let config = config::Config::from_env();

    // Initialize the in-memory store
    let store = web::Data::new(store::Store::new());
    if config.seed_demo_data {
        store::seed_demo_data(&store).expect("Failed to seed demo data");
    }

    // Initialize metrics
    let registry = if config.metrics_enabled {
        let registry = Registry::new();
        let metrics =
            metrics::AppMetrics::new(&registry).expect("Failed to register metrics");
        info!("Metrics enabled at /metrics");
        Some((registry, metrics))
    } else {
        None
    };

    info!(
        "Starting TinyApp server at http://{}:{}",
        config.host, config.port
    );
    info!("Routes:");
    info!("   GET  /                    - Redirect to /urls or /login");
    info!("   GET|POST /register        - Create an account");
    info!("   GET|POST /login           - Log in");
    info!("   POST /logout              - Log out");
    info!("   GET  /urls                - List your URLs");
    info!("   GET|POST /urls/new        - Create a short URL");
    info!("   GET|PUT|DELETE /urls/{{id}} - Show, edit or delete a URL");
    info!("   GET  /u/{{short_code}}      - Redirect to the long URL");

    // Capture bind address before moving config into closure
    let bind_addr = format!("{}:{}", config.host, config.port);

    let governor_conf = GovernorConfigBuilder::default()
        .per_second(config.rate_limit_per_second)
        .burst_size(config.rate_limit_burst)
        .finish()
        .expect("Failed to create rate limiter configuration");

    info!(
        "Rate limiting enabled: 1 request per {}s, burst of {} per IP",
        config.rate_limit_per_second, config.rate_limit_burst
    );

    // The session key must be shared by every worker
    let session_key = config.session_key();

    // Start HTTP server
    HttpServer::new(move || {
        let app = App::new()
            .app_data(store.clone())
            .app_data(web::Data::new(config.clone()));

        let app = match &registry {
            Some((registry, metrics)) => app
                .app_data(web::Data::new(registry.clone()))
                .app_data(web::Data::new(metrics.clone())),
            None => app,
        };

        app.wrap(session::session_middleware(session_key.clone(), &config))
            // Rewrite form POSTs carrying ?_method=
            .wrap(from_fn(middleware::method_override))
            // Enable rate limiting middleware
            .wrap(Governor::new(&governor_conf))
            // Enable logger middleware
            .wrap(Logger::default())
            .configure(handlers::configure_routes)
    })
    .bind(&bind_addr)?
    .run()
    .await
}
