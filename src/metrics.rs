//! Prometheus metrics module for the URL shortener.
//!
//! Counts registrations, logins, link creations, redirects and refused
//! owner-only operations.

use prometheus::{Counter, CounterVec, Opts, Registry};

const NAMESPACE: &str = "url_shortener";

/// Application metrics for Prometheus monitoring
#[derive(Clone)]
pub struct AppMetrics {
    /// Total accounts registered
    pub registrations_total: Counter,
    /// Login attempts with result label (success, failure)
    pub logins_total: CounterVec,
    /// Total URLs created
    pub urls_created_total: Counter,
    /// Total URL redirects performed
    pub redirects_total: Counter,
    /// Refused operations with action label (show, edit, delete, create)
    pub authorization_denials_total: CounterVec,
}

impl AppMetrics {
    /// Create and register all custom metrics with the given Prometheus registry
    pub fn new(registry: &Registry) -> Result<Self, prometheus::Error> {
        let registrations_total = Counter::with_opts(
            Opts::new("registrations_total", "Total accounts registered").namespace(NAMESPACE),
        )?;
        registry.register(Box::new(registrations_total.clone()))?;

        let logins_total = CounterVec::new(
            Opts::new("logins_total", "Total login attempts").namespace(NAMESPACE),
            &["result"],
        )?;
        registry.register(Box::new(logins_total.clone()))?;

        let urls_created_total = Counter::with_opts(
            Opts::new("urls_created_total", "Total URLs created").namespace(NAMESPACE),
        )?;
        registry.register(Box::new(urls_created_total.clone()))?;

        let redirects_total = Counter::with_opts(
            Opts::new("redirects_total", "Total URL redirects performed").namespace(NAMESPACE),
        )?;
        registry.register(Box::new(redirects_total.clone()))?;

        let authorization_denials_total = CounterVec::new(
            Opts::new(
                "authorization_denials_total",
                "Owner-only operations refused",
            )
            .namespace(NAMESPACE),
            &["action"],
        )?;
        registry.register(Box::new(authorization_denials_total.clone()))?;

        Ok(Self {
            registrations_total,
            logins_total,
            urls_created_total,
            redirects_total,
            authorization_denials_total,
        })
    }

    pub fn record_registration(&self) {
        self.registrations_total.inc();
    }

    /// Record a login attempt, `result` is "success" or "failure"
    pub fn record_login(&self, result: &str) {
        self.logins_total.with_label_values(&[result]).inc();
    }

    pub fn record_url_created(&self) {
        self.urls_created_total.inc();
    }

    pub fn record_redirect(&self) {
        self.redirects_total.inc();
    }

    /// Record a refused show/edit/delete
    pub fn record_denial(&self, action: &str) {
        self.authorization_denials_total
            .with_label_values(&[action])
            .inc();
    }
}
