//! Application configuration module.
//!
//! Handles loading configuration from environment variables.

use std::env;

use actix_web::cookie::Key;

use crate::constants::MIN_SESSION_SECRET_BYTES;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address
    pub host: String,
    /// Server port
    pub port: u16,
    /// Base URL for rendering short links
    pub base_url: String,
    /// Secret used to sign and encrypt the session cookie
    pub session_secret: Option<String>,
    /// Name of the session cookie
    pub session_cookie_name: String,
    /// Only send the session cookie over HTTPS
    pub cookie_secure: bool,
    /// Install the demo users and links at startup
    pub seed_demo_data: bool,
    /// Requests replenished per second, per client IP
    pub rate_limit_per_second: u64,
    /// Burst size allowed before rate limiting kicks in
    pub rate_limit_burst: u32,
    /// Enable Prometheus metrics endpoint
    pub metrics_enabled: bool,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// # Environment Variables
    /// - `HOST`: Server host (default: "127.0.0.1")
    /// - `PORT`: Server port (default: 8080)
    /// - `BASE_URL`: Base URL for short links (default: "http://{HOST}:{PORT}")
    /// - `SESSION_SECRET`: Cookie key material, at least 64 bytes (default: random per process)
    /// - `SESSION_COOKIE_NAME`: Session cookie name (default: "session")
    /// - `COOKIE_SECURE`: Mark the session cookie Secure (default: false)
    /// - `SEED_DEMO_DATA`: Install demo users and links (default: false)
    /// - `RATE_LIMIT_PER_SECOND`: Replenish rate per client (default: 1)
    /// - `RATE_LIMIT_BURST`: Burst size per client (default: 60)
    /// - `METRICS_ENABLED`: Enable Prometheus metrics endpoint (default: true)
    pub fn from_env() -> Self {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port: u16 = env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .expect("PORT must be a valid number");

        let base_url =
            env::var("BASE_URL").unwrap_or_else(|_| format!("http://{}:{}", host, port));

        Self {
            host,
            port,
            base_url: base_url.trim_end_matches('/').to_string(),
            session_secret: env::var("SESSION_SECRET").ok().filter(|s| !s.is_empty()),
            session_cookie_name: env::var("SESSION_COOKIE_NAME")
                .unwrap_or_else(|_| "session".to_string()),
            cookie_secure: env_flag("COOKIE_SECURE", false),
            seed_demo_data: env_flag("SEED_DEMO_DATA", false),
            rate_limit_per_second: env::var("RATE_LIMIT_PER_SECOND")
                .unwrap_or_else(|_| "1".to_string())
                .parse()
                .expect("RATE_LIMIT_PER_SECOND must be a valid number"),
            rate_limit_burst: env::var("RATE_LIMIT_BURST")
                .unwrap_or_else(|_| "60".to_string())
                .parse()
                .expect("RATE_LIMIT_BURST must be a valid number"),
            metrics_enabled: env_flag("METRICS_ENABLED", true),
        }
    }

    /// Cookie key derived from `session_secret`
    ///
    /// Falls back to a random key when the secret is missing or shorter than
    /// 64 bytes. Sessions then do not survive a restart.
    pub fn session_key(&self) -> Key {
        match &self.session_secret {
            Some(secret) if secret.len() >= MIN_SESSION_SECRET_BYTES => {
                Key::from(secret.as_bytes())
            }
            Some(_) => {
                log::warn!(
                    "SESSION_SECRET shorter than {} bytes, using a random session key",
                    MIN_SESSION_SECRET_BYTES
                );
                Key::generate()
            }
            None => {
                log::warn!("SESSION_SECRET not set, using a random session key");
                Key::generate()
            }
        }
    }
}

fn env_flag(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            base_url: "http://localhost:8080".to_string(),
            session_secret: None,
            session_cookie_name: "session".to_string(),
            cookie_secure: false,
            seed_demo_data: false,
            rate_limit_per_second: 1,
            rate_limit_burst: 60,
            metrics_enabled: true,
        }
    }
}
