//! Health check and metrics endpoint handlers.

use actix_web::{get, web, HttpResponse};
use prometheus::{Encoder, Registry, TextEncoder};

use crate::errors::AppError;

/// Health check endpoint
#[get("/health")]
pub(super) async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Prometheus text exposition, 404 when metrics are disabled
#[get("/metrics")]
pub(super) async fn metrics(
    registry: Option<web::Data<Registry>>,
) -> Result<HttpResponse, AppError> {
    let Some(registry) = registry else {
        return Err(AppError::NotFound("Metrics are disabled".into()));
    };

    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    encoder
        .encode(&registry.gather(), &mut buffer)
        .map_err(|e| AppError::internal(format!("Failed to encode metrics: {}", e)))?;

    Ok(HttpResponse::Ok()
        .content_type(encoder.format_type())
        .body(buffer))
}
