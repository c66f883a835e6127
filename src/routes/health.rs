use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

use crate::models::HealthResponse;
use crate::routes::AppState;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(root))
        .route("/health", web::get().to(health_check));
}

async fn root() -> impl Responder {
    HttpResponse::Ok().json(json!({ "message": "Malta Trip Buddy API is running!" }))
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let store_healthy = match state.catalog.store().health_check().await {
        Ok(healthy) => healthy,
        Err(e) => {
            tracing::warn!("Document store health check failed: {}", e);
            false
        }
    };

    let status = if store_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}
