use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use sqlx::MySqlPool;

use crate::modules::gateways::GatewayService;

/// Health check response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub gateways: Vec<String>,
}

/// Readiness probe response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub checks: ReadinessChecks,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReadinessChecks {
    pub database: bool,
    pub gateways: bool,
}

/// GET /health - Liveness probe
/// Returns 200 with the registered gateways; does not check dependencies
pub async fn health_check(service: web::Data<GatewayService>) -> impl Responder {
    let response = HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        gateways: service
            .list_gateways()
            .into_iter()
            .map(|gateway| gateway.name)
            .collect(),
    };

    HttpResponse::Ok().json(response)
}

/// GET /ready - Readiness probe
/// Checks the invoice database is reachable and at least one gateway is registered
pub async fn readiness_check(
    pool: web::Data<MySqlPool>,
    service: web::Data<GatewayService>,
) -> impl Responder {
    let mut checks = ReadinessChecks {
        database: false,
        gateways: !service.list_gateways().is_empty(),
    };

    match sqlx::query("SELECT 1").execute(pool.get_ref()).await {
        Ok(_) => checks.database = true,
        Err(e) => tracing::error!("Database readiness check failed: {}", e),
    }

    let ready = checks.database && checks.gateways;
    let response = ReadinessResponse { ready, checks };

    if ready {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}

/// Configure health check routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/ready", web::get().to(readiness_check));
}
