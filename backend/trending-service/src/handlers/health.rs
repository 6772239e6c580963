use actix_web::{web, HttpResponse};
use serde::Serialize;
use sqlx::PgPool;
use std::time::Instant;
use tracing::warn;

const SERVICE_NAME: &str = "trending-service";

pub struct HealthState {
    pub db_pool: PgPool,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    service: &'static str,
    version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    latency_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl HealthState {
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }

    async fn check_postgres(&self) -> Result<(), sqlx::Error> {
        let mut conn = db_pool::acquire_with_metrics(&self.db_pool, SERVICE_NAME).await?;
        sqlx::query("SELECT 1")
            .fetch_one(&mut *conn)
            .await
            .map(|_| ())
    }
}

/// GET /api/v1/health
pub async fn health_summary(state: web::Data<HealthState>) -> HttpResponse {
    let start = Instant::now();
    let result = state.check_postgres().await;
    let latency_ms = Some(start.elapsed().as_millis() as u64);

    match result {
        Ok(()) => HttpResponse::Ok().json(HealthResponse {
            status: "ok",
            service: SERVICE_NAME,
            version: env!("CARGO_PKG_VERSION"),
            latency_ms,
            error: None,
        }),
        Err(e) => {
            warn!("Health check failed: {}", e);
            HttpResponse::ServiceUnavailable().json(HealthResponse {
                status: "unhealthy",
                service: SERVICE_NAME,
                version: env!("CARGO_PKG_VERSION"),
                latency_ms,
                error: Some(format!("PostgreSQL connection failed: {}", e)),
            })
        }
    }
}

/// GET /api/v1/health/live
pub async fn liveness_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({"alive": true}))
}
