use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, trace};

use crate::api::AppContext;
use crate::services::LinkStore;

// 应用启动时间结构体
#[derive(Clone, Debug)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct HealthResponse {
    pub status: String,
    pub backend: String,
    pub links_count: Option<usize>,
    pub uptime_secs: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub struct HealthService;

impl HealthService {
    pub async fn health_check(
        store: web::Data<Arc<LinkStore>>,
        ctx: web::Data<AppContext>,
    ) -> impl Responder {
        trace!("Received health check request");
        let uptime_secs = (chrono::Utc::now() - ctx.start_time.start_datetime).num_seconds();
        let backend = store.backend_name().to_string();

        match store.load_all().await {
            Ok(links) => HttpResponse::Ok().json(HealthResponse {
                status: "healthy".to_string(),
                backend,
                links_count: Some(links.len()),
                uptime_secs,
                error: None,
            }),
            Err(e) => {
                error!("Storage health check failed: {}", e);
                HttpResponse::ServiceUnavailable().json(HealthResponse {
                    status: "unhealthy".to_string(),
                    backend,
                    links_count: None,
                    uptime_secs,
                    error: Some(e.to_string()),
                })
            }
        }
    }

    pub async fn liveness_check() -> impl Responder {
        HttpResponse::NoContent().finish()
    }
}

pub fn health_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(HealthService::health_check))
        .route("", web::head().to(HealthService::health_check))
        .route("/live", web::get().to(HealthService::liveness_check))
        .route("/live", web::head().to(HealthService::liveness_check));
}
