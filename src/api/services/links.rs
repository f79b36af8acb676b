//! Link management API
//!
//! The data side of the dashboard: list, create, look up, delete, stats.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};

use crate::errors::UrlgptError;
use crate::services::{CreateLinkRequest, LinkStore};

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ApiResponse<T> {
    pub code: i32,
    pub data: T,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ErrorBody {
    pub error_code: String,
    pub error_type: String,
    pub message: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PostNewLink {
    pub original_url: String,
    #[serde(default)]
    pub custom_alias: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct DeleteResult {
    pub deleted: bool,
}

/// HTTP 状态码映射
pub fn status_for(err: &UrlgptError) -> StatusCode {
    match err {
        UrlgptError::InvalidUrl(_) | UrlgptError::InvalidAlias(_) => StatusCode::BAD_REQUEST,
        UrlgptError::AliasConflict(_) => StatusCode::CONFLICT,
        UrlgptError::CodeSpaceExhausted(_) => StatusCode::SERVICE_UNAVAILABLE,
        UrlgptError::StorageWrite(_) | UrlgptError::Serialization(_) | UrlgptError::Config(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn json_response<T: Serialize>(status: StatusCode, code: i32, data: T) -> HttpResponse {
    HttpResponse::build(status)
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(ApiResponse { code, data })
}

pub fn error_response(err: &UrlgptError) -> HttpResponse {
    let status = status_for(err);
    if status.is_server_error() {
        error!("Links API: {}", err);
    }
    json_response(
        status,
        1,
        ErrorBody {
            error_code: err.code().to_string(),
            error_type: err.error_type().to_string(),
            message: err.message().to_string(),
        },
    )
}

pub struct LinksService;

impl LinksService {
    pub async fn list_links(store: web::Data<Arc<LinkStore>>) -> impl Responder {
        match store.load_all().await {
            Ok(links) => json_response(StatusCode::OK, 0, links),
            Err(e) => error_response(&e),
        }
    }

    pub async fn create_link(
        body: web::Json<PostNewLink>,
        store: web::Data<Arc<LinkStore>>,
    ) -> impl Responder {
        let body = body.into_inner();
        info!(
            "Links API: create request - alias: {:?}, url: {}",
            body.custom_alias, body.original_url
        );

        let req = CreateLinkRequest {
            original_url: body.original_url,
            custom_alias: body.custom_alias,
        };
        match store.create(req).await {
            Ok(link) => json_response(StatusCode::CREATED, 0, link),
            Err(e) => error_response(&e),
        }
    }

    pub async fn get_link(
        code: web::Path<String>,
        store: web::Data<Arc<LinkStore>>,
    ) -> impl Responder {
        let code = code.into_inner();
        match store.find_by_code(&code).await {
            Ok(Some(link)) => json_response(StatusCode::OK, 0, link),
            Ok(None) => json_response(
                StatusCode::NOT_FOUND,
                1,
                ErrorBody {
                    error_code: "E404".to_string(),
                    error_type: "Not Found".to_string(),
                    message: format!("Short code '{}' not found", code),
                },
            ),
            Err(e) => error_response(&e),
        }
    }

    pub async fn delete_link(
        id: web::Path<String>,
        store: web::Data<Arc<LinkStore>>,
    ) -> impl Responder {
        match store.delete(&id).await {
            Ok(deleted) => json_response(StatusCode::OK, 0, DeleteResult { deleted }),
            Err(e) => error_response(&e),
        }
    }

    pub async fn get_stats(store: web::Data<Arc<LinkStore>>) -> impl Responder {
        match store.stats().await {
            Ok(stats) => json_response(StatusCode::OK, 0, stats),
            Err(e) => error_response(&e),
        }
    }
}

/// `/api` 路由配置
pub fn link_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/links", web::get().to(LinksService::list_links))
        .route("/links", web::post().to(LinksService::create_link))
        .route("/links/{code}", web::get().to(LinksService::get_link))
        .route("/links/{id}", web::delete().to(LinksService::delete_link))
        .route("/stats", web::get().to(LinksService::get_stats));
}
