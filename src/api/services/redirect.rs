use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, web};
use std::sync::Arc;
use tracing::{error, trace};

use crate::api::AppContext;
use crate::services::{LinkStore, RedirectResolver, RedirectState};
use crate::utils::{is_reserved_route, is_valid_alias};

const NOT_FOUND_BODY: &str = "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>Link Not Found</title></head>\
<body><h2>Link Not Found</h2><p>This short link doesn't exist or has been deleted.</p><a href=\"/\">Go to Dashboard</a></body></html>";

const EXPIRED_BODY: &str = "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>Link Expired</title></head>\
<body><h2>Link Expired</h2><p>This short link has expired. All links expire after 1 month.</p><a href=\"/\">Go to Dashboard</a></body></html>";

pub struct RedirectService {}

impl RedirectService {
    pub async fn handle_root(ctx: web::Data<AppContext>) -> impl Responder {
        if ctx.default_url.is_empty() {
            Self::not_found_response()
        } else {
            HttpResponse::TemporaryRedirect()
                .insert_header(("Location", ctx.default_url.as_str()))
                .finish()
        }
    }

    pub async fn handle_redirect(
        path: web::Path<String>,
        store: web::Data<Arc<LinkStore>>,
        resolver: web::Data<Arc<RedirectResolver>>,
    ) -> impl Responder {
        Self::respond(path.into_inner(), &store, &resolver, true).await
    }

    /// `HEAD` 只查询状态，不计入点击
    pub async fn handle_redirect_head(
        path: web::Path<String>,
        store: web::Data<Arc<LinkStore>>,
        resolver: web::Data<Arc<RedirectResolver>>,
    ) -> impl Responder {
        Self::respond(path.into_inner(), &store, &resolver, false).await
    }

    async fn respond(
        code: String,
        store: &LinkStore,
        resolver: &RedirectResolver,
        count_click: bool,
    ) -> HttpResponse {
        // 保留路由与非法短码直接 404，不触碰存储
        if is_reserved_route(&code, &store.settings().reserved_routes) || !is_valid_alias(&code) {
            trace!("Rejected short code path: {}", &code);
            return Self::not_found_response();
        }

        let resolved = if count_click {
            resolver.resolve(Some(&code)).await
        } else {
            resolver.preview(Some(&code)).await
        };

        match resolved {
            Ok(state) => {
                trace!("Short code '{}' resolved to {}", code, state.as_str());
                match state {
                    RedirectState::Redirecting(target) => {
                        HttpResponse::build(StatusCode::TEMPORARY_REDIRECT)
                            .insert_header(("Location", target))
                            .insert_header(("Cache-Control", "no-store"))
                            .finish()
                    }
                    RedirectState::Expired => Self::expired_response(),
                    RedirectState::NotFound | RedirectState::Loading => {
                        Self::not_found_response()
                    }
                }
            }
            Err(e) => {
                error!("Redirect for '{}' failed: {}", code, e);
                Self::error_response()
            }
        }
    }

    #[inline]
    fn not_found_response() -> HttpResponse {
        HttpResponse::build(StatusCode::NOT_FOUND)
            .insert_header(("Content-Type", "text/html; charset=utf-8"))
            .insert_header(("Cache-Control", "no-store"))
            .body(NOT_FOUND_BODY)
    }

    #[inline]
    fn expired_response() -> HttpResponse {
        HttpResponse::build(StatusCode::GONE)
            .insert_header(("Content-Type", "text/html; charset=utf-8"))
            .insert_header(("Cache-Control", "no-store"))
            .body(EXPIRED_BODY)
    }

    #[inline]
    fn error_response() -> HttpResponse {
        HttpResponse::build(StatusCode::INTERNAL_SERVER_ERROR)
            .insert_header(("Content-Type", "text/html; charset=utf-8"))
            .body("Internal Server Error")
    }
}

/// Redirect 路由配置
///
/// Any single path segment is a short code; deeper paths fall through to 404.
pub fn redirect_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(RedirectService::handle_root))
        .route("/", web::head().to(RedirectService::handle_root))
        .route("/{code}", web::get().to(RedirectService::handle_redirect))
        .route("/{code}", web::head().to(RedirectService::handle_redirect_head));
}
