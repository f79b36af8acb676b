//! HTTP surface
//!
//! - `/{code}`: redirect
//! - `/api`: link management used by the dashboard
//! - `/health`: health probes

pub mod services;

use std::sync::Arc;

use actix_web::web;

use crate::services::{LinkStore, RedirectResolver};
use services::{AppStartTime, health_routes, link_routes, redirect_routes};

/// Shared state handed to every worker
#[derive(Clone)]
pub struct AppContext {
    pub store: Arc<LinkStore>,
    pub resolver: Arc<RedirectResolver>,
    /// Target of `GET /`, empty for 404
    pub default_url: String,
    pub start_time: AppStartTime,
}

impl AppContext {
    pub fn new<S: Into<String>>(store: Arc<LinkStore>, default_url: S) -> Self {
        Self {
            resolver: Arc::new(RedirectResolver::new(store.clone())),
            store,
            default_url: default_url.into(),
            start_time: AppStartTime {
                start_datetime: chrono::Utc::now(),
            },
        }
    }

    /// Register app data and all routes. Scopes come before the catch-all
    /// short code route.
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::new(self.store.clone()))
            .app_data(web::Data::new(self.resolver.clone()))
            .app_data(web::Data::new(self.clone()))
            .service(web::scope("/api").configure(link_routes))
            .service(web::scope("/health").configure(health_routes))
            .configure(redirect_routes);
    }
}
