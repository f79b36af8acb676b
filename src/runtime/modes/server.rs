//! Server mode
//!
//! Configures and starts the HTTP server.

use actix_web::{
    App, HttpServer,
    middleware::{Compress, DefaultHeaders},
    web,
};
use anyhow::Result;
use tracing::{info, warn};

use crate::api::AppContext;
use crate::config::get_config;
use crate::runtime::lifetime::startup::prepare_link_store;

/// Run the HTTP server
///
/// **Note**: Logging system must be initialized before calling this function
pub async fn run_server() -> Result<()> {
    let config = get_config();

    let store = prepare_link_store(&config).map_err(|e| {
        tracing::error!("Server startup failed: {}", e);
        e
    })?;

    // 启动时清理一次过期链接
    let live = store.load_all().await?;
    info!("Loaded {} live links", live.len());

    let ctx = AppContext::new(store, config.server.default_url.clone());
    if ctx.default_url.is_empty() {
        info!("No default_url configured, GET / returns 404");
    }

    let cpu_count = config.server.cpu_count.clamp(1, 32);
    warn!("Using {} CPU cores for the server", cpu_count);

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    warn!("Starting server at http://{}", bind_address);

    HttpServer::new(move || {
        App::new()
            .wrap(Compress::default())
            .wrap(DefaultHeaders::new().add(("X-Content-Type-Options", "nosniff")))
            .app_data(web::PayloadConfig::new(64 * 1024))
            .configure(|cfg| ctx.configure(cfg))
    })
    .keep_alive(std::time::Duration::from_secs(30))
    .workers(cpu_count)
    .bind(bind_address)?
    .run()
    .await?;

    info!("Server stopped");
    Ok(())
}
