//! Startup helpers shared by server and CLI modes

use std::sync::Arc;

use tracing::debug;

use crate::config::StaticConfig;
use crate::errors::Result;
use crate::services::LinkStore;
use crate::storage::StorageFactory;

/// Build the link store described by `config`.
pub fn prepare_link_store(config: &StaticConfig) -> Result<Arc<LinkStore>> {
    let slot = StorageFactory::create(&config.storage)?;
    debug!(
        "Link store ready: backend={}, code_length={}, expiry_months={}",
        slot.backend_name(),
        config.links.code_length,
        config.links.expiry_months
    );
    Ok(Arc::new(LinkStore::new(slot, config.links.clone())))
}
