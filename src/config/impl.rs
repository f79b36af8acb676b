use std::sync::{Arc, OnceLock};

use arc_swap::ArcSwap;

use super::StaticConfig;
use crate::errors::Result;

static CONFIG: OnceLock<ArcSwap<StaticConfig>> = OnceLock::new();

/// Get the global configuration instance
///
/// Falls back to defaults if [`init_config`] was never called.
pub fn get_config() -> Arc<StaticConfig> {
    CONFIG
        .get_or_init(|| ArcSwap::from_pointee(StaticConfig::default()))
        .load_full()
}

/// Initialize the global configuration
///
/// Loads `path` (or "config.toml" in the current directory when `None`)
/// plus `URLGPT__*` environment overrides. A missing default file is not an
/// error; a missing explicit file is.
pub fn init_config(path: Option<&str>) -> Result<Arc<StaticConfig>> {
    let loaded = StaticConfig::load(path)?;
    set_config(loaded);
    Ok(get_config())
}

/// Replace the global configuration
pub fn set_config(config: StaticConfig) {
    match CONFIG.get() {
        Some(current) => current.store(Arc::new(config)),
        None => {
            let swap = CONFIG.get_or_init(|| ArcSwap::from_pointee(config.clone()));
            swap.store(Arc::new(config));
        }
    }
}
