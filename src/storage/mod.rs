//! Storage slot abstraction
//!
//! The whole link collection lives in one named slot and is always read and
//! written as a unit. Backends only move the serialized collection around;
//! expiry and uniqueness rules belong to [`crate::services::LinkStore`].

pub mod backends;
mod models;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::config::StorageConfig;
use crate::errors::{Result, UrlgptError};

pub use backends::{FileSlot, MemorySlot};
pub use models::{LinkRecord, LinkStats};

/// Default name of the slot holding the collection
pub const STORAGE_KEY: &str = "urlgpt_urls";

#[async_trait]
pub trait LinkSlot: Send + Sync {
    /// Read the persisted collection, newest-first.
    ///
    /// Missing or unreadable content yields an empty collection.
    async fn load(&self) -> Vec<LinkRecord>;

    /// Replace the persisted collection.
    async fn save(&self, links: &[LinkRecord]) -> Result<()>;

    fn backend_name(&self) -> &'static str;
}

/// Decode the serialized collection, treating corrupt content as empty.
pub fn decode_links(content: &str, source: &str) -> Vec<LinkRecord> {
    if content.trim().is_empty() {
        return Vec::new();
    }
    match serde_json::from_str::<Vec<LinkRecord>>(content) {
        Ok(links) => links,
        Err(e) => {
            warn!(
                "Storage slot '{}' is not a valid link collection, treating it as empty: {}",
                source, e
            );
            Vec::new()
        }
    }
}

pub fn encode_links(links: &[LinkRecord]) -> Result<String> {
    serde_json::to_string_pretty(links)
        .map_err(|e| UrlgptError::serialization(format!("Failed to encode links: {}", e)))
}

pub struct StorageFactory;

impl StorageFactory {
    pub fn create(config: &StorageConfig) -> Result<Arc<dyn LinkSlot>> {
        let slot: Arc<dyn LinkSlot> = match config.backend.as_str() {
            "file" => Arc::new(FileSlot::new(&config.path)),
            "memory" => Arc::new(MemorySlot::new()),
            other => {
                return Err(UrlgptError::config(format!(
                    "Unknown storage backend '{}'. Valid: file, memory",
                    other
                )));
            }
        };
        info!("Using storage backend: {}", slot.backend_name());
        Ok(slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_corrupt_is_empty() {
        assert!(decode_links("{not json", "test").is_empty());
        assert!(decode_links("", "test").is_empty());
        assert!(decode_links("{\"id\": 1}", "test").is_empty());
    }

    #[test]
    fn test_decode_wire_format() {
        let content = r#"[{
            "id": "0b6c7c0e-6f0c-4a43-9a43-7f8f7b1d2c3e",
            "original_url": "https://example.com",
            "short_code": "aB3dE9",
            "click_count": 4,
            "expires_at": "2024-02-29T12:00:00Z",
            "created_at": "2024-01-31T12:00:00.000Z"
        }]"#;
        let links = decode_links(content, "test");
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].short_code, "aB3dE9");
        assert_eq!(links[0].click_count, 4);
    }

    #[test]
    fn test_factory_rejects_unknown_backend() {
        let config = StorageConfig {
            backend: "sled".to_string(),
            path: "unused.json".to_string(),
        };
        assert!(matches!(
            StorageFactory::create(&config),
            Err(UrlgptError::Config(_))
        ));
    }
}
