use async_trait::async_trait;
use parking_lot::RwLock;

use crate::errors::Result;
use crate::storage::{LinkRecord, LinkSlot, STORAGE_KEY, decode_links, encode_links};

/// In-process slot holding the serialized collection
///
/// Keeps the encoded string rather than the records so it goes through the
/// same decode path as the file backend, corrupt content included.
#[derive(Debug, Default)]
pub struct MemorySlot {
    content: RwLock<Option<String>>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot pre-filled with raw content, which may be invalid.
    pub fn with_raw<S: Into<String>>(content: S) -> Self {
        Self {
            content: RwLock::new(Some(content.into())),
        }
    }

    pub fn raw(&self) -> Option<String> {
        self.content.read().clone()
    }
}

#[async_trait]
impl LinkSlot for MemorySlot {
    async fn load(&self) -> Vec<LinkRecord> {
        match self.content.read().as_deref() {
            Some(content) => decode_links(content, STORAGE_KEY),
            None => Vec::new(),
        }
    }

    async fn save(&self, links: &[LinkRecord]) -> Result<()> {
        let encoded = encode_links(links)?;
        *self.content.write() = Some(encoded);
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
