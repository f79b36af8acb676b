use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, error, warn};

use crate::errors::{Result, UrlgptError};
use crate::storage::{LinkRecord, LinkSlot, decode_links, encode_links};

/// JSON file holding the whole collection
///
/// Writes go to a sibling `.tmp` file first and are renamed into place, so a
/// concurrent reader sees either the old or the new collection.
pub struct FileSlot {
    file_path: PathBuf,
}

impl FileSlot {
    pub fn new<P: AsRef<Path>>(file_path: P) -> Self {
        Self {
            file_path: file_path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .file_path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "urlgpt_urls.json".into());
        name.push(".tmp");
        self.file_path.with_file_name(name)
    }
}

#[async_trait]
impl LinkSlot for FileSlot {
    async fn load(&self) -> Vec<LinkRecord> {
        match tokio::fs::read_to_string(&self.file_path).await {
            Ok(content) => {
                let links = decode_links(&content, &self.file_path.display().to_string());
                debug!(
                    "Loaded {} links from {}",
                    links.len(),
                    self.file_path.display()
                );
                links
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(
                    "Links file {} does not exist yet, starting empty",
                    self.file_path.display()
                );
                Vec::new()
            }
            Err(e) => {
                warn!(
                    "Failed to read links file {}, treating it as empty: {}",
                    self.file_path.display(),
                    e
                );
                Vec::new()
            }
        }
    }

    async fn save(&self, links: &[LinkRecord]) -> Result<()> {
        let json = encode_links(links)?;

        if let Some(parent) = self.file_path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }

        let temp_path = self.temp_path();
        tokio::fs::write(&temp_path, json).await.map_err(|e| {
            error!("Failed to write {}: {}", temp_path.display(), e);
            UrlgptError::storage_write(format!(
                "Failed to write links file {}: {}",
                temp_path.display(),
                e
            ))
        })?;
        tokio::fs::rename(&temp_path, &self.file_path)
            .await
            .map_err(|e| {
                error!("Failed to replace {}: {}", self.file_path.display(), e);
                UrlgptError::storage_write(format!(
                    "Failed to replace links file {}: {}",
                    self.file_path.display(),
                    e
                ))
            })?;

        debug!("Saved {} links to {}", links.len(), self.file_path.display());
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "file"
    }
}
