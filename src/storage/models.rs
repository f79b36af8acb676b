use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::expiry::is_expired;

/// One shortened URL as persisted in the storage slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    pub id: String,
    pub original_url: String,
    pub short_code: String,
    #[serde(default)]
    pub click_count: u64,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl LinkRecord {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        is_expired(self.expires_at, now)
    }
}

/// Aggregate numbers shown on the dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkStats {
    pub total_links: usize,
    pub total_clicks: u64,
}

impl LinkStats {
    pub fn from_links(links: &[LinkRecord]) -> Self {
        Self {
            total_links: links.len(),
            total_clicks: links.iter().map(|l| l.click_count).sum(),
        }
    }
}
