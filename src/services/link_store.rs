//! Link store
//!
//! The single state authority over the link collection. Every operation is a
//! full read-modify-write of the storage slot: load, drop expired records,
//! apply the change, write the whole collection back. Within one process the
//! write lock serializes these passes so concurrent callers never lose an
//! update; separate processes sharing a slot still race (last write wins).

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::clock::{Clock, SystemClock};
use crate::config::LinksConfig;
use crate::errors::{Result, UrlgptError};
use crate::storage::{LinkRecord, LinkSlot, LinkStats};
use crate::utils::expiry::compute_expiry_with;
use crate::utils::url_validator::validate_url;
use crate::utils::{generate_random_code, is_reserved_route, is_valid_alias};

/// Request to create a new link
#[derive(Debug, Clone, Default)]
pub struct CreateLinkRequest {
    /// Destination, must be an absolute URL
    pub original_url: String,
    /// User-chosen short code; generated when absent or blank
    pub custom_alias: Option<String>,
}

impl CreateLinkRequest {
    pub fn new<S: Into<String>>(original_url: S) -> Self {
        Self {
            original_url: original_url.into(),
            custom_alias: None,
        }
    }

    pub fn with_alias<S: Into<String>>(mut self, alias: S) -> Self {
        self.custom_alias = Some(alias.into());
        self
    }
}

/// Outcome of a redirect lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimOutcome {
    /// Live record, with the click already counted when claimed
    Claimed(LinkRecord),
    /// The code belonged to an expired record, which has been removed
    Expired,
    Missing,
}

/// Collection as loaded, split into live and just-evicted records
struct Snapshot {
    live: Vec<LinkRecord>,
    evicted: Vec<LinkRecord>,
}

impl Snapshot {
    fn find(&self, code: &str) -> Option<usize> {
        self.live.iter().position(|l| l.short_code == code)
    }

    fn evicted_code(&self, code: &str) -> bool {
        self.evicted.iter().any(|l| l.short_code == code)
    }

    fn is_dirty(&self) -> bool {
        !self.evicted.is_empty()
    }
}

pub struct LinkStore {
    slot: Arc<dyn LinkSlot>,
    clock: Arc<dyn Clock>,
    settings: LinksConfig,
    write_lock: Mutex<()>,
}

impl LinkStore {
    pub fn new(slot: Arc<dyn LinkSlot>, settings: LinksConfig) -> Self {
        Self::with_clock(slot, Arc::new(SystemClock), settings)
    }

    pub fn with_clock(
        slot: Arc<dyn LinkSlot>,
        clock: Arc<dyn Clock>,
        settings: LinksConfig,
    ) -> Self {
        Self {
            slot,
            clock,
            settings,
            write_lock: Mutex::new(()),
        }
    }

    pub fn backend_name(&self) -> &'static str {
        self.slot.backend_name()
    }

    pub fn settings(&self) -> &LinksConfig {
        &self.settings
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    async fn snapshot(&self, now: DateTime<Utc>) -> Snapshot {
        let (evicted, live): (Vec<_>, Vec<_>) = self
            .slot
            .load()
            .await
            .into_iter()
            .partition(|l| l.is_expired_at(now));

        if !evicted.is_empty() {
            info!("LinkStore: evicting {} expired link(s)", evicted.len());
            for link in &evicted {
                debug!(
                    "LinkStore: '{}' expired at {}",
                    link.short_code,
                    link.expires_at.to_rfc3339()
                );
            }
        }

        Snapshot { live, evicted }
    }

    async fn persist(&self, links: &[LinkRecord]) -> Result<()> {
        self.slot.save(links).await.map_err(|e| {
            warn!("LinkStore: failed to persist collection: {}", e);
            e
        })
    }

    /// All live links, newest-first. Expired records are dropped from the
    /// slot as a side effect.
    pub async fn load_all(&self) -> Result<Vec<LinkRecord>> {
        let _guard = self.write_lock.lock().await;
        let snapshot = self.snapshot(self.now()).await;
        if snapshot.is_dirty() {
            self.persist(&snapshot.live).await?;
        }
        Ok(snapshot.live)
    }

    /// Create a link and prepend it to the collection
    ///
    /// Expired records are evicted before the alias check, so reusing an
    /// expired alias never leaves two records with the same code.
    pub async fn create(&self, req: CreateLinkRequest) -> Result<LinkRecord> {
        let original_url = req.original_url.trim().to_string();
        validate_url(&original_url).map_err(|e| UrlgptError::invalid_url(e.to_string()))?;

        let alias = req
            .custom_alias
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(str::to_string);

        if let Some(ref alias) = alias {
            if !is_valid_alias(alias) {
                return Err(UrlgptError::invalid_alias(format!(
                    "Invalid alias '{}'. Use 1-{} letters, digits, '-' or '_'.",
                    alias,
                    crate::utils::MAX_ALIAS_LENGTH
                )));
            }
            if is_reserved_route(alias, &self.settings.reserved_routes) {
                return Err(UrlgptError::invalid_alias(format!(
                    "Alias '{}' conflicts with a reserved route",
                    alias
                )));
            }
        }

        let _guard = self.write_lock.lock().await;
        let now = self.now();
        let mut snapshot = self.snapshot(now).await;

        let short_code = match alias {
            Some(alias) => {
                if snapshot.find(&alias).is_some() {
                    // 冲突时仍写回已清理的过期记录
                    if snapshot.is_dirty() {
                        self.persist(&snapshot.live).await?;
                    }
                    return Err(UrlgptError::alias_conflict(format!(
                        "Custom alias '{}' already exists",
                        alias
                    )));
                }
                alias
            }
            None => self.unused_code(&snapshot)?,
        };

        let record = LinkRecord {
            id: Uuid::new_v4().to_string(),
            original_url,
            short_code,
            click_count: 0,
            expires_at: compute_expiry_with(now, self.settings.expiry_months),
            created_at: now,
        };

        snapshot.live.insert(0, record.clone());
        self.persist(&snapshot.live).await?;

        info!(
            "LinkStore: created '{}' -> '{}' (expires {})",
            record.short_code,
            record.original_url,
            record.expires_at.to_rfc3339()
        );
        Ok(record)
    }

    fn unused_code(&self, snapshot: &Snapshot) -> Result<String> {
        let attempts = self.settings.max_generate_attempts.max(1);
        for attempt in 1..=attempts {
            let candidate = generate_random_code(self.settings.code_length);
            if snapshot.find(&candidate).is_none()
                && !is_reserved_route(&candidate, &self.settings.reserved_routes)
            {
                return Ok(candidate);
            }
            debug!(
                "LinkStore: generated code '{}' is taken (attempt {}/{})",
                candidate, attempt, attempts
            );
        }
        Err(UrlgptError::code_space_exhausted(format!(
            "No free {}-character code found after {} attempts",
            self.settings.code_length, attempts
        )))
    }

    /// Remove the record with `id`. Returns whether a live record was removed;
    /// an unknown id is not an error.
    pub async fn delete(&self, id: &str) -> Result<bool> {
        let _guard = self.write_lock.lock().await;
        let mut snapshot = self.snapshot(self.now()).await;

        let before = snapshot.live.len();
        snapshot.live.retain(|l| l.id != id);
        let removed = snapshot.live.len() != before;

        if removed || snapshot.is_dirty() {
            self.persist(&snapshot.live).await?;
        }

        if removed {
            info!("LinkStore: deleted link {}", id);
        } else {
            debug!("LinkStore: delete of unknown id {} ignored", id);
        }
        Ok(removed)
    }

    /// Look up a live record without counting a click.
    ///
    /// An expired record with this code is removed and reported as absent.
    pub async fn find_by_code(&self, code: &str) -> Result<Option<LinkRecord>> {
        let _guard = self.write_lock.lock().await;
        let snapshot = self.snapshot(self.now()).await;
        if snapshot.is_dirty() {
            self.persist(&snapshot.live).await?;
        }

        let found = snapshot.find(code).map(|i| snapshot.live[i].clone());
        if found.is_none() && snapshot.evicted_code(code) {
            debug!("LinkStore: '{}' was expired and has been removed", code);
        }
        Ok(found)
    }

    /// Add one click to the record with `code`, returning the updated copy.
    /// Unknown codes are a no-op.
    pub async fn increment_clicks(&self, code: &str) -> Result<Option<LinkRecord>> {
        let _guard = self.write_lock.lock().await;
        let mut snapshot = self.snapshot(self.now()).await;

        let updated = snapshot.find(code).map(|i| {
            let link = &mut snapshot.live[i];
            link.click_count = link.click_count.saturating_add(1);
            link.clone()
        });

        if updated.is_some() || snapshot.is_dirty() {
            self.persist(&snapshot.live).await?;
        }
        Ok(updated)
    }

    /// Lookup plus click increment as one pass, used by redirects.
    pub async fn claim(&self, code: &str) -> Result<ClaimOutcome> {
        self.visit(code, true).await
    }

    /// Same outcome as [`claim`](Self::claim) without counting a click.
    /// Expired records are still evicted.
    pub async fn peek(&self, code: &str) -> Result<ClaimOutcome> {
        self.visit(code, false).await
    }

    async fn visit(&self, code: &str, count_click: bool) -> Result<ClaimOutcome> {
        let _guard = self.write_lock.lock().await;
        let mut snapshot = self.snapshot(self.now()).await;

        let outcome = match snapshot.find(code) {
            Some(i) => {
                let link = &mut snapshot.live[i];
                if count_click {
                    link.click_count = link.click_count.saturating_add(1);
                }
                ClaimOutcome::Claimed(link.clone())
            }
            None if snapshot.evicted_code(code) => ClaimOutcome::Expired,
            None => ClaimOutcome::Missing,
        };

        let counted = count_click && matches!(outcome, ClaimOutcome::Claimed(_));
        if counted || snapshot.is_dirty() {
            self.persist(&snapshot.live).await?;
        }
        Ok(outcome)
    }

    pub async fn stats(&self) -> Result<LinkStats> {
        let links = self.load_all().await?;
        Ok(LinkStats::from_links(&links))
    }
}
