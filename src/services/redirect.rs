//! Redirect resolution
//!
//! `Loading -> {Redirecting | NotFound | Expired}`, evaluated once per
//! requested code. No retries.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::errors::Result;
use crate::services::{ClaimOutcome, LinkStore};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectState {
    Loading,
    /// Navigate to the contained URL
    Redirecting(String),
    NotFound,
    /// The record existed but had expired and has been removed
    Expired,
}

impl RedirectState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RedirectState::Loading)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RedirectState::Loading => "loading",
            RedirectState::Redirecting(_) => "redirecting",
            RedirectState::NotFound => "notFound",
            RedirectState::Expired => "expired",
        }
    }
}

pub struct RedirectResolver {
    store: Arc<LinkStore>,
}

impl RedirectResolver {
    pub fn new(store: Arc<LinkStore>) -> Self {
        Self { store }
    }

    /// Run the transition from `Loading` to a terminal state, counting a
    /// click when the result is `Redirecting`.
    pub async fn resolve(&self, code: Option<&str>) -> Result<RedirectState> {
        self.transition(code, true).await
    }

    /// Terminal state for `code` without counting a click. Used for `HEAD`.
    pub async fn preview(&self, code: Option<&str>) -> Result<RedirectState> {
        self.transition(code, false).await
    }

    async fn transition(&self, code: Option<&str>, count_click: bool) -> Result<RedirectState> {
        trace!("Resolving {:?} (count_click: {})", code, count_click);

        let Some(code) = code.filter(|c| !c.is_empty()) else {
            return Ok(RedirectState::NotFound);
        };

        let outcome = if count_click {
            self.store.claim(code).await?
        } else {
            self.store.peek(code).await?
        };

        let state = match outcome {
            ClaimOutcome::Claimed(link) => {
                debug!(
                    "Redirecting '{}' -> '{}' (clicks: {})",
                    code, link.original_url, link.click_count
                );
                RedirectState::Redirecting(link.original_url)
            }
            ClaimOutcome::Expired => {
                debug!("Short code '{}' has expired", code);
                RedirectState::Expired
            }
            ClaimOutcome::Missing => {
                debug!("Short code '{}' not found", code);
                RedirectState::NotFound
            }
        };
        Ok(state)
    }
}
