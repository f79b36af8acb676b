//! LinkStore tests
//!
//! Lifecycle of links over an in-memory slot with a controllable clock.

use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use urlgpt::clock::{Clock, MockClock};
use urlgpt::config::LinksConfig;
use urlgpt::errors::UrlgptError;
use urlgpt::services::{
    ClaimOutcome, CreateLinkRequest, LinkStore, RedirectResolver, RedirectState,
};
use urlgpt::storage::{LinkRecord, LinkSlot, MemorySlot, decode_links};
use urlgpt::utils::expiry::compute_expiry;

// =============================================================================
// Test Setup
// =============================================================================

struct Harness {
    store: Arc<LinkStore>,
    slot: Arc<MemorySlot>,
    clock: Arc<MockClock>,
}

impl Harness {
    fn with_settings(settings: LinksConfig) -> Self {
        let slot = Arc::new(MemorySlot::new());
        let clock = Arc::new(MockClock::with_time(
            Utc.with_ymd_and_hms(2024, 1, 31, 12, 0, 0).unwrap(),
        ));
        let store = Arc::new(LinkStore::with_clock(
            slot.clone(),
            clock.clone(),
            settings,
        ));
        Self { store, slot, clock }
    }

    fn new() -> Self {
        Self::with_settings(LinksConfig::default())
    }

    /// Records currently persisted in the slot, bypassing the store
    fn persisted(&self) -> Vec<LinkRecord> {
        self.slot
            .raw()
            .map(|raw| decode_links(&raw, "test"))
            .unwrap_or_default()
    }
}

fn request(url: &str) -> CreateLinkRequest {
    CreateLinkRequest::new(url)
}

fn record(code: &str, expires_in: Duration, now: chrono::DateTime<Utc>) -> LinkRecord {
    LinkRecord {
        id: format!("id-{}", code),
        original_url: format!("https://example.com/{}", code),
        short_code: code.to_string(),
        click_count: 0,
        expires_at: now + expires_in,
        created_at: now - Duration::days(1),
    }
}

// =============================================================================
// create
// =============================================================================

#[tokio::test]
async fn test_create_sets_initial_fields() {
    let h = Harness::new();
    let now = h.clock.now();

    let link = h.store.create(request("https://example.com")).await.unwrap();

    assert_eq!(link.original_url, "https://example.com");
    assert_eq!(link.click_count, 0);
    assert_eq!(link.created_at, now);
    assert_eq!(link.expires_at, compute_expiry(link.created_at));
    // 2024-01-31 + 1 month clamps to the leap day
    assert_eq!(
        link.expires_at,
        Utc.with_ymd_and_hms(2024, 2, 29, 12, 0, 0).unwrap()
    );
    assert!(!link.id.is_empty());
}

#[tokio::test]
async fn test_create_trims_surrounding_whitespace() {
    let h = Harness::new();

    let link = h
        .store
        .create(request("  https://example.com/path?q=1 \n").with_alias(" promo "))
        .await
        .unwrap();

    assert_eq!(link.original_url, "https://example.com/path?q=1");
    assert_eq!(link.short_code, "promo");
    assert_eq!(h.persisted()[0].original_url, "https://example.com/path?q=1");
}

#[tokio::test]
async fn test_generated_code_shape() {
    let h = Harness::new();
    let link = h.store.create(request("https://example.com")).await.unwrap();

    assert_eq!(link.short_code.len(), 6);
    assert!(link.short_code.chars().all(|c| c.is_ascii_alphanumeric()));
}

#[tokio::test]
async fn test_blank_alias_generates_code() {
    let h = Harness::new();
    let link = h
        .store
        .create(request("https://example.com").with_alias("   "))
        .await
        .unwrap();
    assert_eq!(link.short_code.len(), 6);
}

#[tokio::test]
async fn test_create_invalid_url_changes_nothing() {
    let h = Harness::new();

    for bad in ["", "not a url", "example.com", "javascript:alert(1)"] {
        let err = h.store.create(request(bad)).await.unwrap_err();
        assert!(
            matches!(err, UrlgptError::InvalidUrl(_)),
            "{bad:?} gave {err:?}"
        );
    }
    assert!(h.slot.raw().is_none());
}

#[tokio::test]
async fn test_create_invalid_alias() {
    let h = Harness::new();

    let err = h
        .store
        .create(request("https://a.com").with_alias("has space"))
        .await
        .unwrap_err();
    assert!(matches!(err, UrlgptError::InvalidAlias(_)));

    let err = h
        .store
        .create(request("https://a.com").with_alias("health"))
        .await
        .unwrap_err();
    assert!(matches!(err, UrlgptError::InvalidAlias(_)));

    assert!(h.slot.raw().is_none());
}

#[tokio::test]
async fn test_alias_conflict_leaves_collection_unchanged() {
    let h = Harness::new();

    let first = h
        .store
        .create(request("https://a.com").with_alias("promo"))
        .await
        .unwrap();
    let before = h.slot.raw();

    let err = h
        .store
        .create(request("https://b.com").with_alias("promo"))
        .await
        .unwrap_err();
    assert!(matches!(err, UrlgptError::AliasConflict(_)));
    assert_eq!(h.slot.raw(), before);

    let promos: Vec<_> = h
        .persisted()
        .into_iter()
        .filter(|l| l.short_code == "promo")
        .collect();
    assert_eq!(promos.len(), 1);
    assert_eq!(promos[0].id, first.id);
    assert_eq!(promos[0].original_url, "https://a.com");
}

#[tokio::test]
async fn test_alias_is_case_sensitive() {
    let h = Harness::new();
    h.store
        .create(request("https://a.com").with_alias("Promo"))
        .await
        .unwrap();
    assert!(
        h.store
            .create(request("https://b.com").with_alias("promo"))
            .await
            .is_ok()
    );
}

#[tokio::test]
async fn test_expired_alias_can_be_reused_without_duplicates() {
    let h = Harness::new();
    h.store
        .create(request("https://a.com").with_alias("promo"))
        .await
        .unwrap();

    h.clock.advance(Duration::days(40));

    let second = h
        .store
        .create(request("https://b.com").with_alias("promo"))
        .await
        .unwrap();

    let persisted = h.persisted();
    assert_eq!(persisted.len(), 1);
    assert_eq!(persisted[0].id, second.id);
    assert_eq!(persisted[0].original_url, "https://b.com");
}

#[tokio::test]
async fn test_newest_first() {
    let h = Harness::new();
    let a = h.store.create(request("https://a.com")).await.unwrap();
    h.clock.advance(Duration::seconds(1));
    let b = h.store.create(request("https://b.com")).await.unwrap();
    h.clock.advance(Duration::seconds(1));
    let c = h.store.create(request("https://c.com")).await.unwrap();

    let ids: Vec<_> = h
        .store
        .load_all()
        .await
        .unwrap()
        .into_iter()
        .map(|l| l.id)
        .collect();
    assert_eq!(ids, vec![c.id, b.id, a.id]);
}

#[tokio::test]
async fn test_code_space_exhausted() {
    let settings = LinksConfig {
        code_length: 1,
        max_generate_attempts: 8,
        ..LinksConfig::default()
    };
    let h = Harness::with_settings(settings);
    let now = h.clock.now();

    let taken: Vec<LinkRecord> = urlgpt::utils::CODE_ALPHABET
        .iter()
        .map(|b| record(&(*b as char).to_string(), Duration::days(10), now))
        .collect();
    h.slot.save(&taken).await.unwrap();

    let err = h
        .store
        .create(request("https://example.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, UrlgptError::CodeSpaceExhausted(_)));
    assert_eq!(h.persisted().len(), taken.len());
}

// =============================================================================
// load_all / eviction
// =============================================================================

#[tokio::test]
async fn test_load_all_after_create() {
    let h = Harness::new();
    h.store.create(request("https://example.com/x")).await.unwrap();
    h.store.create(request("https://example.com/y")).await.unwrap();

    let links = h.store.load_all().await.unwrap();
    assert_eq!(
        links
            .iter()
            .filter(|l| l.original_url == "https://example.com/x")
            .count(),
        1
    );
}

#[tokio::test]
async fn test_expired_records_are_evicted_on_load() {
    let h = Harness::new();
    let now = h.clock.now();
    h.slot
        .save(&[
            record("live", Duration::hours(1), now),
            record("old", -Duration::seconds(1), now),
        ])
        .await
        .unwrap();

    let links = h.store.load_all().await.unwrap();
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].short_code, "live");

    let persisted = h.persisted();
    assert_eq!(persisted.len(), 1);
    assert_eq!(persisted[0].short_code, "live");
}

#[tokio::test]
async fn test_record_expiring_now_is_still_live() {
    let h = Harness::new();
    let now = h.clock.now();
    h.slot
        .save(&[record("edge", Duration::zero(), now)])
        .await
        .unwrap();

    assert_eq!(h.store.load_all().await.unwrap().len(), 1);
    h.clock.advance(Duration::milliseconds(1));
    assert!(h.store.load_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_created_link_expires_after_a_month() {
    let h = Harness::new();
    let link = h.store.create(request("https://example.com")).await.unwrap();

    h.clock.set_time(link.expires_at);
    assert!(h.store.find_by_code(&link.short_code).await.unwrap().is_some());

    h.clock.advance(Duration::seconds(1));
    assert!(h.store.load_all().await.unwrap().is_empty());
    assert!(h.persisted().is_empty());
}

#[tokio::test]
async fn test_corrupt_slot_is_treated_as_empty() {
    let slot = Arc::new(MemorySlot::with_raw("{definitely not json"));
    let store = LinkStore::new(slot.clone(), LinksConfig::default());

    assert!(store.load_all().await.unwrap().is_empty());

    let link = store.create(request("https://example.com")).await.unwrap();
    let links = store.load_all().await.unwrap();
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].id, link.id);
}

// =============================================================================
// find_by_code / increment_clicks / delete
// =============================================================================

#[tokio::test]
async fn test_find_by_code_returns_same_record() {
    let h = Harness::new();
    let mut created = Vec::new();
    for i in 0..5 {
        created.push(
            h.store
                .create(request(&format!("https://example.com/{}", i)))
                .await
                .unwrap(),
        );
    }

    for link in &created {
        let found = h.store.find_by_code(&link.short_code).await.unwrap();
        assert_eq!(found.map(|f| f.id), Some(link.id.clone()));
    }
}

#[tokio::test]
async fn test_find_by_code_does_not_count_clicks() {
    let h = Harness::new();
    let link = h.store.create(request("https://example.com")).await.unwrap();

    h.store.find_by_code(&link.short_code).await.unwrap();
    h.store.find_by_code(&link.short_code).await.unwrap();

    let found = h.store.find_by_code(&link.short_code).await.unwrap().unwrap();
    assert_eq!(found.click_count, 0);
}

#[tokio::test]
async fn test_find_by_code_evicts_expired() {
    let h = Harness::new();
    let now = h.clock.now();
    h.slot
        .save(&[record("gone", -Duration::days(1), now)])
        .await
        .unwrap();

    assert!(h.store.find_by_code("gone").await.unwrap().is_none());
    assert!(h.persisted().is_empty());
}

#[tokio::test]
async fn test_increment_clicks_n_times() {
    let h = Harness::new();
    let link = h.store.create(request("https://example.com")).await.unwrap();

    for _ in 0..7 {
        h.store.increment_clicks(&link.short_code).await.unwrap();
    }

    let found = h.store.find_by_code(&link.short_code).await.unwrap().unwrap();
    assert_eq!(found.click_count, 7);
}

#[tokio::test]
async fn test_increment_unknown_code_is_noop() {
    let h = Harness::new();
    assert!(h.store.increment_clicks("nope").await.unwrap().is_none());
    assert!(h.slot.raw().is_none());
}

#[tokio::test]
async fn test_concurrent_increments_are_not_lost() {
    let h = Harness::new();
    let link = h.store.create(request("https://example.com")).await.unwrap();

    let mut handles = Vec::new();
    for _ in 0..50 {
        let store = h.store.clone();
        let code = link.short_code.clone();
        handles.push(tokio::spawn(async move {
            store.increment_clicks(&code).await.unwrap();
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let found = h.store.find_by_code(&link.short_code).await.unwrap().unwrap();
    assert_eq!(found.click_count, 50);
}

#[tokio::test]
async fn test_delete_unknown_id_is_noop() {
    let h = Harness::new();
    h.store.create(request("https://example.com")).await.unwrap();

    assert!(!h.store.delete("no-such-id").await.unwrap());
    assert_eq!(h.persisted().len(), 1);
}

#[tokio::test]
async fn test_create_click_delete_scenario() {
    let h = Harness::new();

    let link = h.store.create(request("https://example.com")).await.unwrap();
    assert_eq!(link.short_code.len(), 6);
    assert_eq!(link.click_count, 0);

    let clicked = h
        .store
        .increment_clicks(&link.short_code)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(clicked.click_count, 1);

    assert!(h.store.delete(&link.id).await.unwrap());
    assert!(h.store.find_by_code(&link.short_code).await.unwrap().is_none());
}

#[tokio::test]
async fn test_stats() {
    let h = Harness::new();
    let a = h.store.create(request("https://a.com")).await.unwrap();
    h.store.create(request("https://b.com")).await.unwrap();
    h.store.increment_clicks(&a.short_code).await.unwrap();
    h.store.increment_clicks(&a.short_code).await.unwrap();

    let stats = h.store.stats().await.unwrap();
    assert_eq!(stats.total_links, 2);
    assert_eq!(stats.total_clicks, 2);
}

// =============================================================================
// claim / resolver
// =============================================================================

#[tokio::test]
async fn test_claim_outcomes() {
    let h = Harness::new();
    let now = h.clock.now();
    h.slot
        .save(&[
            record("live", Duration::days(1), now),
            record("old", -Duration::days(1), now),
        ])
        .await
        .unwrap();

    assert_eq!(h.store.claim("old").await.unwrap(), ClaimOutcome::Expired);
    // 过期记录已在上一次访问中清除
    assert_eq!(h.store.claim("old").await.unwrap(), ClaimOutcome::Missing);
    match h.store.claim("live").await.unwrap() {
        ClaimOutcome::Claimed(link) => assert_eq!(link.click_count, 1),
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert_eq!(h.store.claim("other").await.unwrap(), ClaimOutcome::Missing);
}

#[tokio::test]
async fn test_peek_does_not_count_clicks() {
    let h = Harness::new();
    let resolver = RedirectResolver::new(h.store.clone());
    let link = h.store.create(request("https://example.com")).await.unwrap();

    match h.store.peek(&link.short_code).await.unwrap() {
        ClaimOutcome::Claimed(found) => assert_eq!(found.click_count, 0),
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert_eq!(
        resolver.preview(Some(&link.short_code)).await.unwrap(),
        RedirectState::Redirecting("https://example.com".to_string())
    );

    let found = h.store.find_by_code(&link.short_code).await.unwrap().unwrap();
    assert_eq!(found.click_count, 0);

    h.clock.advance(Duration::days(60));
    assert_eq!(
        resolver.preview(Some(&link.short_code)).await.unwrap(),
        RedirectState::Expired
    );
    assert!(h.persisted().is_empty());
}

#[tokio::test]
async fn test_resolver_state_machine() {
    let h = Harness::new();
    let resolver = RedirectResolver::new(h.store.clone());
    let link = h.store.create(request("https://example.com")).await.unwrap();

    assert_eq!(resolver.resolve(None).await.unwrap(), RedirectState::NotFound);
    assert_eq!(
        resolver.resolve(Some("")).await.unwrap(),
        RedirectState::NotFound
    );
    assert_eq!(
        resolver.resolve(Some("missing")).await.unwrap(),
        RedirectState::NotFound
    );
    assert_eq!(
        resolver.resolve(Some(&link.short_code)).await.unwrap(),
        RedirectState::Redirecting("https://example.com".to_string())
    );

    let found = h.store.find_by_code(&link.short_code).await.unwrap().unwrap();
    assert_eq!(found.click_count, 1);

    h.clock.advance(Duration::days(60));
    assert_eq!(
        resolver.resolve(Some(&link.short_code)).await.unwrap(),
        RedirectState::Expired
    );
    assert!(h.persisted().is_empty());
}
