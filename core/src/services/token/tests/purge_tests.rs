//! Tests for the revocation purger

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use crate::repositories::RevocationStore;
use crate::services::token::{PurgeConfig, PurgeResult, RevocationPurger};

use super::support::{harness, harness_with, start, FailingStore};

fn every_second() -> PurgeConfig {
    PurgeConfig {
        interval_seconds: 1,
        enabled: true,
    }
}

#[tokio::test]
async fn test_run_purge_removes_expired_entries() {
    let h = harness();
    h.store.revoke("old", start() - chrono::Duration::minutes(1)).await.unwrap();
    h.store.revoke("live", start() + chrono::Duration::minutes(1)).await.unwrap();

    let purger = RevocationPurger::new(Arc::clone(&h.service), every_second());
    let result = purger.run_purge().await.unwrap();

    assert_eq!(result, PurgeResult { entries_purged: 1 });
    assert!(h.store.is_revoked("live").await.unwrap());
    assert!(!h.store.is_revoked("old").await.unwrap());
}

#[tokio::test]
async fn test_disabled_purger_does_nothing() {
    let h = harness();
    h.store.revoke("old", start() - chrono::Duration::minutes(1)).await.unwrap();

    let purger = Arc::new(RevocationPurger::new(
        Arc::clone(&h.service),
        PurgeConfig {
            interval_seconds: 1,
            enabled: false,
        },
    ));

    assert_eq!(purger.run_purge().await.unwrap(), PurgeResult::default());
    assert!(purger.start_background_task().is_none());
    assert_eq!(h.store.len().await, 1);
}

#[tokio::test(start_paused = true)]
async fn test_background_task_purges_periodically() {
    let h = harness();
    h.store.revoke("first", start() - chrono::Duration::minutes(1)).await.unwrap();

    let purger = Arc::new(RevocationPurger::new(Arc::clone(&h.service), every_second()));
    let handle = purger.start_background_task().unwrap();

    // First tick fires immediately
    tokio::time::sleep(Duration::from_millis(10)).await;
    assert!(h.store.is_empty().await);

    h.store.revoke("second", start() - chrono::Duration::minutes(1)).await.unwrap();
    tokio::time::sleep(Duration::from_secs(1)).await;
    assert!(h.store.is_empty().await);

    handle.abort();
}

#[tokio::test(start_paused = true)]
async fn test_background_task_survives_failures() {
    let h = harness_with(FailingStore::default());

    let purger = Arc::new(RevocationPurger::new(Arc::clone(&h.service), every_second()));
    let handle = purger.start_background_task().unwrap();

    tokio::time::sleep(Duration::from_millis(2500)).await;
    assert!(h.store.calls.load(Ordering::SeqCst) >= 2);
    assert!(!handle.is_finished());

    handle.abort();
}

#[test]
fn test_purge_config_from_settings() {
    let settings = tg_shared::config::RevocationConfig {
        purge_interval_seconds: 120,
        purge_enabled: false,
        ..Default::default()
    };
    let config = PurgeConfig::from(&settings);

    assert_eq!(config.interval_seconds, 120);
    assert!(!config.enabled);
}
