//! Integration tests for the Redis revocation store
//!
//! These tests require a running Redis instance to execute.
//! Run with: cargo test -p tg_infra --test redis_revocation_integration -- --ignored

use chrono::{Duration, Utc};
use uuid::Uuid;

use tg_core::repositories::RevocationStore;
use tg_infra::cache::{CacheConfig, RedisClient, RedisRevocationStore};

async fn store() -> RedisRevocationStore {
    let url = std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string());
    let client = RedisClient::new(CacheConfig::new(url).with_prefix("tollgate_test"))
        .await
        .unwrap();
    RedisRevocationStore::new(client)
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_redis_connection() {
    let store = store().await;
    assert!(store.client().health_check().await.unwrap());
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_try_revoke_is_conditional() {
    let store = store().await;
    let jti = Uuid::new_v4().to_string();
    let expires_at = Utc::now() + Duration::minutes(10);

    assert!(!store.is_revoked(&jti).await.unwrap());
    assert!(store.try_revoke(&jti, expires_at).await.unwrap());
    assert!(!store.try_revoke(&jti, expires_at).await.unwrap());
    assert!(store.is_revoked(&jti).await.unwrap());

    store.client().delete(&store.revoked_key(&jti)).await.unwrap();
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_key_expires_with_token() {
    let store = store().await;
    let jti = Uuid::new_v4().to_string();
    store.revoke(&jti, Utc::now() + Duration::minutes(10)).await.unwrap();

    let ttl = store
        .client()
        .ttl_millis(&store.revoked_key(&jti))
        .await
        .unwrap()
        .unwrap();
    assert!(ttl > 0 && ttl <= 600_000);

    store.client().delete(&store.revoked_key(&jti)).await.unwrap();
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_purge_is_a_no_op() {
    let store = store().await;
    assert_eq!(store.purge_expired(Utc::now()).await.unwrap(), 0);
}
