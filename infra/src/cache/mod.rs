//! Cache module for Redis-based storage
//!
//! This module provides the Redis client with connection retry logic and the
//! Redis backend of the revocation store.

pub mod redis_client;
pub mod revocation_store;


pub use redis_client::RedisClient;
pub use revocation_store::RedisRevocationStore;

// Re-export commonly used types
pub use tg_shared::config::CacheConfig;
