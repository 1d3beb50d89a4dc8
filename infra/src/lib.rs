//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for Tollgate. It provides
//! durable backends for the revocation store defined in `tg_core`, tracing
//! setup, and the wiring used by the `purge_worker` binary.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Database**: MySQL connection pool and the `revoked_tokens` table store
//! - **Cache**: Redis client and the key-per-entry store
//! - **Telemetry**: `tracing-subscriber` initialisation
//! - **Bootstrap**: selects the configured backend

// Re-export core error types for convenience
pub use tg_core::errors::{StoreError, TokenError};

/// Database module - MySQL implementations using SQLx
pub mod database;

/// Cache module - Redis client and operations
pub mod cache;

/// Tracing subscriber setup
pub mod telemetry;

/// Backend selection from configuration
pub mod bootstrap;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration loading error
    #[error(transparent)]
    Settings(#[from] tg_shared::config::ConfigValidationError),

    /// General infrastructure error
    #[error("Infrastructure error: {0}")]
    General(String),
}

impl From<InfrastructureError> for StoreError {
    fn from(error: InfrastructureError) -> Self {
        StoreError::backend(error)
    }
}
