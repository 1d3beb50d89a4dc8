//! Shared configuration and error response types for Tollgate
//!
//! This crate provides common functionality used across all workspace members:
//! - Configuration types and the layered configuration loader
//! - Error response structures and stable error codes

pub mod config;
pub mod errors;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, CacheConfig, ConfigValidationError, DatabaseConfig, Environment,
    LogFormat, LoggingConfig, RevocationBackend, RevocationConfig, TokenConfig,
    MAX_TOKEN_LIFETIME_SECONDS,
};
pub use errors::{error_codes, ErrorResponse, IntoErrorResponse};
