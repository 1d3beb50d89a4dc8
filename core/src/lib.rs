//! # Tollgate Core
//!
//! Token lifecycle engine for the Tollgate backend.
//! This crate contains the token claims model, the signer and wire codec,
//! the revocation store contract with its in-memory backend, and the
//! `TokenService` state machine that issues, verifies, rotates and revokes tokens.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
