//! Token service module
//!
//! This module handles all token-related operations including:
//! - HMAC signing and the two-segment wire codec
//! - Access and refresh token issuance and verification
//! - Refresh token rotation guarded by the revocation store
//! - Revocation on logout and periodic purge of expired entries

mod bearer;
mod codec;
mod config;
mod purge;
mod service;
mod signer;

#[cfg(test)]
mod tests;

pub use bearer::extract_bearer_token;
pub use codec::TokenCodec;
pub use config::TokenServiceConfig;
pub use purge::{PurgeConfig, PurgeResult, RevocationPurger};
pub use service::TokenService;
pub use signer::{Signer, SIGNATURE_VERSION};
