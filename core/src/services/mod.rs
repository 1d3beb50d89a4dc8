//! Business services containing the token lifecycle logic.

pub mod token;

// Re-export commonly used types
pub use token::{
    extract_bearer_token, PurgeConfig, PurgeResult, RevocationPurger, Signer, TokenCodec,
    TokenService, TokenServiceConfig,
};
