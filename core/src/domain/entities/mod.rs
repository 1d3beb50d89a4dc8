//! Domain entities representing tokens and revocation entries.

pub mod token;


// Re-export commonly used types
pub use token::{Claims, RevocationEntry, TokenPair, TokenType, BEARER_TOKEN_TYPE};
