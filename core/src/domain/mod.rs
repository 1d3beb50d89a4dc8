//! Domain layer containing token entities and the clock abstraction.

pub mod clock;
pub mod entities;

// Re-export commonly used domain types
pub use clock::{Clock, ManualClock, SystemClock};
pub use entities::{Claims, RevocationEntry, TokenPair, TokenType, BEARER_TOKEN_TYPE};
