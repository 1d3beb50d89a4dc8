//! Domain-specific error types and error handling.

mod types;

#[cfg(test)]
mod tests;

// Re-export all error types
pub use types::{DecodeError, StoreError, TokenError};

pub type TokenResult<T> = Result<T, TokenError>;
