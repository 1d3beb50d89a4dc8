//! Error types for token handling and revocation storage
//!
//! Messages are bilingual (English | 中文); the transport layer picks the
//! half it needs.

use thiserror::Error;

use tg_shared::errors::{error_codes, ErrorResponse, IntoErrorResponse};

use crate::domain::entities::token::TokenType;

/// Token-related errors surfaced to callers
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Invalid token format | 无效的令牌格式")]
    Malformed,

    #[error("Token signature verification failed | 令牌签名验证失败")]
    BadSignature,

    #[error("Wrong token type: expected {expected}, got {actual} | 令牌类型错误: 期望 {expected}, 实际 {actual}")]
    WrongType { expected: TokenType, actual: TokenType },

    #[error("Token expired | 令牌已过期")]
    Expired,

    #[error("Token revoked | 令牌已被撤销")]
    Revoked,

    #[error("Internal error: {message} | 内部错误: {message}")]
    Internal { message: String },
}

impl TokenError {
    /// Stable code for clients
    pub fn error_code(&self) -> &'static str {
        match self {
            TokenError::Malformed => error_codes::TOKEN_MALFORMED,
            TokenError::BadSignature => error_codes::TOKEN_INVALID_SIGNATURE,
            TokenError::WrongType { .. } => error_codes::TOKEN_WRONG_TYPE,
            TokenError::Expired => error_codes::TOKEN_EXPIRED,
            TokenError::Revoked => error_codes::TOKEN_REVOKED,
            TokenError::Internal { .. } => error_codes::INTERNAL_ERROR,
        }
    }

    /// HTTP status the transport layer should answer with
    pub fn http_status(&self) -> u16 {
        match self {
            TokenError::Malformed | TokenError::WrongType { .. } => 400,
            TokenError::BadSignature | TokenError::Expired | TokenError::Revoked => 401,
            TokenError::Internal { .. } => 500,
        }
    }

    /// Whether the caller presented a bad token, as opposed to an infrastructure fault
    pub fn is_client_error(&self) -> bool {
        !matches!(self, TokenError::Internal { .. })
    }

    pub(crate) fn internal(message: impl Into<String>) -> Self {
        TokenError::Internal {
            message: message.into(),
        }
    }
}

impl IntoErrorResponse for TokenError {
    fn to_error_response(&self) -> ErrorResponse {
        let response = ErrorResponse::new(self.error_code(), self.to_string(), self.http_status());
        match self {
            TokenError::WrongType { expected, actual } => response
                .add_detail("expected", expected.as_str())
                .add_detail("actual", actual.as_str()),
            _ => response,
        }
    }
}

impl From<TokenError> for ErrorResponse {
    fn from(error: TokenError) -> Self {
        error.to_error_response()
    }
}

/// Failures while turning a wire string back into claims
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Invalid token format | 无效的令牌格式")]
    Malformed,

    #[error("Token signature verification failed | 令牌签名验证失败")]
    BadSignature,
}

impl From<DecodeError> for TokenError {
    fn from(error: DecodeError) -> Self {
        match error {
            DecodeError::Malformed => TokenError::Malformed,
            DecodeError::BadSignature => TokenError::BadSignature,
        }
    }
}

/// Revocation store failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Revocation store timed out | 撤销存储超时")]
    Timeout,

    #[error("Revocation store error: {message} | 撤销存储错误: {message}")]
    Backend { message: String },
}

impl StoreError {
    /// Wrap any backend failure
    pub fn backend(error: impl std::fmt::Display) -> Self {
        StoreError::Backend {
            message: error.to_string(),
        }
    }
}

impl From<StoreError> for TokenError {
    fn from(error: StoreError) -> Self {
        TokenError::Internal {
            message: error.to_string(),
        }
    }
}
