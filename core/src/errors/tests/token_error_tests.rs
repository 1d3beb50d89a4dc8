//! Unit tests for token error types

use tg_shared::errors::{ErrorResponse, IntoErrorResponse};

use crate::domain::entities::token::TokenType;
use crate::errors::{DecodeError, StoreError, TokenError};

#[test]
fn test_token_error_messages_are_bilingual() {
    let message = TokenError::Expired.to_string();
    assert!(message.contains("Token expired"));
    assert!(message.contains("令牌已过期"));
}

#[test]
fn test_error_codes() {
    assert_eq!(TokenError::Malformed.error_code(), "TOKEN_MALFORMED");
    assert_eq!(TokenError::BadSignature.error_code(), "TOKEN_INVALID_SIGNATURE");
    assert_eq!(
        TokenError::WrongType {
            expected: TokenType::Access,
            actual: TokenType::Refresh
        }
        .error_code(),
        "TOKEN_WRONG_TYPE"
    );
    assert_eq!(TokenError::Expired.error_code(), "TOKEN_EXPIRED");
    assert_eq!(TokenError::Revoked.error_code(), "TOKEN_REVOKED");
    assert_eq!(
        TokenError::Internal {
            message: "x".to_string()
        }
        .error_code(),
        "INTERNAL_ERROR"
    );
}

#[test]
fn test_http_status_mapping() {
    assert_eq!(TokenError::Malformed.http_status(), 400);
    assert_eq!(
        TokenError::WrongType {
            expected: TokenType::Refresh,
            actual: TokenType::Access
        }
        .http_status(),
        400
    );
    assert_eq!(TokenError::BadSignature.http_status(), 401);
    assert_eq!(TokenError::Expired.http_status(), 401);
    assert_eq!(TokenError::Revoked.http_status(), 401);
    assert_eq!(
        TokenError::Internal {
            message: "db down".to_string()
        }
        .http_status(),
        500
    );
}

#[test]
fn test_token_error_conversion() {
    let response: ErrorResponse = TokenError::Revoked.into();
    assert_eq!(response.error, "TOKEN_REVOKED");
    assert_eq!(response.status, 401);
    assert!(response.message.contains("令牌已被撤销"));
    assert!(response.details.is_none());
}

#[test]
fn test_wrong_type_response_details() {
    let error = TokenError::WrongType {
        expected: TokenType::Refresh,
        actual: TokenType::Access,
    };
    let response = error.to_error_response();
    let details = response.details.unwrap();

    assert_eq!(details["expected"], "refresh");
    assert_eq!(details["actual"], "access");
}

#[test]
fn test_decode_error_conversion() {
    assert_eq!(TokenError::from(DecodeError::Malformed), TokenError::Malformed);
    assert_eq!(TokenError::from(DecodeError::BadSignature), TokenError::BadSignature);
}

#[test]
fn test_store_error_becomes_internal() {
    let error: TokenError = StoreError::Timeout.into();
    assert!(matches!(error, TokenError::Internal { .. }));
    assert!(!error.is_client_error());

    let error: TokenError = StoreError::backend("connection refused").into();
    match error {
        TokenError::Internal { message } => assert!(message.contains("connection refused")),
        other => panic!("unexpected error: {other:?}"),
    }
}
