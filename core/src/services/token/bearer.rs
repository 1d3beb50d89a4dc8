//! `Authorization: Bearer <token>` parsing

use crate::errors::TokenError;

const BEARER_PREFIX: &str = "Bearer ";

/// Extracts the token from an Authorization header value
///
/// The scheme is matched case-insensitively; a missing header, another
/// scheme or a blank token is `Malformed`.
pub fn extract_bearer_token(header: Option<&str>) -> Result<&str, TokenError> {
    let value = header.ok_or(TokenError::Malformed)?.trim();

    let scheme = value.get(..BEARER_PREFIX.len()).ok_or(TokenError::Malformed)?;
    if !scheme.eq_ignore_ascii_case(BEARER_PREFIX) {
        return Err(TokenError::Malformed);
    }

    let token = value[BEARER_PREFIX.len()..].trim();
    if token.is_empty() {
        return Err(TokenError::Malformed);
    }
    Ok(token)
}
