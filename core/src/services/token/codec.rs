//! Wire codec: `base64url(claims JSON) "." tag`

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

use crate::domain::entities::token::Claims;
use crate::errors::{DecodeError, TokenError};

use super::signer::Signer;

const SEGMENT_SEPARATOR: char = '.';

/// Encodes claims into signed token strings and back
#[derive(Debug, Clone)]
pub struct TokenCodec {
    signer: Signer,
}

impl TokenCodec {
    pub fn new(signer: Signer) -> Self {
        Self { signer }
    }

    /// Serialize and sign `claims`
    pub fn encode(&self, claims: &Claims) -> Result<String, TokenError> {
        let json = serde_json::to_vec(claims)
            .map_err(|e| TokenError::internal(format!("failed to serialize claims: {}", e)))?;
        let payload = URL_SAFE_NO_PAD.encode(json);
        let tag = self.signer.sign(payload.as_bytes());
        Ok(format!("{}{}{}", payload, SEGMENT_SEPARATOR, tag))
    }

    /// Verify the tag, then parse the claims
    ///
    /// Nothing in the payload is read before the tag checks out.
    pub fn decode(&self, token: &str) -> Result<Claims, DecodeError> {
        let mut segments = token.split(SEGMENT_SEPARATOR);
        let (payload, tag) = match (segments.next(), segments.next(), segments.next()) {
            (Some(payload), Some(tag), None) if !payload.is_empty() && !tag.is_empty() => {
                (payload, tag)
            }
            _ => return Err(DecodeError::Malformed),
        };

        if !self.signer.verify(payload.as_bytes(), tag) {
            return Err(DecodeError::BadSignature);
        }

        let json = URL_SAFE_NO_PAD
            .decode(payload)
            .map_err(|_| DecodeError::Malformed)?;
        serde_json::from_slice(&json).map_err(|_| DecodeError::Malformed)
    }
}
