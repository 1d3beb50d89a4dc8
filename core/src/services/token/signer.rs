//! HMAC-SHA256 signer for token segments

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use constant_time_eq::constant_time_eq;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::errors::TokenError;

type HmacSha256 = Hmac<Sha256>;

/// Version byte prefixed to every tag
pub const SIGNATURE_VERSION: u8 = 1;

const MAC_LEN: usize = 32;

/// Signs and verifies token segments with a fixed secret
///
/// The tag is `base64url([version] ++ HMAC-SHA256(secret, [version] ++ message))`.
/// Verification fails closed on anything it cannot decode.
#[derive(Clone)]
pub struct Signer {
    mac: HmacSha256,
}

impl Signer {
    /// Build a signer from the shared secret
    pub fn new(secret: &[u8]) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::internal("signing secret is empty"));
        }
        let mac = HmacSha256::new_from_slice(secret)
            .map_err(|e| TokenError::internal(format!("invalid signing key: {}", e)))?;
        Ok(Self { mac })
    }

    fn compute(&self, version: u8, message: &[u8]) -> Vec<u8> {
        let mut mac = self.mac.clone();
        mac.update(&[version]);
        mac.update(message);
        mac.finalize().into_bytes().to_vec()
    }

    /// Produce the encoded tag for `message`
    pub fn sign(&self, message: &[u8]) -> String {
        let mut tag = Vec::with_capacity(1 + MAC_LEN);
        tag.push(SIGNATURE_VERSION);
        tag.extend_from_slice(&self.compute(SIGNATURE_VERSION, message));
        URL_SAFE_NO_PAD.encode(tag)
    }

    /// Check an encoded tag against `message`
    pub fn verify(&self, message: &[u8], tag: &str) -> bool {
        let Ok(raw) = URL_SAFE_NO_PAD.decode(tag) else {
            return false;
        };
        if raw.len() != 1 + MAC_LEN || raw[0] != SIGNATURE_VERSION {
            return false;
        }
        let expected = self.compute(raw[0], message);
        constant_time_eq(&raw[1..], &expected)
    }
}

impl std::fmt::Debug for Signer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signer")
            .field("algorithm", &"HMAC-SHA256")
            .field("version", &SIGNATURE_VERSION)
            .finish_non_exhaustive()
    }
}
