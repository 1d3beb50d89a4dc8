//! Token entities for the token lifecycle engine.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Token type advertised in every `TokenPair`
pub const BEARER_TOKEN_TYPE: &str = "bearer";

/// Kind of token carried in the `typ` claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    /// Short-lived token presented on every request
    Access,
    /// Long-lived token exchanged for a new pair
    Refresh,
}

impl TokenType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenType::Access => "access",
            TokenType::Refresh => "refresh",
        }
    }
}

impl std::fmt::Display for TokenType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Claims structure carried in the token payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (the identity the token was issued to)
    pub sub: String,

    /// Token type
    pub typ: TokenType,

    /// Issued at timestamp (Unix seconds)
    pub iat: i64,

    /// Expiration timestamp (Unix seconds)
    pub exp: i64,

    /// Token ID, unique per minted token
    pub jti: String,
}

impl Claims {
    /// Creates new claims with a fresh token ID
    ///
    /// # Arguments
    ///
    /// * `subject` - Identity the token is issued to
    /// * `typ` - Access or refresh
    /// * `now` - Issuance instant
    /// * `ttl_seconds` - Lifetime; must be positive
    ///
    /// # Returns
    ///
    /// A new `Claims` instance expiring at `now + ttl_seconds`, or `None` if
    /// that instant does not fit in a Unix timestamp
    pub fn new(
        subject: impl Into<String>,
        typ: TokenType,
        now: DateTime<Utc>,
        ttl_seconds: i64,
    ) -> Option<Self> {
        let iat = now.timestamp();
        let exp = iat.checked_add(ttl_seconds)?;
        Some(Self {
            sub: subject.into(),
            typ,
            iat,
            exp,
            jti: Uuid::new_v4().to_string(),
        })
    }

    /// Creates claims for an access token
    pub fn new_access_token(subject: impl Into<String>, now: DateTime<Utc>, ttl_seconds: i64) -> Option<Self> {
        Self::new(subject, TokenType::Access, now, ttl_seconds)
    }

    /// Creates claims for a refresh token
    pub fn new_refresh_token(subject: impl Into<String>, now: DateTime<Utc>, ttl_seconds: i64) -> Option<Self> {
        Self::new(subject, TokenType::Refresh, now, ttl_seconds)
    }

    /// Checks expiry against the given instant
    ///
    /// A token is expired from the second its `exp` is reached.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }

    /// Expiry as a timestamp
    pub fn expires_at(&self) -> DateTime<Utc> {
        Utc.timestamp_opt(self.exp, 0)
            .single()
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}

/// A revoked token ID, kept until the token would have expired anyway
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevocationEntry {
    /// `jti` of the revoked token
    pub unique_id: String,

    /// Original expiry of the revoked token
    pub expires_at: DateTime<Utc>,
}

impl RevocationEntry {
    /// Entry for the token described by `claims`
    pub fn for_claims(claims: &Claims) -> Self {
        Self {
            unique_id: claims.jti.clone(),
            expires_at: claims.expires_at(),
        }
    }
}

/// Token pair returned to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Access token
    pub access_token: String,

    /// Refresh token
    pub refresh_token: String,

    /// Access token expiry time in seconds
    pub access_expires_in: i64,

    /// Refresh token expiry time in seconds
    pub refresh_expires_in: i64,

    /// Always `bearer`
    pub token_type: String,
}

impl TokenPair {
    /// Creates a new token pair
    ///
    /// # Arguments
    ///
    /// * `access_token` - Encoded access token
    /// * `refresh_token` - Encoded refresh token
    /// * `access_expires_in` - Access token lifetime in seconds
    /// * `refresh_expires_in` - Refresh token lifetime in seconds
    pub fn new(
        access_token: String,
        refresh_token: String,
        access_expires_in: i64,
        refresh_expires_in: i64,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            access_expires_in,
            refresh_expires_in,
            token_type: BEARER_TOKEN_TYPE.to_string(),
        }
    }
}
