use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::clock::Clock;

/// Session claims carried inside the signed token.
///
/// `sub` is the string form of the user's UUID; `exp` is a unix timestamp.
/// The signature binds the payload, so a verified claims value is immutable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iss: String,
    pub exp: i64,
}

impl Claims {
    /// Parses the subject back into a user id. A signed token always carries
    /// a UUID subject, so failure here means the token was not one of ours.
    pub fn subject_id(&self) -> Result<Uuid, TokenError> {
        self.sub.parse().map_err(|_| TokenError::Invalid)
    }
}

/// Single opaque verification failure. Malformed, bad signature, wrong
/// algorithm, and expired all collapse into this variant so callers cannot
/// build an oracle out of the response.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("invalid token")]
    Invalid,
    #[error("token signing failed")]
    Signing,
}

/// Issues and verifies HS256-signed session tokens.
///
/// Pure in-memory operations: a fixed secret, issuer, and TTL plus an
/// injected clock. No revocation store exists; a token stays valid until
/// its expiry instant.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl TokenService {
    pub fn new(secret: &str, issuer: impl Into<String>, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            issuer: issuer.into(),
            ttl,
            clock,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Builds and signs a token for `subject`, expiring at `issued_at + ttl`.
    pub fn issue(&self, subject: Uuid, issued_at: DateTime<Utc>) -> Result<String, TokenError> {
        let claims = Claims {
            sub: subject.to_string(),
            iss: self.issuer.clone(),
            exp: (issued_at + self.ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|_| TokenError::Signing)
    }

    /// Decodes and checks a token: HS256 signature against our secret (any
    /// other algorithm, including "none", is rejected outright), issuer
    /// match, and expiry strictly after the current clock reading.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        // Expiry is checked against the injected clock below, not system time
        validation.validate_exp = false;

        let data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|_| TokenError::Invalid)?;

        let now = self.clock.now_utc().timestamp();
        if data.claims.exp <= now {
            return Err(TokenError::Invalid);
        }

        Ok(data.claims)
    }
}
