//! Signed session tokens carrying identity and role claims.
//!
//! Tokens are stateless bearer JWTs: the server holds only the signing
//! secret, injected once at construction. Expiry is the only lifecycle
//! bound; there is no revocation list.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use super::error::Error;
use super::user::{UserId, UserValidationError};

/// Claims embedded in every session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user id.
    pub sub: String,
    /// Role claim: whether the user may manage listings.
    #[serde(rename = "isHost")]
    pub is_host: bool,
    /// Issued-at, seconds since the epoch.
    pub iat: i64,
    /// Expiry, seconds since the epoch.
    pub exp: i64,
}

impl Claims {
    /// Parse the subject back into a [`UserId`].
    pub fn user_id(&self) -> Result<UserId, UserValidationError> {
        UserId::new(&self.sub)
    }
}

/// Issues and verifies signed, time-limited session tokens.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenIssuer {
    /// Default token lifetime: 24 hours.
    pub const DEFAULT_TTL_HOURS: i64 = 24;

    /// Build an issuer from a signing secret and token lifetime.
    ///
    /// The secret is wiped from the intermediate buffer once the keys are
    /// derived.
    pub fn new(secret: Zeroizing<Vec<u8>>, ttl: Duration) -> Self {
        let mut validation = Validation::default();
        validation.leeway = 0;
        Self {
            encoding_key: EncodingKey::from_secret(&secret),
            decoding_key: DecodingKey::from_secret(&secret),
            validation,
            ttl,
        }
    }

    /// Issuer with the standard 24-hour lifetime.
    pub fn with_default_ttl(secret: Zeroizing<Vec<u8>>) -> Self {
        Self::new(secret, Duration::hours(Self::DEFAULT_TTL_HOURS))
    }

    /// Issue a signed token for the given identity and role.
    pub fn issue(&self, user_id: &UserId, is_host: bool) -> Result<String, Error> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            is_host,
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|err| Error::internal(format!("failed to sign token: {err}")))
    }

    /// Verify a token's signature and expiry, returning its claims.
    ///
    /// Every failure collapses into `Unauthorized` so callers cannot
    /// distinguish a forged token from an expired one.
    pub fn verify(&self, token: &str) -> Result<Claims, Error> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|_| Error::unauthorized("Invalid or expired token"))
    }
}
