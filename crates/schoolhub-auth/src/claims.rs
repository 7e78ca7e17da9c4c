//! Token claim inspection.
//!
//! Tokens are issued and verified by the backend. The client never holds the
//! signing secret, so claims are decoded without signature validation and
//! only used to decide whether a stored token is worth sending.

use chrono::Utc;
use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

/// The registered claims the client cares about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    #[serde(default)]
    pub sub: Option<String>,
    /// Expiration timestamp (Unix seconds)
    #[serde(default)]
    pub exp: Option<i64>,
    /// Issued-at timestamp (Unix seconds)
    #[serde(default)]
    pub iat: Option<i64>,
}

impl TokenClaims {
    /// Decodes the claims of a JWT. Returns `None` for opaque tokens.
    pub fn inspect(token: &str) -> Option<Self> {
        let mut validation = Validation::default();
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        decode::<TokenClaims>(token, &DecodingKey::from_secret(&[]), &validation)
            .map(|data| data.claims)
            .ok()
    }

    pub fn is_expired_at(&self, now: i64) -> bool {
        self.exp.is_some_and(|exp| exp <= now)
    }
}

/// Whether `token` is a JWT whose `exp` has passed.
///
/// Opaque tokens and JWTs without `exp` are never considered expired; the
/// backend has the final word on those.
pub fn token_expired(token: &str) -> bool {
    TokenClaims::inspect(token).is_some_and(|claims| claims.is_expired_at(Utc::now().timestamp()))
}
