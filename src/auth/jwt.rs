//! JWT access token codec
//!
//! Issues and verifies the short-lived HMAC-signed access tokens. Tokens are
//! stateless: expiry is the only way an access token stops being valid.

use chrono::Duration;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, TokenData, Validation, decode, encode};
use std::fmt;
use uuid::Uuid;

use crate::auth::types::{JwtClaims, TOKEN_ISSUER};
use crate::error::AuthError;

/// Access token codec keyed by a single shared secret
#[derive(Clone)]
pub struct TokenCodec {
    /// Encoding key
    encoding_key: EncodingKey,
    /// Decoding key
    decoding_key: DecodingKey,
    /// Validation configuration
    validation: Validation,
}

impl fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCodec")
            .field("algorithms", &self.validation.algorithms)
            .finish_non_exhaustive()
    }
}

impl TokenCodec {
    /// Create a codec from the shared signing secret
    #[must_use]
    pub fn new(secret: &[u8]) -> Self {
        let encoding_key = EncodingKey::from_secret(secret);
        let decoding_key = DecodingKey::from_secret(secret);

        // Only the HMAC family is accepted, whatever the token header claims.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
        validation.set_issuer(&[TOKEN_ISSUER]);
        validation.set_required_spec_claims(&["exp", "sub", "iss"]);
        validation.validate_exp = true;
        validation.validate_nbf = false;
        validation.leeway = 0;

        Self {
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Issue an access token for `subject` valid for `ttl`
    pub fn issue(&self, subject: Uuid, ttl: Duration) -> Result<String, AuthError> {
        let claims = JwtClaims::new(subject, ttl);
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(AuthError::Signing)
    }

    /// Verify a token and return its subject
    pub fn verify(&self, token: &str) -> Result<Uuid, AuthError> {
        let token_data: TokenData<JwtClaims> =
            decode(token, &self.decoding_key, &self.validation)?;
        let claims = token_data.claims;

        // The library accepts `exp == now`; a token is dead from its expiry second on.
        if claims.is_expired() {
            return Err(AuthError::TokenExpired);
        }

        claims.user_id().map_err(AuthError::InvalidSubject)
    }
}
