//! Errors raised by the authentication core: password hashing, access token
//! codec, refresh token generation and credential extraction.

use thiserror::Error;

/// The primary error type for all authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("credential missing: {0}")]
    MissingCredential(&'static str),

    #[error("invalid access token: {0}")]
    InvalidToken(String),

    #[error("access token expired")]
    TokenExpired,

    #[error("access token subject is not a valid user id: {0}")]
    InvalidSubject(#[source] uuid::Error),

    #[error("password exceeds {max} bytes")]
    PasswordTooLong { max: usize },

    #[error("password hashing failed: {0}")]
    Hashing(#[from] bcrypt::BcryptError),

    #[error("secure random source failed: {0}")]
    Entropy(#[from] rand::Error),

    #[error("access token signing failed: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

impl AuthError {
    /// Whether the error means the caller presented a bad or missing credential,
    /// as opposed to a failure inside the server.
    #[must_use]
    pub const fn is_credential_failure(&self) -> bool {
        matches!(
            self,
            Self::MissingCredential(_)
                | Self::InvalidToken(_)
                | Self::TokenExpired
                | Self::InvalidSubject(_)
        )
    }
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => Self::TokenExpired,
            _ => Self::InvalidToken(err.to_string()),
        }
    }
}
