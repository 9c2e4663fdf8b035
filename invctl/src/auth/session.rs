//! Session token creation and verification.
//!
//! Tokens are compact signed claims binding a staff identity to a short
//! expiry. Verification is a pure function of the token, the configured
//! secret, and the clock; the server keeps no session state and no
//! revocation list (logout is a client-side cookie clear).

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::{config::Config, errors::Error, types::UserId};

/// Identity claim embedded in a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (staff account id)
    pub sub: UserId,
    /// Account email at issuance time
    pub email: String,
    /// Expiration time (unix seconds)
    pub exp: i64,
    /// Issued at (unix seconds)
    pub iat: i64,
}

impl SessionClaims {
    /// Create new claims for a user, expiring after the configured
    /// session timeout.
    pub fn new(user_id: UserId, email: &str, config: &Config) -> Result<Self, Error> {
        let now = Utc::now();
        let lifetime =
            chrono::Duration::from_std(config.auth.session.timeout).map_err(|e| Error::Internal {
                operation: format!("session timeout out of range: {e}"),
            })?;
        let exp = now + lifetime;

        Ok(Self {
            sub: user_id,
            email: email.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        })
    }
}

/// Create a signed session token for a user
pub fn create_session_token(user_id: UserId, email: &str, config: &Config) -> Result<String, Error> {
    let claims = SessionClaims::new(user_id, email, config)?;
    let secret_key = config.secret_key.as_ref().ok_or_else(|| Error::Internal {
        operation: "sessions: secret_key is required".to_string(),
    })?;

    let key = EncodingKey::from_secret(secret_key.as_bytes());
    encode(&Header::default(), &claims, &key).map_err(|e| Error::Internal {
        operation: format!("create session token: {e}"),
    })
}

/// Verify and decode a session token.
///
/// Every client-caused failure (malformed token, bad signature, expired)
/// collapses into `Unauthenticated`: callers must not be able to tell
/// which check rejected the token. Key and crypto setup problems are
/// server errors.
pub fn verify_session_token(token: &str, config: &Config) -> Result<SessionClaims, Error> {
    let secret_key = config.secret_key.as_ref().ok_or_else(|| Error::Internal {
        operation: "sessions: secret_key is required".to_string(),
    })?;

    let key = DecodingKey::from_secret(secret_key.as_bytes());
    let validation = Validation::default();

    let token_data =
        decode::<SessionClaims>(token, &key, &validation).map_err(|e| match e.kind() {
            // Client errors (401) - malformed tokens, invalid claims, expired tokens
            jsonwebtoken::errors::ErrorKind::InvalidToken
            | jsonwebtoken::errors::ErrorKind::InvalidSignature
            | jsonwebtoken::errors::ErrorKind::ExpiredSignature
            | jsonwebtoken::errors::ErrorKind::MissingRequiredClaim(_)
            | jsonwebtoken::errors::ErrorKind::InvalidIssuer
            | jsonwebtoken::errors::ErrorKind::InvalidAudience
            | jsonwebtoken::errors::ErrorKind::InvalidSubject
            | jsonwebtoken::errors::ErrorKind::ImmatureSignature
            | jsonwebtoken::errors::ErrorKind::Base64(_)
            | jsonwebtoken::errors::ErrorKind::InvalidAlgorithm => {
                Error::Unauthenticated { message: None }
            }

            // Everything else is a server-side problem (key format, crypto
            // backend, serialization) and surfaces as a 500.
            _ => Error::Internal {
                operation: format!("session token verification: {e}"),
            },
        })?;

    Ok(token_data.claims)
}
