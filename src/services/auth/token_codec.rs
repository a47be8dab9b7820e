use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, errors::ErrorKind};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Why a bearer token was rejected.
///
/// All variants surface to the client the same way; the split exists for logs and tests.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token signature is invalid")]
    InvalidSignature,
    #[error("token has expired")]
    Expired,
    #[error("token is malformed: {0}")]
    Malformed(jsonwebtoken::errors::Error),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        match e.kind() {
            ErrorKind::InvalidSignature => return Self::InvalidSignature,
            ErrorKind::ExpiredSignature => return Self::Expired,
            _ => {}
        }
        Self::Malformed(e)
    }
}

/// Decoded payload of a verified token.
///
/// `sub` is optional on the wire so that a signed token without a subject
/// decodes and is rejected by the pipeline rather than by serde.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    #[serde(default)]
    pub iat: u64,
    pub exp: u64,
}

impl TokenClaims {
    /// Subject as a user id. Blank or non-UUID subjects count as absent.
    pub fn subject_user_id(&self) -> Option<Uuid> {
        self.sub
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .and_then(|s| Uuid::parse_str(s).ok())
    }
}

/// HS256 signer/verifier sharing one secret with the identity service.
///
/// - Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("validation", &self.validation)
            .finish()
    }
}

impl TokenCodec {
    pub fn new(secret: &str, leeway_seconds: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = leeway_seconds;
        validation.validate_aud = false;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Verify signature and expiry, then decode the claims.
    pub fn verify(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let data =
            jsonwebtoken::decode::<TokenClaims>(token, &self.decoding_key, &self.validation)?;

        Ok(data.claims)
    }

    /// Sign arbitrary claims. Used by tests and local tooling; production tokens
    /// come from the identity service.
    pub fn sign(&self, claims: &TokenClaims) -> Result<String, TokenError> {
        let mut header = Header::new(Algorithm::HS256);
        header.typ = Some("JWT".to_string());
        Ok(jsonwebtoken::encode(&header, claims, &self.encoding_key)?)
    }

    /// Issue a token for `user_id` valid for `ttl_seconds` from now.
    /// `exp` saturates at `u64::MAX`.
    pub fn issue(&self, user_id: Uuid, ttl_seconds: u64) -> Result<String, TokenError> {
        let now = Utc::now().timestamp().max(0) as u64;
        self.sign(&TokenClaims {
            sub: Some(user_id.to_string()),
            iat: now,
            exp: now.saturating_add(ttl_seconds),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    fn now() -> u64 {
        Utc::now().timestamp() as u64
    }

    #[test]
    fn issued_token_round_trips_subject() {
        let codec = TokenCodec::new(SECRET, 0);
        let user_id = Uuid::new_v4();

        let token = codec.issue(user_id, 3600).unwrap();
        let claims = codec.verify(&token).unwrap();

        assert_eq!(claims.subject_user_id(), Some(user_id));
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn unbounded_ttl_does_not_overflow() {
        let codec = TokenCodec::new(SECRET, 0);
        let token = codec.issue(Uuid::new_v4(), u64::MAX).unwrap();

        let claims = codec.verify(&token).unwrap();
        assert_eq!(claims.exp, u64::MAX);
    }

    #[test]
    fn wrong_secret_is_invalid_signature() {
        let issuer = TokenCodec::new("someone-else", 0);
        let codec = TokenCodec::new(SECRET, 0);

        let token = issuer.issue(Uuid::new_v4(), 3600).unwrap();

        assert!(matches!(
            codec.verify(&token),
            Err(TokenError::InvalidSignature)
        ));
    }

    #[test]
    fn past_expiry_is_expired() {
        let codec = TokenCodec::new(SECRET, 0);
        let token = codec
            .sign(&TokenClaims {
                sub: Some(Uuid::new_v4().to_string()),
                iat: now() - 7200,
                exp: now() - 3600,
            })
            .unwrap();

        assert!(matches!(codec.verify(&token), Err(TokenError::Expired)));
    }

    #[test]
    fn garbage_is_malformed() {
        let codec = TokenCodec::new(SECRET, 0);

        assert!(matches!(
            codec.verify("not-a-jwt"),
            Err(TokenError::Malformed(_))
        ));
        assert!(matches!(codec.verify(""), Err(TokenError::Malformed(_))));
    }

    #[test]
    fn subject_must_be_a_uuid() {
        let claims = TokenClaims {
            sub: Some("root".into()),
            iat: 0,
            exp: 1,
        };
        assert_eq!(claims.subject_user_id(), None);

        let claims = TokenClaims {
            sub: None,
            iat: 0,
            exp: 1,
        };
        assert_eq!(claims.subject_user_id(), None);
    }
}
