//! Per-request authorization: bearer extraction → token verification →
//! user resolution → optional ownership check.
//!
//! Extraction never fails (a missing or foreign header just yields no token);
//! verification does. Nothing is cached: every call re-verifies the token and
//! re-resolves the user, so a deleted user loses access immediately.

use std::{fmt, sync::Arc};

use uuid::Uuid;

use crate::domain::{BlogRecord, UserRecord};
use crate::services::auth::{
    directory::UserDirectory,
    token_codec::{TokenCodec, TokenError},
};

/// Which step rejected the credential. Logged, never shown to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidTokenKind {
    Missing,
    InvalidSignature,
    Expired,
    Malformed,
    MissingSubject,
    UnknownUser,
    DirectoryUnavailable,
}

impl From<&TokenError> for InvalidTokenKind {
    fn from(e: &TokenError) -> Self {
        match e {
            TokenError::InvalidSignature => Self::InvalidSignature,
            TokenError::Expired => Self::Expired,
            TokenError::Malformed(_) => Self::Malformed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    MissingOrInvalidToken(InvalidTokenKind),
    NotOwner,
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingOrInvalidToken(_) => write!(f, "missing or invalid token"),
            Self::NotOwner => write!(f, "not the owner"),
        }
    }
}

impl std::error::Error for DenyReason {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthDecision {
    Authorized(UserRecord),
    Denied(DenyReason),
}

impl AuthDecision {
    /// `Authorized(user)` → `Ok(user)`, `Denied(reason)` → `Err(reason)`.
    pub fn into_result(self) -> Result<UserRecord, DenyReason> {
        match self {
            Self::Authorized(user) => Ok(user),
            Self::Denied(reason) => Err(reason),
        }
    }
}

/// Pull `<token>` out of `Bearer <token>`; the scheme keyword is case-insensitive.
pub fn extract_bearer(header: Option<&str>) -> Option<&str> {
    let header = header?;
    let (scheme, token) = header.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

#[derive(Clone)]
pub struct AuthPipeline {
    codec: TokenCodec,
    directory: Arc<dyn UserDirectory>,
}

impl fmt::Debug for AuthPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthPipeline")
            .field("codec", &self.codec)
            .finish_non_exhaustive()
    }
}

impl AuthPipeline {
    pub fn new(codec: TokenCodec, directory: Arc<dyn UserDirectory>) -> Self {
        Self { codec, directory }
    }

    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    /// Decide whether the request carrying `header` may proceed.
    ///
    /// With `owner_check`, the acting user must also own that blog.
    pub async fn authorize(
        &self,
        header: Option<&str>,
        owner_check: Option<&BlogRecord>,
    ) -> AuthDecision {
        let user = match self.resolve(header).await {
            Ok(user) => user,
            Err(kind) => {
                tracing::warn!(?kind, "bearer token rejected");
                return AuthDecision::Denied(DenyReason::MissingOrInvalidToken(kind));
            }
        };

        match owner_check {
            Some(blog) => Self::check_owner(user, blog),
            None => AuthDecision::Authorized(user),
        }
    }

    /// Ownership step alone, for a user already resolved by `authorize`.
    pub fn check_owner(user: UserRecord, blog: &BlogRecord) -> AuthDecision {
        if blog.owner_user_id != user.id {
            tracing::warn!(
                user_id = %user.id,
                blog_id = blog.id,
                "ownership check failed"
            );
            return AuthDecision::Denied(DenyReason::NotOwner);
        }

        AuthDecision::Authorized(user)
    }

    async fn resolve(&self, header: Option<&str>) -> Result<UserRecord, InvalidTokenKind> {
        let token = extract_bearer(header).ok_or(InvalidTokenKind::Missing)?;

        let claims = self.codec.verify(token).map_err(|e| {
            tracing::debug!(error = %e, "token verification failed");
            InvalidTokenKind::from(&e)
        })?;

        let user_id: Uuid = claims
            .subject_user_id()
            .ok_or(InvalidTokenKind::MissingSubject)?;

        match self.directory.find_by_id(user_id).await {
            Ok(Some(user)) => Ok(user),
            Ok(None) => Err(InvalidTokenKind::UnknownUser),
            Err(err) => {
                // fail-closed
                tracing::warn!(error = ?err, %user_id, "user directory failure");
                Err(InvalidTokenKind::DirectoryUnavailable)
            }
        }
    }
}
