use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};

/// The `Authorization` header, if present and valid UTF-8.
///
/// Never rejects: deciding what a missing or foreign header means is the
/// pipeline's job, and handlers pass this value to it explicitly.
#[derive(Debug, Clone, Default)]
pub struct AuthHeader(pub Option<String>);

impl AuthHeader {
    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl<S> FromRequestParts<S> for AuthHeader
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        Ok(Self(value))
    }
}
