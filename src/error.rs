/*
 * Responsibility
 * - the one error type handlers return (AppError)
 * - IntoResponse: HTTP status + {"error": {code, message}} body
 * - From impls for auth denials, validation, repo, id codec and body errors
 *
 * unauthenticated (401), forbidden (403) and bad input (400) stay distinct.
 */
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::domain::ValidationError;
use crate::repos::error::RepoError;
use crate::services::auth::DenyReason;
use crate::services::id_codec::IdCodecError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{code}: {message}")]
    BadRequest { code: &'static str, message: String },
    #[error("not found: {resource}")]
    NotFound { resource: &'static str },
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    #[error("forbidden: {0}")]
    Forbidden(String),
    #[error("internal server error")]
    Internal,
}

impl AppError {
    pub fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
        Self::BadRequest {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &'static str) -> Self {
        Self::NotFound { resource }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (code, message) = match self {
            AppError::BadRequest { code, message } => (code, message),
            AppError::NotFound { resource } => ("NOT_FOUND", format!("{resource} not found.")),
            AppError::Unauthorized(message) => ("UNAUTHORIZED", message),
            AppError::Forbidden(message) => ("FORBIDDEN", message),
            AppError::Internal => ("INTERNAL_SERVER_ERROR", "internal server error".into()),
        };

        let body = ErrorResponse {
            error: ErrorBody { code, message },
        };

        (status, Json(body)).into_response()
    }
}

impl From<DenyReason> for AppError {
    fn from(reason: DenyReason) -> Self {
        match reason {
            DenyReason::MissingOrInvalidToken(_) => AppError::Unauthorized(reason.to_string()),
            DenyReason::NotOwner => AppError::Forbidden(reason.to_string()),
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(e: ValidationError) -> Self {
        let code = match e {
            ValidationError::MissingRequiredField(_) => "MISSING_REQUIRED_FIELD",
            ValidationError::PasswordTooShort { .. } => "PASSWORD_TOO_SHORT",
            ValidationError::InvalidLikesValue(_) => "INVALID_LIKES",
        };
        AppError::bad_request(code, e.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        if let RepoError::DuplicateUsername = e {
            return AppError::bad_request("USERNAME_TAKEN", e.to_string());
        }
        tracing::error!(error = ?e, "repository failure");
        AppError::Internal
    }
}

impl From<IdCodecError> for AppError {
    fn from(e: IdCodecError) -> Self {
        match e {
            // Client supplied a malformed public id (e.g. /blogs/{id})
            IdCodecError::DecodeInvalidFormat | IdCodecError::DecodeOutOfRange => {
                AppError::bad_request("INVALID_PUBLIC_ID", "malformatted id")
            }
            // server-side config / programming errors
            _ => {
                tracing::error!(error = %e, "id codec failure");
                AppError::Internal
            }
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::bad_request("INVALID_BODY", rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::auth::InvalidTokenKind;

    #[test]
    fn denials_keep_401_and_403_apart() {
        let expired =
            AppError::from(DenyReason::MissingOrInvalidToken(InvalidTokenKind::Expired));
        let not_owner = AppError::from(DenyReason::NotOwner);

        assert_eq!(expired.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(expired.to_string(), "unauthorized: missing or invalid token");
        assert_eq!(not_owner.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn validation_is_bad_request() {
        let err = AppError::from(ValidationError::MissingRequiredField("url"));

        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "MISSING_REQUIRED_FIELD: url is required");
    }

    #[test]
    fn malformed_public_id_is_bad_request() {
        let err = AppError::from(IdCodecError::DecodeInvalidFormat);

        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn repo_failure_is_internal() {
        let err = AppError::from(RepoError::Db(sqlx::Error::RowNotFound));

        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn taken_username_is_bad_request() {
        let err = AppError::from(RepoError::DuplicateUsername);

        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "USERNAME_TAKEN: username already taken");
    }

    #[test]
    fn response_carries_status() {
        let res = AppError::from(DenyReason::NotOwner).into_response();

        assert_eq!(res.status(), StatusCode::FORBIDDEN);
    }
}
