use axum::response::{IntoResponse, Response};
use bookswap_auth::AuthError;
use bookswap_http::error::AppError;
use bookswap_store::StoreError;
use thiserror::Error;

/// Failures of the marketplace flows.
#[derive(Debug, Error)]
pub enum MarketError {
    /// Rejected by the authentication provider; the message is shown verbatim.
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("sign in to continue")]
    Unauthenticated,

    /// No matching user record or book owner, nothing was written.
    #[error("Missing user or book owner info.")]
    MissingInfo,

    #[error("{0} not found")]
    NotFound(String),

    #[error("user id '{0}' is already taken")]
    UserIdTaken(String),

    #[error("email '{0}' already belongs to a user")]
    EmailTaken(String),

    #[error("{0}")]
    Invalid(String),

    #[error("document store failure: {0}")]
    Store(#[from] StoreError),
}

pub type MarketResult<T> = Result<T, MarketError>;

impl From<MarketError> for AppError {
    fn from(err: MarketError) -> Self {
        match err {
            MarketError::Auth(AuthError::InvalidCredentials) => {
                AppError::unauthorized(AuthError::InvalidCredentials.to_string())
            }
            MarketError::Auth(AuthError::EmailInUse) => {
                AppError::conflict(AuthError::EmailInUse.to_string())
            }
            MarketError::Auth(err @ (AuthError::InvalidEmail | AuthError::WeakPassword { .. })) => {
                AppError::validation_with_code("auth_error", vec![], err.to_string())
            }
            MarketError::Auth(err @ AuthError::Backend(_)) => AppError::Internal(err.into()),
            MarketError::Unauthenticated => AppError::unauthorized("sign in to continue"),
            err @ MarketError::MissingInfo => {
                AppError::validation_with_code("missing_info", vec![], err.to_string())
            }
            err @ MarketError::NotFound(_) => AppError::not_found(err.to_string()),
            err @ (MarketError::UserIdTaken(_) | MarketError::EmailTaken(_)) => {
                AppError::conflict(err.to_string())
            }
            MarketError::Invalid(message) => AppError::bad_request(message),
            MarketError::Store(err) => {
                tracing::error!(error = %err, "document store operation failed");
                AppError::Internal(err.into())
            }
        }
    }
}

impl IntoResponse for MarketError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::*;

    fn status(err: MarketError) -> StatusCode {
        AppError::from(err).status()
    }

    #[test]
    fn auth_failures_keep_provider_semantics() {
        assert_eq!(
            status(AuthError::InvalidCredentials.into()),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(status(AuthError::EmailInUse.into()), StatusCode::CONFLICT);
        assert_eq!(
            status(AuthError::WeakPassword { min: 6 }.into()),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn auth_message_is_passed_through() {
        match AppError::from(MarketError::from(AuthError::InvalidEmail)) {
            AppError::Validation { message, .. } => {
                assert_eq!(message, "The email address is badly formatted.")
            }
            other => panic!("unexpected mapping {other:?}"),
        }
    }

    #[test]
    fn missing_info_is_unprocessable() {
        match AppError::from(MarketError::MissingInfo) {
            AppError::Validation { code, message, .. } => {
                assert_eq!(code, "missing_info");
                assert_eq!(message, "Missing user or book owner info.");
            }
            other => panic!("unexpected mapping {other:?}"),
        }
    }

    #[test]
    fn taken_identifiers_conflict() {
        assert_eq!(
            status(MarketError::EmailTaken("a@x.com".into())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status(MarketError::UserIdTaken("u1".into())),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn store_failures_are_internal() {
        let err = MarketError::Store(StoreError::Backend("timeout".into()));
        assert_eq!(status(err), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
