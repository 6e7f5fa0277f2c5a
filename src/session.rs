//! Bearer-token session extraction.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use bookswap_auth::Session;

use crate::{error::MarketError, state::AppState};

const BEARER_PREFIX: &str = "Bearer ";

/// The signed-in session of the caller, resolved through the auth provider.
///
/// Rejects with [`MarketError::Unauthenticated`] when the header is missing
/// or the token does not name an open session.
#[derive(Debug, Clone)]
pub struct CurrentSession(pub Session);

/// Token carried by `Authorization: Bearer <token>`.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix(BEARER_PREFIX)?.trim();
    (!token.is_empty()).then_some(token)
}

impl FromRequestParts<AppState> for CurrentSession {
    type Rejection = MarketError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or(MarketError::Unauthenticated)?;

        state
            .auth
            .current_session(token)
            .await?
            .map(CurrentSession)
            .ok_or(MarketError::Unauthenticated)
    }
}
