use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use bookswap_auth::Session;

use super::{
    models::{SignIn, SignUp, User},
    service,
};
use crate::{error::MarketResult, session::CurrentSession, state::AppState};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/sign-up", post(sign_up))
        .route("/sign-in", post(sign_in))
        .route("/sign-out", post(sign_out))
        .route("/me", get(me))
        .with_state(state)
}

async fn sign_up(
    State(state): State<AppState>,
    Json(request): Json<SignUp>,
) -> MarketResult<(StatusCode, Json<Session>)> {
    let session = service::sign_up(state.auth.as_ref(), state.store.as_ref(), request).await?;
    Ok((StatusCode::CREATED, Json(session)))
}

async fn sign_in(
    State(state): State<AppState>,
    Json(request): Json<SignIn>,
) -> MarketResult<Json<Session>> {
    Ok(Json(service::sign_in(state.auth.as_ref(), request).await?))
}

async fn sign_out(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> MarketResult<StatusCode> {
    service::sign_out(state.auth.as_ref(), &session).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn me(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> MarketResult<Json<User>> {
    Ok(Json(service::profile(state.store.as_ref(), &session).await?))
}
