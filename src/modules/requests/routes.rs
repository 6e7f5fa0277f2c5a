use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};

use super::{
    models::{
        PurchaseInput, PurchaseRequest, RequestDirection, RequestKind, RequestList, RequestQuery,
        SwapInput, SwapRequest,
    },
    service,
};
use crate::{
    error::{MarketError, MarketResult},
    session::CurrentSession,
    state::AppState,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(list_requests))
        .route("/purchase", post(create_purchase))
        .route("/swap", post(create_swap))
        .route("/{kind}/{id}", delete(delete_request))
        .with_state(state)
}

async fn create_purchase(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Json(input): Json<PurchaseInput>,
) -> MarketResult<(StatusCode, Json<PurchaseRequest>)> {
    let request =
        service::create_purchase_request(state.store.as_ref(), &session, &input.book_id).await?;
    Ok((StatusCode::CREATED, Json(request)))
}

async fn create_swap(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Json(input): Json<SwapInput>,
) -> MarketResult<(StatusCode, Json<SwapRequest>)> {
    let request = service::create_swap_request(
        state.store.as_ref(),
        &session,
        &input.book_id,
        input.offered_book_id.as_deref(),
    )
    .await?;
    Ok((StatusCode::CREATED, Json(request)))
}

async fn list_requests(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Query(query): Query<RequestQuery>,
) -> MarketResult<Json<RequestList>> {
    Ok(Json(
        service::list_requests(state.store.as_ref(), &session, query.direction).await?,
    ))
}

/// Deletes one of the caller's own outgoing requests.
async fn delete_request(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path((kind, id)): Path<(RequestKind, String)>,
) -> MarketResult<StatusCode> {
    let store = state.store.as_ref();
    let mut outgoing = service::list_requests(store, &session, RequestDirection::Outgoing).await?;
    if !outgoing.contains(kind, &id) {
        return Err(MarketError::NotFound(format!("request '{id}'")));
    }

    service::delete_request(store, &mut outgoing, kind, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
