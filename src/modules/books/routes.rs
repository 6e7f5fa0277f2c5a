use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};

use super::{
    models::{Book, BookQuery},
    service,
};
use crate::{
    error::{MarketError, MarketResult},
    session::CurrentSession,
    state::AppState,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(list_books))
        .route("/mine", get(my_books))
        .route("/{id}", get(get_book))
        .with_state(state)
}

async fn list_books(
    State(state): State<AppState>,
    Query(query): Query<BookQuery>,
) -> MarketResult<Json<Vec<Book>>> {
    let books = service::list_books(state.store.as_ref(), query.q.as_deref()).await?;
    Ok(Json(books))
}

async fn my_books(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> MarketResult<Json<Vec<Book>>> {
    Ok(Json(
        service::list_owned_books(state.store.as_ref(), &session).await?,
    ))
}

async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> MarketResult<Json<Book>> {
    service::get_book(state.store.as_ref(), &id)
        .await?
        .map(Json)
        .ok_or_else(|| MarketError::NotFound(format!("book '{id}'")))
}
