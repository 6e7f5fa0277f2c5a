//! Listing retrieval.

use bookswap_auth::Session;
use bookswap_store::{Document, DocumentStore};
use serde_json::Value;

use super::models::{Book, BOOKS};
use crate::error::MarketResult;
use crate::modules::users::service::session_user_id;

fn decode_all(docs: Vec<Document>) -> MarketResult<Vec<Book>> {
    docs.iter()
        .map(|doc| doc.decode::<Book>().map_err(Into::into))
        .collect()
}

/// Every listing, narrowed by `search` when one is given.
pub async fn list_books(store: &dyn DocumentStore, search: Option<&str>) -> MarketResult<Vec<Book>> {
    let mut books = decode_all(store.list(BOOKS).await?)?;
    if let Some(query) = search {
        books.retain(|book| book.matches(query));
    }
    Ok(books)
}

/// Listings owned by `owner_id`.
pub async fn list_books_owned_by(store: &dyn DocumentStore, owner_id: &str) -> MarketResult<Vec<Book>> {
    decode_all(store.query_eq(BOOKS, "ownerID", &Value::from(owner_id)).await?)
}

/// Listings of the signed-in user; empty when the session has no user record.
pub async fn list_owned_books(store: &dyn DocumentStore, session: &Session) -> MarketResult<Vec<Book>> {
    match session_user_id(store, session).await? {
        Some(owner_id) => list_books_owned_by(store, &owner_id).await,
        None => {
            tracing::info!(email = ?session.email, "no user record for session; no owned listings");
            Ok(Vec::new())
        }
    }
}

pub async fn get_book(store: &dyn DocumentStore, id: &str) -> MarketResult<Option<Book>> {
    store
        .get(BOOKS, id)
        .await?
        .map(|doc| doc.decode::<Book>())
        .transpose()
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{marketplace, session_for};

    fn ids(books: &[Book]) -> Vec<&str> {
        books.iter().map(|book| book.id.as_str()).collect()
    }

    #[tokio::test]
    async fn lists_every_book() {
        let store = marketplace().await;
        let books = list_books(&store, None).await.unwrap();
        assert_eq!(ids(&books), vec!["b1", "b2", "b3", "b4"]);
    }

    #[tokio::test]
    async fn search_narrows_listing() {
        let store = marketplace().await;
        let books = list_books(&store, Some("DUNE")).await.unwrap();
        assert_eq!(ids(&books), vec!["b1"]);
    }

    #[tokio::test]
    async fn owner_listing_only_contains_owned_books() {
        let store = marketplace().await;
        let books = list_books_owned_by(&store, "u2").await.unwrap();
        assert_eq!(ids(&books), vec!["b1", "b4"]);
        assert!(books
            .iter()
            .all(|book| book.owner_id.as_deref() == Some("u2")));
    }

    #[tokio::test]
    async fn owned_books_follow_the_session() {
        let store = marketplace().await;
        let mine = list_owned_books(&store, &session_for("a@x.com")).await.unwrap();
        assert_eq!(ids(&mine), vec!["b2"]);

        let stranger = list_owned_books(&store, &session_for("ghost@x.com"))
            .await
            .unwrap();
        assert!(stranger.is_empty());
    }

    #[tokio::test]
    async fn get_book_reads_optional_fields() {
        let store = marketplace().await;
        let book = get_book(&store, "b1").await.unwrap().unwrap();
        assert_eq!(book.author.as_deref(), Some("Frank Herbert"));
        assert_eq!(book.image_url.as_deref(), Some("https://img.example/dune.jpg"));
        assert!(get_book(&store, "nope").await.unwrap().is_none());
    }
}
