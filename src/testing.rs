//! Shared fixtures for unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use bookswap_auth::Session;
use bookswap_store::{Document, DocumentStore, Fields, Fixture, MemoryDocumentStore, StoreResult};
use serde_json::Value;

const MARKETPLACE: &str = r#"{
    "users": [
        { "id": "u1", "userID": "u1", "email": "a@x.com", "fullName": "Ada Reader", "isAdmin": false },
        { "id": "u2", "userID": "u2", "email": "b@x.com", "fullName": "Bo Seller", "isAdmin": false }
    ],
    "books": [
        {
            "id": "b1",
            "title": "Dune",
            "author": "Frank Herbert",
            "price": 120.0,
            "imageUrl": "https://img.example/dune.jpg",
            "ownerID": "u2"
        },
        { "id": "b2", "title": "Emma", "author": "Jane Austen", "price": 40.0, "ownerID": "u1" },
        { "id": "b3", "title": "Beowulf", "price": 15.0 },
        { "id": "b4", "title": "Middlemarch", "author": "George Eliot", "price": 55.0, "ownerID": "u2" }
    ]
}"#;

/// Two users and four listings. `a@x.com` is `u1`, `b1` belongs to `u2`
/// and `b3` has no owner.
pub async fn marketplace() -> MemoryDocumentStore {
    let fixture = Fixture::parse(MARKETPLACE).expect("marketplace fixture parses");
    MemoryDocumentStore::with_fixture(fixture)
}

pub fn session_for(email: &str) -> Session {
    Session {
        token: format!("token-{email}"),
        email: Some(email.to_string()),
    }
}

/// Counts writes passed through to a memory store.
#[derive(Debug)]
pub struct RecordingStore {
    inner: MemoryDocumentStore,
    inserts: AtomicUsize,
    deletes: AtomicUsize,
}

impl RecordingStore {
    pub fn new(inner: MemoryDocumentStore) -> Self {
        Self {
            inner,
            inserts: AtomicUsize::new(0),
            deletes: AtomicUsize::new(0),
        }
    }

    pub fn inner(&self) -> &MemoryDocumentStore {
        &self.inner
    }

    pub fn inserts(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }

    pub fn deletes(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DocumentStore for RecordingStore {
    async fn query_eq(&self, collection: &str, field: &str, value: &Value) -> StoreResult<Vec<Document>> {
        self.inner.query_eq(collection, field, value).await
    }

    async fn list(&self, collection: &str) -> StoreResult<Vec<Document>> {
        self.inner.list(collection).await
    }

    async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Document>> {
        self.inner.get(collection, id).await
    }

    async fn insert(&self, collection: &str, fields: Fields) -> StoreResult<String> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        self.inner.insert(collection, fields).await
    }

    async fn set(&self, collection: &str, id: &str, fields: Fields) -> StoreResult<()> {
        self.inner.set(collection, id, fields).await
    }

    async fn delete(&self, collection: &str, id: &str) -> StoreResult<bool> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.inner.delete(collection, id).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn marketplace_fixture_matches_description() {
        let store = marketplace().await;
        assert_eq!(store.len("users").await, 2);
        let b1 = store.get("books", "b1").await.unwrap().unwrap();
        assert_eq!(b1.get("ownerID"), Some(&json!("u2")));
        let b3 = store.get("books", "b3").await.unwrap().unwrap();
        assert!(b3.get("ownerID").is_none());
    }
}
