//! Document store capability for Bookswap.
//!
//! A document store holds named collections of schemaless JSON records. The
//! application only ever needs equality queries, full scans, point reads,
//! inserts with store-assigned ids, writes under caller-chosen ids, and
//! deletes, so that is the whole surface of [`DocumentStore`].

use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

pub mod fixture;
pub mod memory;

pub use fixture::Fixture;
pub use memory::MemoryDocumentStore;

/// Field map of a single record.
pub type Fields = Map<String, Value>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid collection name '{0}'")]
    InvalidCollection(String),

    #[error("record must serialize to a JSON object")]
    NotAnObject,

    #[error("failed to encode record: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("document '{collection}/{id}' could not be decoded: {source}")]
    Decode {
        collection: String,
        id: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read fixture '{path}': {source}")]
    FixtureIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed fixture: {0}")]
    FixtureFormat(String),

    #[error("store backend failure: {0}")]
    Backend(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// A record read back from a collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub collection: String,
    pub id: String,
    pub fields: Fields,
}

impl Document {
    pub fn new(collection: impl Into<String>, id: impl Into<String>, fields: Fields) -> Self {
        Self {
            collection: collection.into(),
            id: id.into(),
            fields,
        }
    }

    /// Value of a top-level field, if present.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Decode the record into `T`, exposing the document id as an `id` field.
    ///
    /// A stored `id` field takes precedence over the document id.
    pub fn decode<T: DeserializeOwned>(&self) -> StoreResult<T> {
        let mut fields = self.fields.clone();
        fields
            .entry("id")
            .or_insert_with(|| Value::String(self.id.clone()));

        serde_json::from_value(Value::Object(fields)).map_err(|source| StoreError::Decode {
            collection: self.collection.clone(),
            id: self.id.clone(),
            source,
        })
    }
}

/// Serialize a record into the field map stored for it.
pub fn to_fields<T: Serialize>(record: &T) -> StoreResult<Fields> {
    match serde_json::to_value(record).map_err(StoreError::Encode)? {
        Value::Object(fields) => Ok(fields),
        _ => Err(StoreError::NotAnObject),
    }
}

/// Validate a collection name before touching the backend.
pub fn check_collection(collection: &str) -> StoreResult<()> {
    if collection.is_empty() || collection.contains('/') {
        return Err(StoreError::InvalidCollection(collection.to_string()));
    }
    Ok(())
}

/// Storage operations the marketplace relies on.
///
/// Result ordering is backend-defined; callers must not depend on it.
#[async_trait]
pub trait DocumentStore: Debug + Send + Sync {
    /// Records of `collection` whose `field` equals `value`.
    ///
    /// Records that lack the field never match, not even a `null` query.
    async fn query_eq(&self, collection: &str, field: &str, value: &Value)
        -> StoreResult<Vec<Document>>;

    /// Every record of `collection`.
    async fn list(&self, collection: &str) -> StoreResult<Vec<Document>>;

    async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Document>>;

    /// Insert a record and return the id the store assigned to it.
    async fn insert(&self, collection: &str, fields: Fields) -> StoreResult<String>;

    /// Create or overwrite the record stored under `id`.
    async fn set(&self, collection: &str, id: &str, fields: Fields) -> StoreResult<()>;

    /// Remove the record stored under `id`. Returns whether it existed.
    async fn delete(&self, collection: &str, id: &str) -> StoreResult<bool>;
}

/// Shared handle to a document store.
pub type DocumentStoreArc = Arc<dyn DocumentStore>;

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Named {
        id: String,
        name: String,
    }

    fn fields(value: Value) -> Fields {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn decode_exposes_document_id() {
        let doc = Document::new("things", "t1", fields(json!({"name": "lamp"})));
        let named: Named = doc.decode().unwrap();
        assert_eq!(
            named,
            Named {
                id: "t1".into(),
                name: "lamp".into()
            }
        );
    }

    #[test]
    fn decode_keeps_stored_id_field() {
        let doc = Document::new("things", "t1", fields(json!({"id": "x", "name": "lamp"})));
        let named: Named = doc.decode().unwrap();
        assert_eq!(named.id, "x");
    }

    #[test]
    fn decode_failure_names_the_document() {
        let doc = Document::new("things", "t9", fields(json!({"name": 4})));
        let err = doc.decode::<Named>().unwrap_err();
        assert!(err.to_string().contains("things/t9"));
    }

    #[test]
    fn to_fields_rejects_scalars() {
        assert!(matches!(to_fields(&3), Err(StoreError::NotAnObject)));
        assert_eq!(to_fields(&json!({"a": 1})).unwrap()["a"], json!(1));
    }

    #[test]
    fn collection_names_are_validated() {
        assert!(check_collection("books").is_ok());
        assert!(check_collection("").is_err());
        assert!(check_collection("books/b1").is_err());
    }
}
