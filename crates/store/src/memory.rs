use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{check_collection, Document, DocumentStore, Fields, Fixture, StoreResult};

type Collection = BTreeMap<String, Fields>;

/// In-memory implementation of the document store.
///
/// Records within a collection are returned in id order.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    collections: RwLock<HashMap<String, Collection>>,
}

impl MemoryDocumentStore {
    /// Creates a new empty memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a memory store pre-populated from a fixture.
    pub fn with_fixture(fixture: Fixture) -> Self {
        let collections = fixture
            .into_collections()
            .into_iter()
            .map(|(name, records)| (name, records.into_iter().collect()))
            .collect();

        Self {
            collections: RwLock::new(collections),
        }
    }

    /// Number of records currently held in `collection`.
    pub async fn len(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map_or(0, BTreeMap::len)
    }

    fn next_id() -> String {
        Uuid::now_v7().simple().to_string()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn query_eq(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> StoreResult<Vec<Document>> {
        check_collection(collection)?;
        let collections = self.collections.read().await;

        Ok(collections
            .get(collection)
            .into_iter()
            .flatten()
            .filter(|(_, fields)| fields.get(field) == Some(value))
            .map(|(id, fields)| Document::new(collection, id, fields.clone()))
            .collect())
    }

    async fn list(&self, collection: &str) -> StoreResult<Vec<Document>> {
        check_collection(collection)?;
        let collections = self.collections.read().await;

        Ok(collections
            .get(collection)
            .into_iter()
            .flatten()
            .map(|(id, fields)| Document::new(collection, id, fields.clone()))
            .collect())
    }

    async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Document>> {
        check_collection(collection)?;
        let collections = self.collections.read().await;

        Ok(collections
            .get(collection)
            .and_then(|records| records.get(id))
            .map(|fields| Document::new(collection, id, fields.clone())))
    }

    async fn insert(&self, collection: &str, fields: Fields) -> StoreResult<String> {
        check_collection(collection)?;
        let id = Self::next_id();

        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .insert(id.clone(), fields);

        tracing::debug!(collection, id = %id, "document inserted");
        Ok(id)
    }

    async fn set(&self, collection: &str, id: &str, fields: Fields) -> StoreResult<()> {
        check_collection(collection)?;

        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), fields);

        tracing::debug!(collection, id, "document written");
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> StoreResult<bool> {
        check_collection(collection)?;

        let removed = self
            .collections
            .write()
            .await
            .get_mut(collection)
            .and_then(|records| records.remove(id))
            .is_some();

        tracing::debug!(collection, id, removed, "document delete");
        Ok(removed)
    }
}
