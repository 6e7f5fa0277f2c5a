//! JSON fixtures used to seed the in-memory store.
//!
//! A fixture is an object mapping collection names to arrays of records.
//! Every record carries its document id in a string `id` field, which is
//! split off from the stored fields.

use std::collections::BTreeMap;
use std::path::Path;

use serde_json::Value;

use crate::{check_collection, Fields, StoreError, StoreResult};

#[derive(Debug, Clone, Default)]
pub struct Fixture {
    collections: BTreeMap<String, Vec<(String, Fields)>>,
}

impl Fixture {
    /// Read and parse a fixture file.
    pub fn load(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| StoreError::FixtureIo {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&raw)
    }

    pub fn parse(raw: &str) -> StoreResult<Self> {
        let value: Value =
            serde_json::from_str(raw).map_err(|err| StoreError::FixtureFormat(err.to_string()))?;
        let Value::Object(root) = value else {
            return Err(StoreError::FixtureFormat(
                "top level must be an object of collections".into(),
            ));
        };

        let mut collections = BTreeMap::new();
        for (name, records) in root {
            check_collection(&name)?;
            let Value::Array(records) = records else {
                return Err(StoreError::FixtureFormat(format!(
                    "collection '{name}' must be an array"
                )));
            };

            let mut parsed = Vec::with_capacity(records.len());
            for (index, record) in records.into_iter().enumerate() {
                let Value::Object(mut fields) = record else {
                    return Err(StoreError::FixtureFormat(format!(
                        "{name}[{index}] must be an object"
                    )));
                };
                let id = match fields.remove("id") {
                    Some(Value::String(id)) if !id.is_empty() => id,
                    _ => {
                        return Err(StoreError::FixtureFormat(format!(
                            "{name}[{index}] is missing a string id"
                        )))
                    }
                };
                parsed.push((id, fields));
            }
            collections.insert(name, parsed);
        }

        Ok(Self { collections })
    }

    /// Record count per collection.
    pub fn summary(&self) -> BTreeMap<&str, usize> {
        self.collections
            .iter()
            .map(|(name, records)| (name.as_str(), records.len()))
            .collect()
    }

    pub fn into_collections(self) -> BTreeMap<String, Vec<(String, Fields)>> {
        self.collections
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DocumentStore, MemoryDocumentStore};

    const BOOKS: &str = r#"{
        "books": [
            {"id": "b1", "title": "Dune", "price": 120, "ownerID": "u2"},
            {"id": "b2", "title": "Emma", "price": 80, "ownerID": "u1"}
        ],
        "users": []
    }"#;

    #[test]
    fn parse_counts_records() {
        let fixture = Fixture::parse(BOOKS).unwrap();
        let summary = fixture.summary();
        assert_eq!(summary["books"], 2);
        assert_eq!(summary["users"], 0);
    }

    #[test]
    fn records_without_id_are_rejected() {
        let err = Fixture::parse(r#"{"books": [{"title": "x"}]}"#).unwrap_err();
        assert!(err.to_string().contains("books[0]"));
    }

    #[test]
    fn non_object_root_is_rejected() {
        assert!(Fixture::parse("[]").is_err());
        assert!(Fixture::parse(r#"{"books": {}}"#).is_err());
    }

    #[test]
    fn missing_file_reports_path() {
        let err = Fixture::load("/nonexistent/bookswap.json").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/bookswap.json"));
    }

    #[tokio::test]
    async fn seeds_memory_store_without_id_field() {
        let store = MemoryDocumentStore::with_fixture(Fixture::parse(BOOKS).unwrap());
        let doc = store.get("books", "b1").await.unwrap().unwrap();
        assert!(doc.get("id").is_none());
        assert_eq!(doc.get("ownerID"), Some(&Value::from("u2")));
    }
}
