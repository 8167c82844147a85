//! In-memory stores.
//!
//! These back the test suite and doc examples, and double as a reference
//! implementation of the store contracts: the object store's precise
//! exists/download split, and the document store's all-or-nothing batch with
//! server-assigned RFC 3339 timestamps.

use crate::clients::{DocumentStore, DocumentWrite, ObjectStore};
use crate::error::Pdf2QuizError;
use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;

/// Object store over a `HashMap`.
#[derive(Default)]
pub struct MemoryObjectStore {
    objects: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an object.
    pub fn insert(&self, path: impl Into<String>, bytes: Vec<u8>) {
        self.objects.lock().unwrap().insert(path.into(), bytes);
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn exists(&self, path: &str) -> Result<bool, Pdf2QuizError> {
        Ok(self.objects.lock().unwrap().contains_key(path))
    }

    async fn download(&self, path: &str) -> Result<Vec<u8>, Pdf2QuizError> {
        self.objects
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| Pdf2QuizError::SourceNotFound {
                path: path.to_string(),
            })
    }
}

/// Document store over a `HashMap`, keyed by `(collection, id)`.
///
/// The whole batch is applied under one lock, so a batch is atomic with
/// respect to concurrent readers and other batches. Writes are
/// last-write-wins: a re-run replaces the previous document including its
/// timestamps, matching set (not merge) semantics.
#[derive(Default)]
pub struct MemoryDocumentStore {
    documents: Mutex<HashMap<(String, String), Value>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents currently in `collection`.
    pub fn count(&self, collection: &str) -> usize {
        self.documents
            .lock()
            .unwrap()
            .keys()
            .filter(|(c, _)| c == collection)
            .count()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn commit_batch(&self, writes: Vec<DocumentWrite>) -> Result<(), Pdf2QuizError> {
        let now = Utc::now().to_rfc3339();
        let mut documents = self.documents.lock().unwrap();
        for write in writes {
            let mut data = write.data;
            if let Some(obj) = data.as_object_mut() {
                obj.insert("created_at".to_string(), Value::String(now.clone()));
                obj.insert("updated_at".to_string(), Value::String(now.clone()));
            }
            documents.insert((write.collection, write.id), data);
        }
        Ok(())
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>, Pdf2QuizError> {
        Ok(self
            .documents
            .lock()
            .unwrap()
            .get(&(collection.to_string(), id.to_string()))
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn object_store_distinguishes_missing_from_present() {
        let store = MemoryObjectStore::new();
        store.insert("docs/sample.pdf", b"%PDF-1.4".to_vec());

        assert!(store.exists("docs/sample.pdf").await.unwrap());
        assert!(!store.exists("docs/other.pdf").await.unwrap());
        assert_eq!(store.download("docs/sample.pdf").await.unwrap(), b"%PDF-1.4");
        assert!(matches!(
            store.download("docs/other.pdf").await,
            Err(Pdf2QuizError::SourceNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn batch_commit_stamps_timestamps() {
        let store = MemoryDocumentStore::new();
        store
            .commit_batch(vec![DocumentWrite::new(
                "questions",
                "0c1410da",
                json!({ "stem": "What is 2 + 2?" }),
            )])
            .await
            .unwrap();

        let doc = store.get("questions", "0c1410da").await.unwrap().unwrap();
        assert_eq!(doc["stem"], "What is 2 + 2?");
        assert!(doc["created_at"].is_string());
        assert!(doc["updated_at"].is_string());
    }

    #[tokio::test]
    async fn rewrite_replaces_whole_document() {
        let store = MemoryDocumentStore::new();
        store
            .commit_batch(vec![DocumentWrite::new(
                "question_sets",
                "00de54afd55b",
                json!({ "question_count": 3, "leftover": true }),
            )])
            .await
            .unwrap();
        store
            .commit_batch(vec![DocumentWrite::new(
                "question_sets",
                "00de54afd55b",
                json!({ "question_count": 1 }),
            )])
            .await
            .unwrap();

        let doc = store.get("question_sets", "00de54afd55b").await.unwrap().unwrap();
        assert_eq!(doc["question_count"], 1);
        assert!(doc.get("leftover").is_none());
        assert_eq!(store.count("question_sets"), 1);
    }
}
