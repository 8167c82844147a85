//! Filesystem-backed stores for the CLI and local runs.
//!
//! [`LocalObjectStore`] reads PDFs from a root directory, so the CLI can run
//! the exact pipeline against files on disk. [`JsonDirStore`] persists one
//! JSON file per document under `<root>/<collection>/<id>.json`, staging
//! every file of a batch to a temp name first and renaming only when all
//! stages succeeded — the same temp-file-then-rename write the deployed
//! store's transactional commit stands in for.

use crate::clients::{DocumentStore, DocumentWrite, ObjectStore};
use crate::error::Pdf2QuizError;
use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Object store rooted at a local directory.
pub struct LocalObjectStore {
    root: PathBuf,
}

impl LocalObjectStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }
}

#[async_trait]
impl ObjectStore for LocalObjectStore {
    async fn exists(&self, path: &str) -> Result<bool, Pdf2QuizError> {
        tokio::fs::try_exists(self.resolve(path))
            .await
            .map_err(|e| Pdf2QuizError::ObjectStoreFailed {
                path: path.to_string(),
                detail: e.to_string(),
            })
    }

    async fn download(&self, path: &str) -> Result<Vec<u8>, Pdf2QuizError> {
        match tokio::fs::read(self.resolve(path)).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(Pdf2QuizError::SourceNotFound {
                    path: path.to_string(),
                })
            }
            Err(e) => Err(Pdf2QuizError::ObjectStoreFailed {
                path: path.to_string(),
                detail: e.to_string(),
            }),
        }
    }
}

/// Document store writing one pretty-printed JSON file per document.
pub struct JsonDirStore {
    root: PathBuf,
}

impl JsonDirStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn doc_path(&self, collection: &str, id: &str) -> PathBuf {
        self.root.join(collection).join(format!("{id}.json"))
    }

    fn store_err(detail: impl std::fmt::Display) -> Pdf2QuizError {
        Pdf2QuizError::StoreFailed {
            detail: detail.to_string(),
        }
    }

    async fn stage_one(
        &self,
        write: &DocumentWrite,
        now: &str,
    ) -> Result<(PathBuf, PathBuf), Pdf2QuizError> {
        let final_path = self.doc_path(&write.collection, &write.id);
        if let Some(parent) = final_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(Self::store_err)?;
        }

        let mut data = write.data.clone();
        if let Some(obj) = data.as_object_mut() {
            obj.insert("created_at".to_string(), Value::String(now.to_string()));
            obj.insert("updated_at".to_string(), Value::String(now.to_string()));
        }
        let body = serde_json::to_vec_pretty(&data).map_err(Self::store_err)?;

        let tmp_path = final_path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, body)
            .await
            .map_err(Self::store_err)?;
        Ok((tmp_path, final_path))
    }

    async fn discard(staged: &[(PathBuf, PathBuf)]) {
        for (tmp, _) in staged {
            let _ = tokio::fs::remove_file(tmp).await;
        }
    }
}

#[async_trait]
impl DocumentStore for JsonDirStore {
    async fn commit_batch(&self, writes: Vec<DocumentWrite>) -> Result<(), Pdf2QuizError> {
        let now = Utc::now().to_rfc3339();
        let mut staged: Vec<(PathBuf, PathBuf)> = Vec::with_capacity(writes.len());

        // Stage everything before renaming anything; one bad write aborts
        // the batch with no document replaced.
        for write in &writes {
            match self.stage_one(write, &now).await {
                Ok(pair) => staged.push(pair),
                Err(e) => {
                    Self::discard(&staged).await;
                    return Err(e);
                }
            }
        }

        for (tmp, final_path) in &staged {
            if let Err(e) = tokio::fs::rename(tmp, final_path).await {
                Self::discard(&staged).await;
                return Err(Self::store_err(e));
            }
        }

        debug!("committed {} documents under {}", staged.len(), self.root.display());
        Ok(())
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>, Pdf2QuizError> {
        match tokio::fs::read(self.doc_path(collection, id)).await {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map(Some)
                .map_err(Self::store_err),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Self::store_err(e)),
        }
    }
}
