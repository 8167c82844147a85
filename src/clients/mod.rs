//! Client seams for the four external collaborators.
//!
//! The deployed system talks to a blob store, two model providers, and a
//! document database. Each is reached through an object-safe trait so the
//! handles are explicitly constructed and injectable — production wiring,
//! the CLI, and the test suite all substitute their own implementations
//! without touching pipeline code.
//!
//! | Trait | Production impl | Local/test impl |
//! |-------|-----------------|-----------------|
//! | [`ObjectStore`]     | deployment blob store (external glue) | [`local::LocalObjectStore`], [`memory::MemoryObjectStore`] |
//! | [`ExtractionModel`] | [`openai::OpenAiClient`]              | test double |
//! | [`ChatModel`]       | [`gemini::GeminiClient`]              | test double |
//! | [`DocumentStore`]   | deployment document DB (external glue) | [`local::JsonDirStore`], [`memory::MemoryDocumentStore`] |

pub mod gemini;
pub mod local;
pub mod memory;
pub mod openai;

use crate::error::Pdf2QuizError;
use crate::schema::ExtractedBatch;
use async_trait::async_trait;
use serde_json::Value;

/// Opaque reference to a file uploaded to a model provider's file store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRef(pub String);

/// Read-only access to the blob store holding uploaded PDFs.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Whether an object exists at `path`. Checked before [`download`]
    /// so a missing object produces a precise not-found error instead of a
    /// generic transport failure.
    ///
    /// [`download`]: ObjectStore::download
    async fn exists(&self, path: &str) -> Result<bool, Pdf2QuizError>;

    /// Raw bytes of the object at `path`.
    async fn download(&self, path: &str) -> Result<Vec<u8>, Pdf2QuizError>;
}

/// A provider that accepts an uploaded PDF and returns a schema-constrained
/// question batch.
///
/// Upload and extraction are separate so the fallback escalation can reuse
/// one uploaded file across both model tiers.
#[async_trait]
pub trait ExtractionModel: Send + Sync {
    /// Upload raw PDF bytes to the provider's file store.
    async fn upload_file(
        &self,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<FileRef, Pdf2QuizError>;

    /// Run one structured-output extraction against `model`.
    ///
    /// `schema` is the JSON schema the output must conform to; a response
    /// that fails to parse into [`ExtractedBatch`] is a
    /// [`Pdf2QuizError::SchemaViolation`]. Transport/API failures are
    /// [`Pdf2QuizError::ModelCallFailed`] and are never retried here.
    async fn extract(
        &self,
        file: &FileRef,
        model: &str,
        system_prompt: &str,
        schema: &Value,
    ) -> Result<ExtractedBatch, Pdf2QuizError>;
}

/// A conversational model for the stateless chat responder.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Single-turn exchange: persona instruction + one user message.
    /// Returns the model's text verbatim.
    async fn respond(
        &self,
        model: &str,
        system_prompt: &str,
        message: &str,
        temperature: f32,
    ) -> Result<String, Pdf2QuizError>;
}

/// One document in a batched write.
#[derive(Debug, Clone)]
pub struct DocumentWrite {
    pub collection: String,
    pub id: String,
    pub data: Value,
}

impl DocumentWrite {
    pub fn new(collection: impl Into<String>, id: impl Into<String>, data: Value) -> Self {
        Self {
            collection: collection.into(),
            id: id.into(),
            data,
        }
    }
}

/// The document database.
///
/// Implementations must make [`commit_batch`] all-or-nothing: either every
/// write in the batch lands or none do. Writes are last-write-wins on id
/// collision (set semantics, no merge). At commit, implementations assign
/// `created_at` and `updated_at` server timestamps to each document as
/// RFC 3339 strings so read-back is already serializable text.
///
/// No isolation is promised against a concurrent invocation writing the same
/// ids; last writer wins and no locking or versioning exists.
///
/// [`commit_batch`]: DocumentStore::commit_batch
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Atomically commit every write in the batch.
    async fn commit_batch(&self, writes: Vec<DocumentWrite>) -> Result<(), Pdf2QuizError>;

    /// Fetch one document by collection and id.
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>, Pdf2QuizError>;
}
