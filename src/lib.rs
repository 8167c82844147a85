//! # pdf2quiz
//!
//! Backend library that turns an uploaded PDF into a persisted set of
//! multiple-choice questions, plus a stateless chat responder for learners.
//!
//! ## Pipeline
//!
//! ```text
//! request ──▶ validate ──▶ retrieve ──▶ extract ──▶ normalize ──▶ persist
//!             (category,   (object     (structured  (canonical    (batched
//!              source)      store)      output +     documents,    write +
//!                                       fallback)    md5 ids)      read-back)
//! ```
//!
//! Extraction runs against a cost-efficient model first and escalates once
//! to a stronger model only when the first attempt yields zero questions.
//! Question and set ids are content-derived md5 fingerprints, so re-running
//! the same source overwrites its previous documents in place.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use pdf2quiz::{ExtractRequest, ExtractionConfig, QuizBackend};
//! use pdf2quiz::clients::local::{JsonDirStore, LocalObjectStore};
//! use std::sync::Arc;
//!
//! # async fn run() -> Result<(), pdf2quiz::Pdf2QuizError> {
//! let backend = QuizBackend::new(
//!     Arc::new(LocalObjectStore::new("./data")),
//!     Arc::new(JsonDirStore::new("./out")),
//!     ExtractionConfig::default(),
//! );
//!
//! let response = backend
//!     .extract_questions(&ExtractRequest {
//!         source_path: "docs/sample.pdf".into(),
//!         category: "math".into(),
//!     })
//!     .await?;
//! println!("set {} with {} questions", response.question_set_id, response.question_count);
//! # Ok(())
//! # }
//! ```
//!
//! External collaborators (blob store, model providers, document database)
//! sit behind the traits in [`clients`], so embedders and tests supply their
//! own implementations.

pub mod backend;
pub mod chat;
pub mod clients;
pub mod config;
pub mod docs;
pub mod error;
pub mod fingerprint;
pub mod output;
pub mod pipeline;
pub mod prompts;
pub mod schema;

pub use backend::QuizBackend;
pub use config::{ExtractionConfig, ExtractionConfigBuilder};
pub use error::{ErrorKind, ErrorPayload, Pdf2QuizError};
pub use output::{
    ChatRequest, ChatResponse, ChatTurn, ExtractRequest, ExtractResponse, InlineQuestion,
    QuestionSetRecord,
};
