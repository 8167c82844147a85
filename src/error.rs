//! Error types for the pdf2quiz library.
//!
//! Every failure the pipeline can produce is a variant of [`Pdf2QuizError`],
//! and every variant maps onto exactly one of the four caller-facing kinds in
//! [`ErrorKind`]:
//!
//! * `invalid-argument` — the caller supplied bad input (missing source path,
//!   unknown category, empty chat message). Never retried.
//! * `not-found` — the referenced source object does not exist.
//! * `failed-precondition` — a required external capability is unavailable
//!   (no extraction or chat provider configured).
//! * `internal` — everything else: provider/transport failures, schema
//!   violations in model output, document-store write failures.
//!
//! The split keeps the library's variants precise (each carries the fields a
//! log line needs) while the envelope returned to callers stays a stable
//! machine-readable `{ kind, message }` pair via [`Pdf2QuizError::to_payload`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// All errors returned by the pdf2quiz library.
#[derive(Debug, Error)]
pub enum Pdf2QuizError {
    // ── Request validation ────────────────────────────────────────────────
    /// The extraction request had no source path.
    #[error("source_path is required")]
    MissingSourcePath,

    /// The requested category is not in the deployment's category set.
    #[error("category must be one of [{allowed}], got '{category}'")]
    UnknownCategory { category: String, allowed: String },

    /// The chat request had an empty message.
    #[error("message must not be empty")]
    EmptyMessage,

    // ── Object store ──────────────────────────────────────────────────────
    /// The referenced source object does not exist in the object store.
    #[error("file not found at '{path}'")]
    SourceNotFound { path: String },

    /// The object store failed while checking or downloading an object.
    #[error("object store error for '{path}': {detail}")]
    ObjectStoreFailed { path: String, detail: String },

    // ── Providers ─────────────────────────────────────────────────────────
    /// No extraction provider is injected and none could be built from the
    /// environment.
    #[error("extraction provider is not configured.\n{hint}")]
    ExtractionNotConfigured { hint: String },

    /// No chat provider is injected and none could be built from the
    /// environment.
    #[error("chat provider is not configured.\n{hint}")]
    ChatNotConfigured { hint: String },

    /// Uploading the PDF to the provider's file store failed.
    #[error("file upload to provider failed: {detail}")]
    UploadFailed { detail: String },

    /// A model API call failed at the transport or API level. Not retried —
    /// only an empty extraction result triggers the model-tier escalation.
    #[error("model '{model}' call failed: {detail}")]
    ModelCallFailed { model: String, detail: String },

    /// The model returned output that violates the declared schema contract
    /// (wrong option count, correct label matching no option, unparseable
    /// JSON). Always an internal error: the schema is validated at the
    /// normalization boundary rather than silently coerced.
    #[error("model output violates the question schema: {detail}")]
    SchemaViolation { detail: String },

    // ── Document store ────────────────────────────────────────────────────
    /// The batched write (or the read-back) against the document store
    /// failed. The batch is all-or-nothing, so nothing was persisted.
    #[error("document store error: {detail}")]
    StoreFailed { detail: String },

    // ── Config ────────────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Machine-readable error kind reported in the response envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorKind {
    InvalidArgument,
    NotFound,
    FailedPrecondition,
    Internal,
}

impl ErrorKind {
    /// The wire name of the kind, e.g. `"invalid-argument"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidArgument => "invalid-argument",
            ErrorKind::NotFound => "not-found",
            ErrorKind::FailedPrecondition => "failed-precondition",
            ErrorKind::Internal => "internal",
        }
    }
}

/// The typed error payload returned to callers: a stable kind plus a human
/// message. Internal detail beyond the original error text is not leaked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub kind: ErrorKind,
    pub message: String,
}

impl Pdf2QuizError {
    /// Map this error onto the caller-facing taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Pdf2QuizError::MissingSourcePath
            | Pdf2QuizError::UnknownCategory { .. }
            | Pdf2QuizError::EmptyMessage => ErrorKind::InvalidArgument,
            Pdf2QuizError::SourceNotFound { .. } => ErrorKind::NotFound,
            Pdf2QuizError::ExtractionNotConfigured { .. }
            | Pdf2QuizError::ChatNotConfigured { .. } => ErrorKind::FailedPrecondition,
            Pdf2QuizError::ObjectStoreFailed { .. }
            | Pdf2QuizError::UploadFailed { .. }
            | Pdf2QuizError::ModelCallFailed { .. }
            | Pdf2QuizError::SchemaViolation { .. }
            | Pdf2QuizError::StoreFailed { .. }
            | Pdf2QuizError::InvalidConfig(_)
            | Pdf2QuizError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Convert into the serializable envelope error.
    pub fn to_payload(&self) -> ErrorPayload {
        ErrorPayload {
            kind: self.kind(),
            message: self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_are_invalid_argument() {
        assert_eq!(
            Pdf2QuizError::MissingSourcePath.kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(Pdf2QuizError::EmptyMessage.kind(), ErrorKind::InvalidArgument);
        let e = Pdf2QuizError::UnknownCategory {
            category: "history".into(),
            allowed: "reading, math, finance".into(),
        };
        assert_eq!(e.kind(), ErrorKind::InvalidArgument);
        assert!(e.to_string().contains("history"));
        assert!(e.to_string().contains("finance"));
    }

    #[test]
    fn missing_source_is_not_found() {
        let e = Pdf2QuizError::SourceNotFound {
            path: "docs/sample.pdf".into(),
        };
        assert_eq!(e.kind(), ErrorKind::NotFound);
        assert!(e.to_string().contains("docs/sample.pdf"));
    }

    #[test]
    fn unconfigured_providers_are_failed_precondition() {
        let e = Pdf2QuizError::ChatNotConfigured {
            hint: "set GEMINI_API_KEY".into(),
        };
        assert_eq!(e.kind(), ErrorKind::FailedPrecondition);
    }

    #[test]
    fn schema_violation_is_internal() {
        let e = Pdf2QuizError::SchemaViolation {
            detail: "correct_label 'E' matches no option".into(),
        };
        assert_eq!(e.kind(), ErrorKind::Internal);
    }

    #[test]
    fn payload_kind_serializes_kebab_case() {
        let payload = Pdf2QuizError::MissingSourcePath.to_payload();
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["kind"], "invalid-argument");
        assert_eq!(ErrorKind::NotFound.as_str(), "not-found");
    }
}
