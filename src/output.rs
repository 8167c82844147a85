//! Response envelopes for the two entry points.
//!
//! Every payload is plain serde data: a success flag plus result fields on
//! the happy path, or the typed [`crate::error::ErrorPayload`] otherwise.
//! Server-assigned timestamps appear only on the read-back set record,
//! already converted to RFC 3339 text by the document store.

use crate::docs::{QuestionDoc, SetProvenance};
use serde::{Deserialize, Serialize};

/// Extraction request payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractRequest {
    /// Object-store path of the uploaded PDF.
    #[serde(default)]
    pub source_path: String,
    /// Target category; must belong to the deployment's category set.
    #[serde(default)]
    pub category: String,
}

/// One question as returned inline to the caller: the persisted document
/// body plus its id, without the server timestamp fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InlineQuestion {
    pub id: String,
    #[serde(flatten)]
    pub doc: QuestionDoc,
}

/// The question-set document as read back after commit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionSetRecord {
    pub id: String,
    pub name: String,
    pub category: String,
    pub question_ids: Vec<String>,
    pub question_count: usize,
    pub source: SetProvenance,
    /// Server-assigned, RFC 3339.
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Successful extraction response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractResponse {
    pub success: bool,
    pub question_set_id: String,
    pub question_ids: Vec<String>,
    pub question_count: usize,
    pub category: String,
    /// The set as read back after commit; `None` when the read-back
    /// unexpectedly found no document (the call still succeeded).
    pub question_set: Option<QuestionSetRecord>,
    pub questions_inline: Vec<InlineQuestion>,
}

/// One prior turn of a chat conversation.
///
/// Accepted for forward compatibility but not incorporated into the model
/// call — the chat endpoint is stateless per call. This is a documented
/// limitation, not a bug to silently fix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub text: String,
}

/// Chat request payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    /// Optional context label; defaults to the configured generic value.
    #[serde(default)]
    pub category: Option<String>,
    /// Ignored (see [`ChatTurn`]).
    #[serde(default)]
    pub history: Option<Vec<ChatTurn>>,
}

/// Successful chat response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub success: bool,
    pub response: String,
}
