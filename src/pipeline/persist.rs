//! Batched persistence and read-back.
//!
//! One document per question plus one set document, committed as a single
//! all-or-nothing batch. Question documents are keyed by stem fingerprint
//! and the set by source-path fingerprint, so a re-run of the same source
//! overwrites its previous set and questions in place. Question documents
//! orphaned by a smaller re-run are deliberately left behind — they may be
//! members of other sets.
//!
//! After commit the set is read back; a missing read-back yields a `None`
//! record while the call still reports success with the ids it wrote.

use crate::clients::{DocumentStore, DocumentWrite};
use crate::config::ExtractionConfig;
use crate::docs::{
    QuestionSetDoc, SetProvenance, QUESTIONS_COLLECTION, QUESTION_SETS_COLLECTION,
};
use crate::error::Pdf2QuizError;
use crate::fingerprint;
use crate::output::QuestionSetRecord;
use crate::pipeline::normalize::NormalizedQuestion;
use crate::pipeline::retrieve::source_filename;
use serde_json::Value;
use tracing::{info, warn};

/// Outcome of the persistence stage.
pub struct PersistedSet {
    pub set_id: String,
    pub question_ids: Vec<String>,
    /// The set as read back after commit, if the read-back found it.
    pub record: Option<QuestionSetRecord>,
}

/// Commit the normalized batch and its owning set, then read the set back.
pub async fn persist_batch(
    store: &dyn DocumentStore,
    questions: &[NormalizedQuestion],
    category: &str,
    source_path: &str,
    config: &ExtractionConfig,
) -> Result<PersistedSet, Pdf2QuizError> {
    let set_id = fingerprint::question_set_id(source_path);
    let question_ids: Vec<String> = questions.iter().map(|q| q.id.clone()).collect();

    let mut writes: Vec<DocumentWrite> = Vec::with_capacity(questions.len() + 1);
    for question in questions {
        let data = serde_json::to_value(&question.doc)
            .map_err(|e| Pdf2QuizError::Internal(format!("question serialization: {e}")))?;
        writes.push(DocumentWrite::new(QUESTIONS_COLLECTION, &question.id, data));
    }

    let set_doc = QuestionSetDoc {
        name: format!("Questions from {}", source_filename(source_path)),
        category: category.to_string(),
        question_ids: question_ids.clone(),
        question_count: question_ids.len(),
        source: SetProvenance {
            pdf_path: source_path.to_string(),
            extraction_method: config.extraction_method.clone(),
        },
    };
    let set_data = serde_json::to_value(&set_doc)
        .map_err(|e| Pdf2QuizError::Internal(format!("set serialization: {e}")))?;
    writes.push(DocumentWrite::new(QUESTION_SETS_COLLECTION, &set_id, set_data));

    store.commit_batch(writes).await?;
    info!(
        "committed set {} with {} questions",
        set_id,
        question_ids.len()
    );

    let record = match store.get(QUESTION_SETS_COLLECTION, &set_id).await? {
        Some(value) => Some(read_back_record(&set_id, value)?),
        None => {
            warn!("set {} not found on read-back", set_id);
            None
        }
    };

    Ok(PersistedSet {
        set_id,
        question_ids,
        record,
    })
}

/// Turn the read-back document into the caller-facing record, attaching the
/// id and lifting the server timestamps.
fn read_back_record(set_id: &str, value: Value) -> Result<QuestionSetRecord, Pdf2QuizError> {
    let created_at = value
        .get("created_at")
        .and_then(Value::as_str)
        .map(str::to_string);
    let updated_at = value
        .get("updated_at")
        .and_then(Value::as_str)
        .map(str::to_string);
    let doc: QuestionSetDoc = serde_json::from_value(value)
        .map_err(|e| Pdf2QuizError::StoreFailed {
            detail: format!("set {set_id} read back in unexpected shape: {e}"),
        })?;

    Ok(QuestionSetRecord {
        id: set_id.to_string(),
        name: doc.name,
        category: doc.category,
        question_ids: doc.question_ids,
        question_count: doc.question_count,
        source: doc.source,
        created_at,
        updated_at,
    })
}
