//! The two callable entry points, wired over injectable collaborators.
//!
//! [`QuizBackend`] owns the object-store and document-store handles plus the
//! configuration, and exposes [`extract_questions`] and
//! [`chat_with_assistant`]. Model providers are resolved per call: a
//! pre-built handle from the config wins, otherwise a client is constructed
//! from the environment. Every failure is logged here with its payload kind
//! before propagating, so the embedding runtime only has to serialize it.
//!
//! [`extract_questions`]: QuizBackend::extract_questions
//! [`chat_with_assistant`]: QuizBackend::chat_with_assistant

use crate::chat;
use crate::clients::gemini::GeminiClient;
use crate::clients::openai::OpenAiClient;
use crate::clients::{ChatModel, DocumentStore, ExtractionModel, ObjectStore};
use crate::config::ExtractionConfig;
use crate::error::Pdf2QuizError;
use crate::output::{
    ChatRequest, ChatResponse, ExtractRequest, ExtractResponse, InlineQuestion,
};
use crate::pipeline::{extract, normalize, persist, retrieve, validate};
use std::sync::Arc;
use tracing::{error, info};

/// Backend facade over the extraction pipeline and the chat responder.
pub struct QuizBackend {
    object_store: Arc<dyn ObjectStore>,
    documents: Arc<dyn DocumentStore>,
    config: ExtractionConfig,
}

impl QuizBackend {
    pub fn new(
        object_store: Arc<dyn ObjectStore>,
        documents: Arc<dyn DocumentStore>,
        config: ExtractionConfig,
    ) -> Self {
        Self {
            object_store,
            documents,
            config,
        }
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Extract questions from the referenced PDF and persist them.
    ///
    /// Runs the five stages in order: validate, retrieve, extract (with the
    /// single fallback escalation), normalize, persist. Zero extracted
    /// questions is a success with `question_count` 0, not an error.
    pub async fn extract_questions(
        &self,
        request: &ExtractRequest,
    ) -> Result<ExtractResponse, Pdf2QuizError> {
        match self.run_extraction(request).await {
            Ok(response) => Ok(response),
            Err(err) => {
                error!(
                    kind = err.kind().as_str(),
                    "extraction of '{}' failed: {err}", request.source_path
                );
                Err(err)
            }
        }
    }

    async fn run_extraction(
        &self,
        request: &ExtractRequest,
    ) -> Result<ExtractResponse, Pdf2QuizError> {
        let category =
            validate::validate_request(&request.source_path, &request.category, &self.config)?;
        info!(
            "extracting from '{}' into category '{}'",
            request.source_path, category
        );

        let pdf_bytes = retrieve::fetch_source(self.object_store.as_ref(), &request.source_path)
            .await?;

        let provider = self.resolve_extraction_model()?;
        let extraction = extract::invoke_with_fallback(
            provider.as_ref(),
            retrieve::source_filename(&request.source_path),
            pdf_bytes,
            category,
            &self.config,
        )
        .await?;

        let normalized = normalize::normalize_batch(
            &extraction.batch.questions,
            category,
            &request.source_path,
            &extraction.model,
            &self.config,
        )?;

        let persisted = persist::persist_batch(
            self.documents.as_ref(),
            &normalized,
            category,
            &request.source_path,
            &self.config,
        )
        .await?;

        info!(
            "extraction complete: set {} with {} questions",
            persisted.set_id,
            persisted.question_ids.len()
        );

        Ok(ExtractResponse {
            success: true,
            question_set_id: persisted.set_id,
            question_count: persisted.question_ids.len(),
            question_ids: persisted.question_ids,
            category: category.to_string(),
            question_set: persisted.record,
            questions_inline: normalized
                .into_iter()
                .map(|q| InlineQuestion { id: q.id, doc: q.doc })
                .collect(),
        })
    }

    /// Answer one chat message. Stateless: no persistence, no history.
    pub async fn chat_with_assistant(
        &self,
        request: &ChatRequest,
    ) -> Result<ChatResponse, Pdf2QuizError> {
        let provider = match self.resolve_chat_model() {
            Ok(p) => p,
            Err(err) => {
                error!(kind = err.kind().as_str(), "chat provider unavailable: {err}");
                return Err(err);
            }
        };

        match chat::respond(provider.as_ref(), request, &self.config).await {
            Ok(response) => Ok(response),
            Err(err) => {
                error!(kind = err.kind().as_str(), "chat failed: {err}");
                Err(err)
            }
        }
    }

    /// Injected handle first, environment second.
    fn resolve_extraction_model(&self) -> Result<Arc<dyn ExtractionModel>, Pdf2QuizError> {
        if let Some(model) = &self.config.extraction_model {
            return Ok(Arc::clone(model));
        }
        let client = OpenAiClient::from_env(self.config.api_timeout_secs)?;
        Ok(Arc::new(client))
    }

    fn resolve_chat_model(&self) -> Result<Arc<dyn ChatModel>, Pdf2QuizError> {
        if let Some(model) = &self.config.chat_model {
            return Ok(Arc::clone(model));
        }
        let client = GeminiClient::from_env(self.config.api_timeout_secs)?;
        Ok(Arc::new(client))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::memory::{MemoryDocumentStore, MemoryObjectStore};
    use crate::clients::FileRef;
    use crate::error::ErrorKind;
    use crate::schema::{
        Difficulty, ExtractedBatch, ExtractedOption, ExtractedQuestion, OptionLabel,
    };
    use async_trait::async_trait;
    use serde_json::Value;

    struct CannedModel {
        batch: ExtractedBatch,
    }

    #[async_trait]
    impl ExtractionModel for CannedModel {
        async fn upload_file(
            &self,
            _filename: &str,
            _bytes: Vec<u8>,
        ) -> Result<FileRef, Pdf2QuizError> {
            Ok(FileRef("file-1".into()))
        }

        async fn extract(
            &self,
            _file: &FileRef,
            _model: &str,
            _system_prompt: &str,
            _schema: &Value,
        ) -> Result<ExtractedBatch, Pdf2QuizError> {
            Ok(self.batch.clone())
        }
    }

    fn question(stem: &str) -> ExtractedQuestion {
        ExtractedQuestion {
            stem: stem.to_string(),
            labeled_options: vec![
                ExtractedOption { label: OptionLabel::A, text: "3".into() },
                ExtractedOption { label: OptionLabel::B, text: "4".into() },
                ExtractedOption { label: OptionLabel::C, text: "5".into() },
                ExtractedOption { label: OptionLabel::D, text: "22".into() },
            ],
            correct_label: OptionLabel::B,
            explanation: "e".into(),
            difficulty: Difficulty::Easy,
            topic: "addition".into(),
        }
    }

    fn backend_with(batch: ExtractedBatch) -> QuizBackend {
        let objects = MemoryObjectStore::new();
        objects.insert("docs/sample.pdf", b"%PDF-1.4".to_vec());
        let config = ExtractionConfig::builder()
            .extraction_model(Arc::new(CannedModel { batch }))
            .build()
            .unwrap();
        QuizBackend::new(Arc::new(objects), Arc::new(MemoryDocumentStore::new()), config)
    }

    fn extract_request(path: &str, category: &str) -> ExtractRequest {
        ExtractRequest {
            source_path: path.to_string(),
            category: category.to_string(),
        }
    }

    #[tokio::test]
    async fn end_to_end_extraction_persists_and_reports() {
        let backend = backend_with(ExtractedBatch {
            questions: vec![question("What is 2 + 2?")],
        });

        let out = backend
            .extract_questions(&extract_request("docs/sample.pdf", "math"))
            .await
            .unwrap();

        assert!(out.success);
        assert_eq!(out.question_set_id, "00de54afd55b");
        assert_eq!(out.question_ids, vec!["0c1410da"]);
        assert_eq!(out.question_count, 1);
        assert_eq!(out.category, "math");
        assert_eq!(out.questions_inline.len(), 1);
        assert_eq!(out.questions_inline[0].doc.correct_text, "4");

        let record = out.question_set.unwrap();
        assert_eq!(record.name, "Questions from sample.pdf");
        assert!(record.created_at.is_some());
    }

    #[tokio::test]
    async fn invalid_category_fails_before_any_store_access() {
        let backend = backend_with(ExtractedBatch::default());
        let err = backend
            .extract_questions(&extract_request("docs/sample.pdf", "history"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[tokio::test]
    async fn missing_source_is_not_found() {
        let backend = backend_with(ExtractedBatch::default());
        let err = backend
            .extract_questions(&extract_request("docs/absent.pdf", "math"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn empty_extraction_succeeds_with_zero_questions() {
        let backend = backend_with(ExtractedBatch::default());
        let out = backend
            .extract_questions(&extract_request("docs/sample.pdf", "math"))
            .await
            .unwrap();
        assert!(out.success);
        assert_eq!(out.question_count, 0);
        assert!(out.question_ids.is_empty());
        assert_eq!(out.question_set.unwrap().question_count, 0);
    }

    #[tokio::test]
    async fn chat_uses_injected_provider() {
        struct EchoChat;

        #[async_trait]
        impl ChatModel for EchoChat {
            async fn respond(
                &self,
                _model: &str,
                _system_prompt: &str,
                message: &str,
                _temperature: f32,
            ) -> Result<String, Pdf2QuizError> {
                Ok(format!("you said: {message}"))
            }
        }

        let config = ExtractionConfig::builder()
            .chat_model(Arc::new(EchoChat))
            .build()
            .unwrap();
        let backend = QuizBackend::new(
            Arc::new(MemoryObjectStore::new()),
            Arc::new(MemoryDocumentStore::new()),
            config,
        );

        let out = backend
            .chat_with_assistant(&ChatRequest {
                message: "Hello".into(),
                category: None,
                history: None,
            })
            .await
            .unwrap();
        assert!(out.success);
        assert_eq!(out.response, "you said: Hello");
    }
}
