//! OpenAI-backed [`ExtractionModel`].
//!
//! Two endpoints are involved:
//!
//! 1. `POST /files` — multipart upload of the raw PDF (`purpose=assistants`),
//!    returning the opaque file id the extraction call references.
//! 2. `POST /responses` — one structured-output call: system instruction,
//!    a user turn referencing the uploaded file, and a strict JSON-schema
//!    response format. The returned text is parsed into
//!    [`ExtractedBatch`]; anything that does not parse is a schema
//!    violation, not a coercion target.
//!
//! The client performs no retries of its own — model-tier escalation is the
//! pipeline's job, and transport errors propagate immediately.

use crate::clients::{ExtractionModel, FileRef};
use crate::error::Pdf2QuizError;
use crate::schema::ExtractedBatch;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, warn};

const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

/// Client for the OpenAI Files + Responses APIs.
#[derive(Clone)]
pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    api_base: String,
}

impl OpenAiClient {
    /// Build a client with an explicit API key.
    pub fn new(api_key: impl Into<String>, timeout_secs: u64) -> Result<Self, Pdf2QuizError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| Pdf2QuizError::Internal(format!("http client: {e}")))?;
        Ok(Self {
            http,
            api_key: api_key.into(),
            api_base: DEFAULT_API_BASE.to_string(),
        })
    }

    /// Build a client from `OPENAI_API_KEY`.
    pub fn from_env(timeout_secs: u64) -> Result<Self, Pdf2QuizError> {
        let key = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| Pdf2QuizError::ExtractionNotConfigured {
                hint: "Set OPENAI_API_KEY or inject an ExtractionModel.".to_string(),
            })?;
        Self::new(key, timeout_secs)
    }

    /// Point the client at a compatible, non-default endpoint.
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    /// Pull the generated text out of a Responses API payload.
    ///
    /// The response carries an `output` array whose `message` item holds
    /// `output_text` content parts; concatenating those parts yields the
    /// JSON document the schema constrained.
    fn output_text(response: &Value) -> Option<String> {
        let items = response.get("output")?.as_array()?;
        let mut text = String::new();
        for item in items {
            if item.get("type").and_then(Value::as_str) != Some("message") {
                continue;
            }
            let Some(parts) = item.get("content").and_then(Value::as_array) else {
                continue;
            };
            for part in parts {
                if part.get("type").and_then(Value::as_str) == Some("output_text") {
                    if let Some(t) = part.get("text").and_then(Value::as_str) {
                        text.push_str(t);
                    }
                }
            }
        }
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[async_trait]
impl ExtractionModel for OpenAiClient {
    async fn upload_file(
        &self,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<FileRef, Pdf2QuizError> {
        debug!("uploading {} ({} bytes) to provider file store", filename, bytes.len());

        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str("application/pdf")
            .map_err(|e| Pdf2QuizError::UploadFailed { detail: e.to_string() })?;
        let form = reqwest::multipart::Form::new()
            .text("purpose", "assistants")
            .part("file", part);

        let response = self
            .http
            .post(format!("{}/files", self.api_base))
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| Pdf2QuizError::UploadFailed { detail: e.to_string() })?;

        let status = response.status();
        let body: Value = response
            .json()
            .await
            .map_err(|e| Pdf2QuizError::UploadFailed { detail: e.to_string() })?;

        if !status.is_success() {
            return Err(Pdf2QuizError::UploadFailed {
                detail: format!("HTTP {status}: {body}"),
            });
        }

        let id = body
            .get("id")
            .and_then(Value::as_str)
            .ok_or_else(|| Pdf2QuizError::UploadFailed {
                detail: format!("upload response missing file id: {body}"),
            })?;

        debug!("uploaded as file id {}", id);
        Ok(FileRef(id.to_string()))
    }

    async fn extract(
        &self,
        file: &FileRef,
        model: &str,
        system_prompt: &str,
        schema: &Value,
    ) -> Result<ExtractedBatch, Pdf2QuizError> {
        debug!("structured extraction with model {}", model);

        let payload = json!({
            "model": model,
            "input": [
                {
                    "role": "system",
                    "content": [
                        { "type": "input_text", "text": system_prompt }
                    ]
                },
                {
                    "role": "user",
                    "content": [
                        { "type": "input_file", "file_id": file.0 }
                    ]
                }
            ],
            "text": {
                "format": {
                    "type": "json_schema",
                    "name": "question_batch",
                    "strict": true,
                    "schema": schema
                }
            }
        });

        let response = self
            .http
            .post(format!("{}/responses", self.api_base))
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| Pdf2QuizError::ModelCallFailed {
                model: model.to_string(),
                detail: e.to_string(),
            })?;

        let status = response.status();
        let body: Value = response
            .json()
            .await
            .map_err(|e| Pdf2QuizError::ModelCallFailed {
                model: model.to_string(),
                detail: e.to_string(),
            })?;

        if !status.is_success() {
            warn!("model {} returned HTTP {}", model, status);
            return Err(Pdf2QuizError::ModelCallFailed {
                model: model.to_string(),
                detail: format!("HTTP {status}: {body}"),
            });
        }

        let Some(text) = Self::output_text(&body) else {
            // A response with no message text counts as an empty batch; the
            // pipeline decides whether to escalate.
            return Ok(ExtractedBatch::default());
        };

        serde_json::from_str(&text).map_err(|e| Pdf2QuizError::SchemaViolation {
            detail: format!("model '{model}' output is not a valid question batch: {e}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_text_joins_message_parts() {
        let body = json!({
            "output": [
                { "type": "reasoning", "content": [] },
                {
                    "type": "message",
                    "content": [
                        { "type": "output_text", "text": "{\"questions\"" },
                        { "type": "output_text", "text": ":[]}" }
                    ]
                }
            ]
        });
        assert_eq!(
            OpenAiClient::output_text(&body).as_deref(),
            Some("{\"questions\":[]}")
        );
    }

    #[test]
    fn output_text_absent_for_empty_response() {
        assert!(OpenAiClient::output_text(&json!({ "output": [] })).is_none());
        assert!(OpenAiClient::output_text(&json!({})).is_none());
    }
}
