//! Gemini-backed [`ChatModel`].
//!
//! One call to `models/{model}:generateContent` with a system instruction,
//! a single user turn, and a fixed temperature. The chat responder is
//! stateless per call, so no session or history plumbing exists here.

use crate::clients::ChatModel;
use crate::error::Pdf2QuizError;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Client for the Gemini generateContent API.
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    api_base: String,
}

impl GeminiClient {
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

    /// Build a client from `GEMINI_API_KEY`.
    pub fn from_env(timeout_secs: u64) -> Result<Self, Pdf2QuizError> {
        let key = std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| Pdf2QuizError::ChatNotConfigured {
                hint: "Set GEMINI_API_KEY or inject a ChatModel.".to_string(),
            })?;
        Self::new(key, timeout_secs)
    }

    /// Point the client at a non-default endpoint.
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    /// First candidate's text, if the response carries one.
    fn candidate_text(response: &Value) -> Option<String> {
        let parts = response
            .get("candidates")?
            .as_array()?
            .first()?
            .get("content")?
            .get("parts")?
            .as_array()?;
        let mut text = String::new();
        for part in parts {
            if let Some(t) = part.get("text").and_then(Value::as_str) {
                text.push_str(t);
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
impl ChatModel for GeminiClient {
    async fn respond(
        &self,
        model: &str,
        system_prompt: &str,
        message: &str,
        temperature: f32,
    ) -> Result<String, Pdf2QuizError> {
        debug!("chat call to {} ({} chars)", model, message.len());

        let payload = json!({
            "system_instruction": {
                "parts": [{ "text": system_prompt }]
            },
            "contents": [
                { "role": "user", "parts": [{ "text": message }] }
            ],
            "generationConfig": { "temperature": temperature }
        });

        let url = format!("{}/models/{}:generateContent", self.api_base, model);
        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
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
            return Err(Pdf2QuizError::ModelCallFailed {
                model: model.to_string(),
                detail: format!("HTTP {status}: {body}"),
            });
        }

        Self::candidate_text(&body).ok_or_else(|| Pdf2QuizError::ModelCallFailed {
            model: model.to_string(),
            detail: "response carried no candidate text".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidate_text_reads_first_candidate() {
        let body = json!({
            "candidates": [{
                "content": {
                    "parts": [{ "text": "Hello " }, { "text": "there!" }],
                    "role": "model"
                }
            }]
        });
        assert_eq!(GeminiClient::candidate_text(&body).as_deref(), Some("Hello there!"));
    }

    #[test]
    fn candidate_text_absent_when_blocked() {
        let body = json!({ "candidates": [] });
        assert!(GeminiClient::candidate_text(&body).is_none());
        assert!(GeminiClient::candidate_text(&json!({})).is_none());
    }
}
