//! Configuration for the extraction pipeline and chat responder.
//!
//! Every knob lives in [`ExtractionConfig`], built via its
//! [`ExtractionConfigBuilder`]. Keeping the knobs in one struct makes it easy
//! to share a config across invocations, log it, and diff two runs.
//!
//! Provider handles are part of the config (as optional pre-built clients)
//! so tests and embedders can substitute doubles; when absent, the backend
//! resolves a provider from the environment at call time.

use crate::clients::{ChatModel, ExtractionModel};
use crate::error::Pdf2QuizError;
use std::fmt;
use std::sync::Arc;

/// Configuration for a [`crate::QuizBackend`].
///
/// # Example
/// ```rust
/// use pdf2quiz::ExtractionConfig;
///
/// let config = ExtractionConfig::builder()
///     .primary_model("gpt-4o-mini")
///     .max_questions(5)
///     .categories(["earning", "saving", "spending"])
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct ExtractionConfig {
    /// Cost-efficient model tried first. Default: `gpt-4o-mini`.
    pub primary_model: String,

    /// Stronger model used for the single escalation when the primary call
    /// returns zero questions. Default: `gpt-4o-2024-08-06`.
    ///
    /// The two-tier selection trades cost for recall: cheap model first,
    /// escalate only on an empty result, never on a partial one.
    pub fallback_model: String,

    /// Maximum questions requested per extraction. Default: 10.
    pub max_questions: usize,

    /// The deployment's category set. Requests naming any other category are
    /// rejected with an invalid-argument error. Default:
    /// `reading`, `math`, `finance`.
    pub categories: Vec<String>,

    /// Extraction-method tag written into question provenance.
    /// Default: `openai-structured-output`.
    pub extraction_method: String,

    /// Conversational model for the chat responder. Default:
    /// `gemini-2.0-flash`.
    pub chat_model_name: String,

    /// Fixed sampling temperature for chat responses. Default: 0.7.
    pub chat_temperature: f32,

    /// Context label used for chat when the request supplies none.
    /// Default: `the village`.
    pub chat_default_context: String,

    /// Per-provider-call timeout in seconds. Default: 120.
    pub api_timeout_secs: u64,

    /// Pre-built extraction provider. Takes precedence over environment
    /// resolution.
    pub extraction_model: Option<Arc<dyn ExtractionModel>>,

    /// Pre-built chat provider. Takes precedence over environment resolution.
    pub chat_model: Option<Arc<dyn ChatModel>>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            primary_model: "gpt-4o-mini".to_string(),
            fallback_model: "gpt-4o-2024-08-06".to_string(),
            max_questions: 10,
            categories: vec![
                "reading".to_string(),
                "math".to_string(),
                "finance".to_string(),
            ],
            extraction_method: "openai-structured-output".to_string(),
            chat_model_name: "gemini-2.0-flash".to_string(),
            chat_temperature: 0.7,
            chat_default_context: "the village".to_string(),
            api_timeout_secs: 120,
            extraction_model: None,
            chat_model: None,
        }
    }
}

impl fmt::Debug for ExtractionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractionConfig")
            .field("primary_model", &self.primary_model)
            .field("fallback_model", &self.fallback_model)
            .field("max_questions", &self.max_questions)
            .field("categories", &self.categories)
            .field("extraction_method", &self.extraction_method)
            .field("chat_model_name", &self.chat_model_name)
            .field("chat_temperature", &self.chat_temperature)
            .field("chat_default_context", &self.chat_default_context)
            .field("api_timeout_secs", &self.api_timeout_secs)
            .field(
                "extraction_model",
                &self.extraction_model.as_ref().map(|_| "<dyn ExtractionModel>"),
            )
            .field("chat_model", &self.chat_model.as_ref().map(|_| "<dyn ChatModel>"))
            .finish()
    }
}

impl ExtractionConfig {
    /// Create a new builder for `ExtractionConfig`.
    pub fn builder() -> ExtractionConfigBuilder {
        ExtractionConfigBuilder {
            config: Self::default(),
        }
    }

    /// The allowed categories as a display list for error messages.
    pub fn allowed_categories(&self) -> String {
        self.categories.join(", ")
    }
}

/// Builder for [`ExtractionConfig`].
#[derive(Debug)]
pub struct ExtractionConfigBuilder {
    config: ExtractionConfig,
}

impl ExtractionConfigBuilder {
    pub fn primary_model(mut self, model: impl Into<String>) -> Self {
        self.config.primary_model = model.into();
        self
    }

    pub fn fallback_model(mut self, model: impl Into<String>) -> Self {
        self.config.fallback_model = model.into();
        self
    }

    pub fn max_questions(mut self, n: usize) -> Self {
        self.config.max_questions = n;
        self
    }

    pub fn categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    pub fn extraction_method(mut self, tag: impl Into<String>) -> Self {
        self.config.extraction_method = tag.into();
        self
    }

    pub fn chat_model_name(mut self, model: impl Into<String>) -> Self {
        self.config.chat_model_name = model.into();
        self
    }

    pub fn chat_temperature(mut self, t: f32) -> Self {
        self.config.chat_temperature = t.clamp(0.0, 2.0);
        self
    }

    pub fn chat_default_context(mut self, ctx: impl Into<String>) -> Self {
        self.config.chat_default_context = ctx.into();
        self
    }

    pub fn api_timeout_secs(mut self, secs: u64) -> Self {
        self.config.api_timeout_secs = secs.max(1);
        self
    }

    pub fn extraction_model(mut self, model: Arc<dyn ExtractionModel>) -> Self {
        self.config.extraction_model = Some(model);
        self
    }

    pub fn chat_model(mut self, model: Arc<dyn ChatModel>) -> Self {
        self.config.chat_model = Some(model);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ExtractionConfig, Pdf2QuizError> {
        let c = &self.config;
        if c.max_questions == 0 {
            return Err(Pdf2QuizError::InvalidConfig(
                "max_questions must be ≥ 1".into(),
            ));
        }
        if c.categories.is_empty() {
            return Err(Pdf2QuizError::InvalidConfig(
                "at least one category is required".into(),
            ));
        }
        if c.primary_model.is_empty() || c.fallback_model.is_empty() {
            return Err(Pdf2QuizError::InvalidConfig(
                "model names must not be empty".into(),
            ));
        }
        Ok(self.config)
    }
}
