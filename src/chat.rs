//! Stateless chat responder.
//!
//! One model call per request: a fixed persona system instruction
//! parameterized only by the context label, the user's message, and the
//! configured temperature. The model's text is returned verbatim. No
//! persistence, no retry, and any supplied history is accepted but not
//! incorporated into the call.

use crate::clients::ChatModel;
use crate::config::ExtractionConfig;
use crate::error::Pdf2QuizError;
use crate::output::{ChatRequest, ChatResponse};
use crate::prompts::chat_persona;
use tracing::{debug, info};

/// Run one chat exchange.
pub async fn respond(
    model: &dyn ChatModel,
    request: &ChatRequest,
    config: &ExtractionConfig,
) -> Result<ChatResponse, Pdf2QuizError> {
    let message = request.message.trim();
    if message.is_empty() {
        return Err(Pdf2QuizError::EmptyMessage);
    }

    let context = request
        .category
        .as_deref()
        .filter(|c| !c.is_empty())
        .unwrap_or(&config.chat_default_context);

    if let Some(history) = &request.history {
        // Accepted but unused; the exchange is single-turn by contract.
        debug!("ignoring {} supplied history turns", history.len());
    }

    let persona = chat_persona(context);
    let response = model
        .respond(
            &config.chat_model_name,
            &persona,
            message,
            config.chat_temperature,
        )
        .await?;

    info!("chat reply of {} chars for context '{}'", response.len(), context);
    Ok(ChatResponse {
        success: true,
        response,
    })
}
