//! Model invocation with single-tier fallback.
//!
//! ## Escalation rule
//!
//! The cost-efficient model runs first. If — and only if — it produces zero
//! questions, the identical exchange is retried once against the stronger
//! model. A partial result (fewer questions than asked for) is accepted
//! as-is and never escalated, and transport-level errors propagate
//! immediately without any retry. If the second attempt is also empty the
//! pipeline proceeds with the empty batch; the caller persists an empty set.
//!
//! The file is uploaded to the provider once and the reference reused across
//! both tiers.

use crate::clients::ExtractionModel;
use crate::config::ExtractionConfig;
use crate::error::Pdf2QuizError;
use crate::prompts::extraction_system_prompt;
use crate::schema::{question_batch_schema, ExtractedBatch};
use tracing::{debug, info, warn};

/// Outcome of the extraction stage.
#[derive(Debug)]
pub struct Extraction {
    pub batch: ExtractedBatch,
    /// The model variant that actually produced the result, recorded in
    /// provenance so consumers can see when the fallback fired.
    pub model: String,
}

/// Upload the PDF and run the structured extraction, escalating once on an
/// empty result.
pub async fn invoke_with_fallback(
    provider: &dyn ExtractionModel,
    filename: &str,
    pdf_bytes: Vec<u8>,
    category: &str,
    config: &ExtractionConfig,
) -> Result<Extraction, Pdf2QuizError> {
    let system_prompt = extraction_system_prompt(category, config.max_questions);
    let schema = question_batch_schema(config.max_questions);

    let file = provider.upload_file(filename, pdf_bytes).await?;
    debug!("uploaded {} as {:?}", filename, file);

    let mut model = config.primary_model.clone();
    let mut batch = provider
        .extract(&file, &model, &system_prompt, &schema)
        .await?;

    if batch.is_empty() {
        warn!(
            "no questions extracted with {}; retrying with {}",
            config.primary_model, config.fallback_model
        );
        model = config.fallback_model.clone();
        batch = provider
            .extract(&file, &model, &system_prompt, &schema)
            .await?;
    }

    // The schema already caps the batch, but the cap is enforced here too so
    // an over-eager model cannot push more than max_questions downstream.
    if batch.questions.len() > config.max_questions {
        batch.questions.truncate(config.max_questions);
    }

    info!("extracted {} questions with {}", batch.questions.len(), model);
    Ok(Extraction { batch, model })
}
