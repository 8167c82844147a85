//! Request validation.
//!
//! Only two checks exist, and both fail as invalid-argument: the source
//! reference must be present and the category must be one of the
//! deployment's configured set. Nothing else is validated here — notably,
//! the file type is not checked; a non-PDF object surfaces later as a
//! provider-side failure.

use crate::config::ExtractionConfig;
use crate::error::Pdf2QuizError;

/// Validate an extraction request, returning the category verbatim.
pub fn validate_request<'a>(
    source_path: &str,
    category: &'a str,
    config: &ExtractionConfig,
) -> Result<&'a str, Pdf2QuizError> {
    if source_path.is_empty() {
        return Err(Pdf2QuizError::MissingSourcePath);
    }
    if !config.categories.iter().any(|c| c == category) {
        return Err(Pdf2QuizError::UnknownCategory {
            category: category.to_string(),
            allowed: config.allowed_categories(),
        });
    }
    Ok(category)
}
