//! Normalization into the canonical persisted shape.
//!
//! This is the strict-schema boundary: anything the model returned that
//! violates the contract — an option count other than 4, a correct label
//! matching no option — becomes an explicit internal error here instead of
//! being coerced. The transformation is otherwise pure; the only side
//! effect is capturing the processing timestamp.

use crate::config::ExtractionConfig;
use crate::docs::{QuestionDoc, SourceProvenance, SCHEMA_VERSION};
use crate::error::Pdf2QuizError;
use crate::fingerprint;
use crate::schema::ExtractedQuestion;
use chrono::Utc;
use tracing::debug;

/// A normalized question with its content-derived id.
#[derive(Debug)]
pub struct NormalizedQuestion {
    pub id: String,
    pub doc: QuestionDoc,
}

/// Display form of a category: first letter upper-cased.
pub fn display_domain(category: &str) -> String {
    let mut chars = category.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Normalize one extraction batch.
///
/// Question order is preserved; ids are derived from stems, so a duplicate
/// stem inside one batch produces two writes to the same document (last
/// write wins, consistent with cross-request dedup).
pub fn normalize_batch(
    questions: &[ExtractedQuestion],
    category: &str,
    source_path: &str,
    model: &str,
    config: &ExtractionConfig,
) -> Result<Vec<NormalizedQuestion>, Pdf2QuizError> {
    let processed_at = Utc::now().to_rfc3339();
    questions
        .iter()
        .map(|q| normalize_question(q, category, source_path, model, &processed_at, config))
        .collect()
}

fn normalize_question(
    question: &ExtractedQuestion,
    category: &str,
    source_path: &str,
    model: &str,
    processed_at: &str,
    config: &ExtractionConfig,
) -> Result<NormalizedQuestion, Pdf2QuizError> {
    if question.labeled_options.len() != 4 {
        return Err(Pdf2QuizError::SchemaViolation {
            detail: format!(
                "question '{}' has {} options, expected exactly 4",
                question.stem,
                question.labeled_options.len()
            ),
        });
    }

    let correct_text = question
        .labeled_options
        .iter()
        .find(|opt| opt.label == question.correct_label)
        .map(|opt| opt.text.clone())
        .ok_or_else(|| Pdf2QuizError::SchemaViolation {
            detail: format!(
                "correct_label '{}' matches no option of question '{}'",
                question.correct_label, question.stem
            ),
        })?;

    let id = fingerprint::question_id(&question.stem);
    debug!("normalized question {} ({})", id, question.topic);

    Ok(NormalizedQuestion {
        id,
        doc: QuestionDoc {
            stem: question.stem.clone(),
            labeled_options: question.labeled_options.clone(),
            options: question
                .labeled_options
                .iter()
                .map(|opt| opt.text.clone())
                .collect(),
            correct_label: question.correct_label,
            correct_index: question.correct_label.index(),
            correct_text,
            explanation: question.explanation.clone(),
            difficulty: question.difficulty,
            topic: question.topic.clone(),
            skill: question.topic.clone(),
            subject: category.to_string(),
            domain: display_domain(category),
            question_format: "multiple_choice".to_string(),
            grid_in_answer: None,
            figure_description: None,
            schema_version: SCHEMA_VERSION,
            source: SourceProvenance {
                pdf_path: source_path.to_string(),
                processed_at_iso: processed_at.to_string(),
                extraction_method: config.extraction_method.clone(),
                model: model.to_string(),
            },
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::schema::{Difficulty, ExtractedOption, OptionLabel};

    fn sample(correct: OptionLabel) -> ExtractedQuestion {
        ExtractedQuestion {
            stem: "Which planet is closest to the sun?".into(),
            labeled_options: vec![
                ExtractedOption { label: OptionLabel::A, text: "Venus".into() },
                ExtractedOption { label: OptionLabel::B, text: "Mercury".into() },
                ExtractedOption { label: OptionLabel::C, text: "Earth".into() },
                ExtractedOption { label: OptionLabel::D, text: "Mars".into() },
            ],
            correct_label: correct,
            explanation: "Mercury orbits closest to the sun.".into(),
            difficulty: Difficulty::Easy,
            topic: "astronomy".into(),
        }
    }

    #[test]
    fn derives_correct_index_and_text() {
        let config = ExtractionConfig::default();
        let out = normalize_batch(
            &[sample(OptionLabel::B)],
            "reading",
            "docs/sample.pdf",
            "gpt-4o-mini",
            &config,
        )
        .unwrap();

        let q = &out[0];
        // md5("Which planet is closest to the sun?") = c4fd067d…
        assert_eq!(q.id, "c4fd067d");
        assert_eq!(q.doc.correct_index, 1);
        assert_eq!(q.doc.correct_text, "Mercury");
        assert_eq!(q.doc.options, vec!["Venus", "Mercury", "Earth", "Mars"]);
        assert_eq!(q.doc.subject, "reading");
        assert_eq!(q.doc.domain, "Reading");
        assert_eq!(q.doc.skill, q.doc.topic);
        assert_eq!(q.doc.source.model, "gpt-4o-mini");
        assert_eq!(q.doc.source.extraction_method, "openai-structured-output");
    }

    #[test]
    fn wrong_option_count_is_a_schema_violation() {
        let config = ExtractionConfig::default();
        let mut q = sample(OptionLabel::A);
        q.labeled_options.pop();
        let err = normalize_batch(&[q], "math", "p.pdf", "m", &config).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Internal);
        assert!(err.to_string().contains("exactly 4"));
    }

    #[test]
    fn unmatched_correct_label_is_a_schema_violation() {
        let config = ExtractionConfig::default();
        let mut q = sample(OptionLabel::D);
        // Duplicate label A in place of D so the correct label has no match.
        q.labeled_options[3].label = OptionLabel::A;
        let err = normalize_batch(&[q], "math", "p.pdf", "m", &config).unwrap_err();
        assert!(matches!(err, Pdf2QuizError::SchemaViolation { .. }));
    }

    #[test]
    fn domain_capitalizes_category() {
        assert_eq!(display_domain("math"), "Math");
        assert_eq!(display_domain("finance"), "Finance");
        assert_eq!(display_domain(""), "");
    }

    #[test]
    fn provenance_records_the_fallback_model() {
        let config = ExtractionConfig::default();
        let out = normalize_batch(
            &[sample(OptionLabel::B)],
            "math",
            "docs/sample.pdf",
            "gpt-4o-2024-08-06",
            &config,
        )
        .unwrap();
        assert_eq!(out[0].doc.source.model, "gpt-4o-2024-08-06");
    }
}
