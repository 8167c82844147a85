//! Canonical persisted document shapes.
//!
//! Two collections exist: `questions` (keyed by stem fingerprint) and
//! `question_sets` (keyed by source-path fingerprint). The structs here are
//! the document bodies as written; `created_at`/`updated_at` are assigned by
//! the document store at commit time and therefore do not appear on the
//! write-side types.

use crate::schema::{Difficulty, ExtractedOption, OptionLabel};
use serde::{Deserialize, Serialize};

/// Version stamp written into every question document so future shape
/// changes can be migrated.
pub const SCHEMA_VERSION: u32 = 1;

/// Collection holding individual question documents.
pub const QUESTIONS_COLLECTION: &str = "questions";

/// Collection holding question-set documents.
pub const QUESTION_SETS_COLLECTION: &str = "question_sets";

/// Provenance block persisted with each question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceProvenance {
    /// Object-store path the PDF was fetched from.
    pub pdf_path: String,
    /// UTC processing timestamp, RFC 3339.
    pub processed_at_iso: String,
    /// Extraction method tag, e.g. `"openai-structured-output"`.
    pub extraction_method: String,
    /// The model variant that actually produced the result (reflects the
    /// fallback escalation when it happened).
    pub model: String,
}

/// Provenance block persisted with each question set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetProvenance {
    pub pdf_path: String,
    pub extraction_method: String,
}

/// One persisted quiz question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionDoc {
    pub stem: String,
    /// The four options with their labels, in A–D order as extracted.
    pub labeled_options: Vec<ExtractedOption>,
    /// Flattened option texts, same order as `labeled_options`.
    pub options: Vec<String>,
    pub correct_label: OptionLabel,
    /// Position of `correct_label` under the fixed ordering A, B, C, D.
    pub correct_index: usize,
    /// Text of the option whose label equals `correct_label`.
    pub correct_text: String,
    pub explanation: String,
    pub difficulty: Difficulty,
    pub topic: String,
    /// Duplicate of `topic`, kept for consumers that query by skill.
    pub skill: String,
    /// The requested category, verbatim.
    pub subject: String,
    /// Display form of the category (first letter capitalized).
    pub domain: String,
    pub question_format: String,
    /// Reserved for grid-in (free-response numeric) formats; always null for
    /// multiple choice.
    pub grid_in_answer: Option<String>,
    /// Reserved for figure-based questions; always null for this pipeline.
    pub figure_description: Option<String>,
    pub schema_version: u32,
    pub source: SourceProvenance,
}

/// The aggregate record of one extraction run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionSetDoc {
    /// Human-readable name derived from the source filename.
    pub name: String,
    pub category: String,
    /// Ordered question ids produced by this run.
    pub question_ids: Vec<String>,
    pub question_count: usize,
    pub source: SetProvenance,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_doc_serializes_expected_fields() {
        let doc = QuestionDoc {
            stem: "What is 2 + 2?".into(),
            labeled_options: vec![
                ExtractedOption { label: OptionLabel::A, text: "3".into() },
                ExtractedOption { label: OptionLabel::B, text: "4".into() },
                ExtractedOption { label: OptionLabel::C, text: "5".into() },
                ExtractedOption { label: OptionLabel::D, text: "22".into() },
            ],
            options: vec!["3".into(), "4".into(), "5".into(), "22".into()],
            correct_label: OptionLabel::B,
            correct_index: 1,
            correct_text: "4".into(),
            explanation: "2 + 2 equals 4.".into(),
            difficulty: Difficulty::Easy,
            topic: "addition".into(),
            skill: "addition".into(),
            subject: "math".into(),
            domain: "Math".into(),
            question_format: "multiple_choice".into(),
            grid_in_answer: None,
            figure_description: None,
            schema_version: SCHEMA_VERSION,
            source: SourceProvenance {
                pdf_path: "docs/sample.pdf".into(),
                processed_at_iso: "2026-01-01T00:00:00+00:00".into(),
                extraction_method: "openai-structured-output".into(),
                model: "gpt-4o-mini".into(),
            },
        };

        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["correct_label"], "B");
        assert_eq!(json["correct_index"], 1);
        assert_eq!(json["question_format"], "multiple_choice");
        assert_eq!(json["grid_in_answer"], serde_json::Value::Null);
        assert_eq!(json["schema_version"], 1);
        assert_eq!(json["source"]["model"], "gpt-4o-mini");
    }

    #[test]
    fn set_doc_round_trips() {
        let doc = QuestionSetDoc {
            name: "Questions from sample.pdf".into(),
            category: "math".into(),
            question_ids: vec!["0c1410da".into()],
            question_count: 1,
            source: SetProvenance {
                pdf_path: "docs/sample.pdf".into(),
                extraction_method: "openai-structured-output".into(),
            },
        };
        let json = serde_json::to_string(&doc).unwrap();
        let back: QuestionSetDoc = serde_json::from_str(&json).unwrap();
        assert_eq!(back.question_count, 1);
        assert_eq!(back.question_ids, doc.question_ids);
    }
}
