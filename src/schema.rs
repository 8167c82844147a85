//! The structured-output contract between this crate and the extraction
//! model.
//!
//! The model is asked to return strict JSON conforming to
//! [`question_batch_schema`]; the types here are the Rust side of that
//! contract. Deserialization is deliberately strict (`deny_unknown_fields`,
//! closed enums): any deviation from the declared shape is surfaced as an
//! explicit schema violation at the normalization boundary rather than
//! silently coerced.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Option label in the fixed ordering A, B, C, D.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OptionLabel {
    A,
    B,
    C,
    D,
}

impl OptionLabel {
    /// Zero-based position of this label in the fixed ordering A, B, C, D.
    pub fn index(&self) -> usize {
        match self {
            OptionLabel::A => 0,
            OptionLabel::B => 1,
            OptionLabel::C => 2,
            OptionLabel::D => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OptionLabel::A => "A",
            OptionLabel::B => "B",
            OptionLabel::C => "C",
            OptionLabel::D => "D",
        }
    }
}

impl std::fmt::Display for OptionLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Estimated difficulty of a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// One labeled answer option as returned by the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExtractedOption {
    pub label: OptionLabel,
    pub text: String,
}

/// One multiple-choice question as returned by the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExtractedQuestion {
    /// The question text/prompt.
    pub stem: String,
    /// Exactly 4 answer options labeled A, B, C, D. The count is declared in
    /// the schema but re-checked during normalization.
    pub labeled_options: Vec<ExtractedOption>,
    /// The label of the correct answer.
    pub correct_label: OptionLabel,
    /// Why the correct answer is correct.
    pub explanation: String,
    pub difficulty: Difficulty,
    /// Specific topic or skill being tested.
    pub topic: String,
}

/// The batch of questions produced by one extraction call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractedBatch {
    #[serde(default)]
    pub questions: Vec<ExtractedQuestion>,
}

impl ExtractedBatch {
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// JSON schema sent with the extraction request to constrain model output.
///
/// Kept as data (not derived) so the wire contract is visible in one place
/// and can be asserted against in tests without a live provider.
pub fn question_batch_schema(max_questions: usize) -> Value {
    json!({
        "type": "object",
        "properties": {
            "questions": {
                "type": "array",
                "maxItems": max_questions,
                "description": format!(
                    "Up to {max_questions} multiple choice questions extracted from the PDF"
                ),
                "items": {
                    "type": "object",
                    "properties": {
                        "stem": {
                            "type": "string",
                            "description": "The question text/prompt"
                        },
                        "labeled_options": {
                            "type": "array",
                            "minItems": 4,
                            "maxItems": 4,
                            "description": "Exactly 4 answer options with labels A, B, C, D",
                            "items": {
                                "type": "object",
                                "properties": {
                                    "label": { "type": "string", "enum": ["A", "B", "C", "D"] },
                                    "text": { "type": "string" }
                                },
                                "required": ["label", "text"],
                                "additionalProperties": false
                            }
                        },
                        "correct_label": {
                            "type": "string",
                            "enum": ["A", "B", "C", "D"],
                            "description": "The label of the correct answer"
                        },
                        "explanation": {
                            "type": "string",
                            "description": "Explanation of why the correct answer is correct"
                        },
                        "difficulty": {
                            "type": "string",
                            "enum": ["easy", "medium", "hard"],
                            "description": "Estimated difficulty level"
                        },
                        "topic": {
                            "type": "string",
                            "description": "Specific topic or skill being tested"
                        }
                    },
                    "required": [
                        "stem",
                        "labeled_options",
                        "correct_label",
                        "explanation",
                        "difficulty",
                        "topic"
                    ],
                    "additionalProperties": false
                }
            }
        },
        "required": ["questions"],
        "additionalProperties": false
    })
}
