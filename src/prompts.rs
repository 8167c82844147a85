//! Prompts for extraction and chat.
//!
//! Centralising every prompt here serves two purposes:
//!
//! 1. **Single source of truth** — tightening an extraction rule or adjusting
//!    the assistant persona requires editing exactly one place.
//!
//! 2. **Testability** — unit tests can inspect prompts directly without a
//!    live model call, making prompt regressions easy to catch.
//!
//! Both prompts are parameterized only by the category/context label; no
//! other caller input reaches the system instruction.

/// System instruction for the structured extraction call.
///
/// States the extraction rules the schema alone cannot express: question
/// quality, category appropriateness, and the strict-JSON requirement.
pub fn extraction_system_prompt(category: &str, max_questions: usize) -> String {
    format!(
        "You are an expert at extracting educational assessment questions from PDFs.\n\
         Extract up to {max_questions} high-quality multiple choice questions from the provided PDF.\n\
         Return strictly valid JSON that matches the provided schema.\n\
         Each question must have exactly 4 options labeled A, B, C, and D.\n\
         The questions should be appropriate for the '{category}' domain.\n\
         Ensure questions are clear, accurate, and educationally valuable."
    )
}

/// Fixed persona for the chat assistant, parameterized by the context label.
pub fn chat_persona(context: &str) -> String {
    format!(
        "You are a friendly learning assistant helping a student in {context}.\n\
         Keep answers short, encouraging, and age-appropriate.\n\
         Explain ideas with simple examples and invite follow-up questions.\n\
         Stay on educational topics; gently redirect anything else."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extraction_prompt_names_category_and_limit() {
        let p = extraction_system_prompt("math", 10);
        assert!(p.contains("'math'"));
        assert!(p.contains("up to 10"));
        assert!(p.contains("exactly 4 options"));
    }

    #[test]
    fn chat_persona_mentions_context() {
        let p = chat_persona("the village");
        assert!(p.contains("the village"));
    }
}
