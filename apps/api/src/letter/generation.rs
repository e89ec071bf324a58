//! Generation Stage — produces the cover letter body from the extraction
//! record and the resume summary.

use crate::errors::AppError;
use crate::letter::extraction::JobExtraction;
use crate::letter::prompts::build_generation_prompt;
use crate::llm_client::{Completion, CompletionOptions, LlmError};

/// Generates the cover letter text for `extraction` and `resume`.
///
/// Free-text mode, no schema. The model's output is returned verbatim — no
/// post-processing, no markdown stripping; formatting compliance is delegated
/// entirely to the system instruction. Assumes the extraction invariant
/// (exactly five requirements) already holds.
pub async fn generate_letter(
    extraction: &JobExtraction,
    resume: &str,
    llm: &dyn Completion,
) -> Result<String, AppError> {
    let prompt = build_generation_prompt(extraction, resume);

    llm.complete(&prompt.system, &prompt.user, CompletionOptions::default())
        .await
        .map_err(|e| match e {
            LlmError::EmptyContent => {
                AppError::GenerationFailed("LLM returned empty content".to_string())
            }
            other => AppError::Llm(other.to_string()),
        })
}
