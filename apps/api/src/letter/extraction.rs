//! Extraction Stage — turns a free-text job description into a structured
//! company/requirements record.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::letter::prompts::build_extraction_prompt;
use crate::llm_client::{strip_json_fences, Completion, CompletionOptions, LlmError};

/// Number of requirements the extraction contract guarantees. The generation
/// stage relies on this without re-checking.
pub const REQUIREMENT_COUNT: usize = 5;

/// Structured record extracted from a job description. Produced once per
/// pipeline run, consumed immediately by the generation stage, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobExtraction {
    pub company: String,
    pub requirements: Vec<String>,
}

/// Extracts the hiring company and the top requirements from a job description.
///
/// Invokes the LLM in structured output mode. The response schema is advisory
/// to the model, so the parsed record is validated locally: non-blank company,
/// exactly `REQUIREMENT_COUNT` requirements, each non-blank. The caller
/// guarantees a non-empty input; this stage does not re-check it.
pub async fn extract(
    job_description: &str,
    llm: &dyn Completion,
) -> Result<JobExtraction, AppError> {
    let prompt = build_extraction_prompt(job_description);

    let text = llm
        .complete(
            prompt.system,
            &prompt.user,
            CompletionOptions::structured(prompt.response_schema),
        )
        .await
        .map_err(|e| match e {
            LlmError::EmptyContent => {
                AppError::ExtractionFailed("LLM returned empty content".to_string())
            }
            other => AppError::Llm(other.to_string()),
        })?;

    let extraction: JobExtraction = serde_json::from_str(strip_json_fences(&text))
        .map_err(|e| AppError::ExtractionFailed(format!("unparseable extraction response: {e}")))?;

    validate(&extraction)?;

    Ok(extraction)
}

fn validate(extraction: &JobExtraction) -> Result<(), AppError> {
    if extraction.company.trim().is_empty() {
        return Err(AppError::ExtractionFailed(
            "extraction returned a blank company name".to_string(),
        ));
    }
    if extraction.requirements.len() != REQUIREMENT_COUNT {
        return Err(AppError::ExtractionFailed(format!(
            "expected {REQUIREMENT_COUNT} requirements, got {}",
            extraction.requirements.len()
        )));
    }
    if extraction.requirements.iter().any(|r| r.trim().is_empty()) {
        return Err(AppError::ExtractionFailed(
            "extraction returned a blank requirement entry".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::mock::{Reply, ScriptedCompletion};

    const ACME_JD: &str = "Senior Software Engineer at Acme Corp. \
        Requirements: Python, Kubernetes, RAG systems, MLOps, collaboration.";

    fn acme_extraction_json() -> String {
        serde_json::json!({
            "company": "Acme Corp",
            "requirements": ["Python", "Kubernetes", "RAG systems", "MLOps", "Collaboration"]
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_extract_parses_valid_response() {
        let llm = ScriptedCompletion::text(&acme_extraction_json());

        let extraction = extract(ACME_JD, &llm).await.unwrap();
        assert_eq!(extraction.company, "Acme Corp");
        assert_eq!(extraction.requirements.len(), REQUIREMENT_COUNT);
        assert_eq!(extraction.requirements[0], "Python");
    }

    #[tokio::test]
    async fn test_extract_uses_structured_mode_and_embeds_jd() {
        let llm = ScriptedCompletion::text(&acme_extraction_json());

        extract(ACME_JD, &llm).await.unwrap();

        let calls = llm.calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].structured);
        assert!(calls[0].user.contains(ACME_JD));
    }

    #[tokio::test]
    async fn test_extract_strips_code_fences() {
        let fenced = format!("```json\n{}\n```", acme_extraction_json());
        let llm = ScriptedCompletion::text(&fenced);

        let extraction = extract(ACME_JD, &llm).await.unwrap();
        assert_eq!(extraction.company, "Acme Corp");
    }

    #[tokio::test]
    async fn test_extract_fails_on_empty_content() {
        let llm = ScriptedCompletion::new(vec![Reply::Empty]);

        let err = extract(ACME_JD, &llm).await.unwrap_err();
        assert!(matches!(err, AppError::ExtractionFailed(_)));
    }

    #[tokio::test]
    async fn test_extract_fails_on_missing_field() {
        let llm = ScriptedCompletion::text(r#"{"company": "Acme Corp"}"#);

        let err = extract(ACME_JD, &llm).await.unwrap_err();
        assert!(matches!(err, AppError::ExtractionFailed(_)));
    }

    #[tokio::test]
    async fn test_extract_fails_on_wrong_requirement_count() {
        let llm = ScriptedCompletion::text(
            r#"{"company": "Acme Corp", "requirements": ["Python", "Kubernetes", "RAG", "MLOps"]}"#,
        );

        let err = extract(ACME_JD, &llm).await.unwrap_err();
        assert!(matches!(err, AppError::ExtractionFailed(_)));
    }

    #[tokio::test]
    async fn test_extract_fails_on_blank_company() {
        let llm = ScriptedCompletion::text(
            r#"{"company": "  ", "requirements": ["a", "b", "c", "d", "e"]}"#,
        );

        let err = extract(ACME_JD, &llm).await.unwrap_err();
        assert!(matches!(err, AppError::ExtractionFailed(_)));
    }

    #[tokio::test]
    async fn test_extract_fails_on_blank_requirement() {
        let llm = ScriptedCompletion::text(
            r#"{"company": "Acme Corp", "requirements": ["a", "b", "", "d", "e"]}"#,
        );

        let err = extract(ACME_JD, &llm).await.unwrap_err();
        assert!(matches!(err, AppError::ExtractionFailed(_)));
    }

    #[tokio::test]
    async fn test_transport_errors_surface_as_llm_catch_all() {
        let llm = ScriptedCompletion::new(vec![Reply::Api {
            status: 500,
            message: "backend overloaded".to_string(),
        }]);

        let err = extract(ACME_JD, &llm).await.unwrap_err();
        assert!(matches!(err, AppError::Llm(_)));
    }
}
