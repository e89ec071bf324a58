//! Axum route handlers for the cover letter API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::letter::extraction::{extract, JobExtraction};
use crate::letter::pipeline::{Pipeline, PipelineStatus};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    pub job_description: String,
}

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub extraction: JobExtraction,
}

#[derive(Debug, Deserialize)]
pub struct GenerateLetterRequest {
    pub resume: String,
    pub job_description: String,
}

#[derive(Debug, Serialize)]
pub struct GenerateLetterResponse {
    pub status: PipelineStatus,
    pub letter: String,
    pub extraction: JobExtraction,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/letters/extract
///
/// Extraction preview: returns the structured record without generating a
/// letter. Useful for checking what the model read out of a JD.
pub async fn handle_extract(
    State(state): State<AppState>,
    Json(request): Json<ExtractRequest>,
) -> Result<Json<ExtractResponse>, AppError> {
    if request.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "job_description cannot be empty".to_string(),
        ));
    }

    let extraction = extract(&request.job_description, state.llm.as_ref()).await?;

    Ok(Json(ExtractResponse { extraction }))
}

/// POST /api/v1/letters/generate
///
/// Full pipeline run: extraction then generation. One pipeline per request —
/// a failed run surfaces as the stored error, never a partial letter.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateLetterRequest>,
) -> Result<Json<GenerateLetterResponse>, AppError> {
    let mut pipeline = Pipeline::new(state.llm.clone());
    pipeline
        .start(&request.resume, &request.job_description)
        .await;

    let run = pipeline.into_state();
    match run.status {
        PipelineStatus::Success => {
            let letter = run.letter.ok_or_else(|| {
                AppError::Internal(anyhow::anyhow!("success state without a letter"))
            })?;
            let extraction = run.extraction.ok_or_else(|| {
                AppError::Internal(anyhow::anyhow!("success state without an extraction"))
            })?;
            Ok(Json(GenerateLetterResponse {
                status: PipelineStatus::Success,
                letter,
                extraction,
            }))
        }
        _ => Err(run.error.unwrap_or_else(|| {
            AppError::Internal(anyhow::anyhow!("error state without a stored error"))
        })),
    }
}
