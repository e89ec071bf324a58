use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type covering the pipeline failure taxonomy.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or blank required input. Raised before any network call.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Empty, unparseable, or invariant-violating extraction response.
    #[error("Extraction failed: {0}")]
    ExtractionFailed(String),

    /// Empty generation response.
    #[error("Generation failed: {0}")]
    GenerationFailed(String),

    /// Unclassified transport or provider failure from the LLM layer.
    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::ExtractionFailed(msg) => {
                tracing::error!("Extraction failed: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "EXTRACTION_FAILED",
                    "Failed to extract data from the job description.".to_string(),
                )
            }
            AppError::GenerationFailed(msg) => {
                tracing::error!("Generation failed: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "GENERATION_FAILED",
                    "Failed to generate the cover letter.".to_string(),
                )
            }
            AppError::Llm(msg) => {
                tracing::error!("LLM error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "LLM_ERROR",
                    "An AI processing error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_validation_maps_to_400() {
        assert_eq!(
            status_of(AppError::Validation("resume cannot be empty".to_string())),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_stage_failures_map_to_502() {
        assert_eq!(
            status_of(AppError::ExtractionFailed("no content".to_string())),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_of(AppError::GenerationFailed("no content".to_string())),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_of(AppError::Llm("connection reset".to_string())),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_internal_maps_to_500() {
        assert_eq!(
            status_of(AppError::Internal(anyhow::anyhow!("wiring bug"))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
